//! Background transparency.

use image::RgbaImage;

/// RGB value treated as background.
pub const BACKGROUND_RGB: [u8; 3] = [255, 255, 255];

/// Make every exactly-white pixel fully transparent.
///
/// Matching is strict equality on all three channels: (254, 255, 255)
/// stays opaque. Non-matching pixels are left as they are. Returns the
/// number of pixels made transparent.
pub fn mask_white_pixels(image: &mut RgbaImage) -> usize {
    let mut masked = 0;
    for pixel in image.pixels_mut() {
        if pixel.0[..3] == BACKGROUND_RGB {
            pixel.0[3] = 0;
            masked += 1;
        }
    }
    masked
}
