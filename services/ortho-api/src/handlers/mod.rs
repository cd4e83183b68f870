//! HTTP request handlers for the orthophoto API.

pub mod bounds;
pub mod health;
pub mod orthophoto;
pub mod process;
pub mod storage;
