//! Studio AI - marketing image generator
//!
//! Accepts a product name and promotional offer in Hebrew, translates both to
//! English, builds a product-photography prompt and asks a text-to-image model
//! for the picture, which is stored and served as a static file.

pub mod ai;
pub mod app;
pub mod error;
pub mod image;
pub mod models;
pub mod prompts;
pub mod server;

pub use error::{Error, Result};
