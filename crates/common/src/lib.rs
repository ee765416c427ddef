//! Common types shared by the gallery crates.

pub mod error;
pub mod geometry;

pub use error::{GalleryError, GalleryResult};
pub use geometry::{Point, Rect, Size};
