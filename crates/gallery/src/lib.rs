//! Card gallery.
//!
//! This crate wires the masonry engine to the headless DOM:
//! - container binding (inline styles and box metrics)
//! - upload surface and image loading
//! - drag state
//! - caption editing
//! - the `card-gallery` binary

pub mod app;
pub mod binding;
pub mod caption;
pub mod card;
pub mod config;
pub mod drag;
pub mod image_loader;
pub mod notify;
pub mod uploads;

pub use app::Gallery;
pub use binding::{DomContainer, DomHost};
pub use caption::CaptionEditor;
pub use config::GalleryConfig;
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use uploads::{UploadReport, Uploader};

/// Gallery version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
