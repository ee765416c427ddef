//! Gallery configuration.

use common::geometry::Size;
use common::GalleryResult;
use layout::MasonryOptions;
use std::path::Path;

/// Selector of the card container on the gallery page.
pub const CARDS_SELECTOR: &str = ".cards";

/// Gallery configuration.
#[derive(Clone, Debug)]
pub struct GalleryConfig {
    /// Viewport size.
    pub viewport: Size,
    /// Selector of the layout container.
    pub container: String,
    /// Masonry options.
    pub options: MasonryOptions,
}

impl GalleryConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// A phone-sized viewport.
    pub fn mobile() -> Self {
        Self {
            viewport: Size::new(375.0, 812.0),
            ..Self::default()
        }
    }

    /// Set viewport size.
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    /// Set the container selector.
    pub fn with_container(mut self, selector: &str) -> Self {
        self.container = selector.to_string();
        self
    }

    /// Set masonry options.
    pub fn with_options(mut self, options: MasonryOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the masonry options with those of a JSON file.
    pub fn with_options_file(self, path: &Path) -> GalleryResult<Self> {
        let options = load_options(path)?;
        Ok(self.with_options(options))
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(1280.0, 720.0),
            container: CARDS_SELECTOR.to_string(),
            options: page_options(),
        }
    }
}

/// Options the gallery page ships with.
pub fn page_options() -> MasonryOptions {
    MasonryOptions::new()
        .with_base_width(128.0)
        .with_surrounding_gutter(false)
        .with_gutter(24.0)
        .with_ultimate_gutter(16.0)
}

/// Read masonry options from a camelCase JSON file.
pub fn load_options(path: &Path) -> GalleryResult<MasonryOptions> {
    let json = std::fs::read_to_string(path)?;
    MasonryOptions::from_json(&json)
}
