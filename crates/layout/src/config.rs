//! Masonry options and their resolution.
//!
//! User-facing options are all optional. They are resolved once, at
//! construction, into an immutable [`LayoutConfig`]: horizontal and vertical
//! gutters fall back to the shared `gutter` and then to the default, and
//! every other field falls back to its documented default.

use crate::host::Host;
use common::{GalleryError, GalleryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default target column width in pixels.
pub const DEFAULT_BASE_WIDTH: f32 = 255.0;
/// Default gutter between columns and between stacked elements.
pub const DEFAULT_GUTTER: f32 = 10.0;
/// Default gutter used when only one column fits.
pub const DEFAULT_ULTIMATE_GUTTER: f32 = 5.0;

/// Horizontal placement direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn is_rtl(&self) -> bool {
        matches!(self, Direction::Rtl)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl FromStr for Direction {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" => Ok(Direction::Ltr),
            "rtl" => Ok(Direction::Rtl),
            other => Err(GalleryError::parse(format!("unknown direction '{other}'"))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-supplied masonry options.
///
/// Deserializes from the camelCase keys used by page scripts
/// (`baseWidth`, `gutterX`, `surroundingGutter`, ...). Missing keys stay
/// `None` and take their defaults during resolution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MasonryOptions {
    /// Target width of elements.
    pub base_width: Option<f32>,
    /// Shared gutter, used when `gutter_x`/`gutter_y` are not set.
    pub gutter: Option<f32>,
    /// Gutter between columns.
    pub gutter_x: Option<f32>,
    /// Gutter between elements of the same column.
    pub gutter_y: Option<f32>,
    /// Place elements on the shortest column instead of keeping list order.
    pub minify: Option<bool>,
    /// Apply the gutter before the first and after the last column.
    pub surrounding_gutter: Option<bool>,
    /// Gutter applied when only one column can be displayed.
    pub ultimate_gutter: Option<f32>,
    pub direction: Option<Direction>,
    /// Anchor a partial row to the leading edge instead of centering it.
    pub wedge: Option<bool>,
}

impl MasonryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> GalleryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_base_width(mut self, width: f32) -> Self {
        self.base_width = Some(width);
        self
    }

    pub fn with_gutter(mut self, gutter: f32) -> Self {
        self.gutter = Some(gutter);
        self
    }

    pub fn with_gutter_x(mut self, gutter: f32) -> Self {
        self.gutter_x = Some(gutter);
        self
    }

    pub fn with_gutter_y(mut self, gutter: f32) -> Self {
        self.gutter_y = Some(gutter);
        self
    }

    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = Some(minify);
        self
    }

    pub fn with_surrounding_gutter(mut self, enabled: bool) -> Self {
        self.surrounding_gutter = Some(enabled);
        self
    }

    pub fn with_ultimate_gutter(mut self, gutter: f32) -> Self {
        self.ultimate_gutter = Some(gutter);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_wedge(mut self, wedge: bool) -> Self {
        self.wedge = Some(wedge);
        self
    }

    /// Resolve against defaults and gutter fallback chains.
    pub fn resolve(&self) -> LayoutConfig {
        let shared_gutter = self.gutter.unwrap_or(DEFAULT_GUTTER);
        LayoutConfig {
            base_width: self.base_width.unwrap_or(DEFAULT_BASE_WIDTH),
            gutter_x: self.gutter_x.unwrap_or(shared_gutter),
            gutter_y: self.gutter_y.unwrap_or(shared_gutter),
            ultimate_gutter: self.ultimate_gutter.unwrap_or(DEFAULT_ULTIMATE_GUTTER),
            surrounding_gutter: self.surrounding_gutter.unwrap_or(true),
            minify: self.minify.unwrap_or(true),
            direction: self.direction.unwrap_or_default(),
            wedge: self.wedge.unwrap_or(false),
        }
    }
}

/// Resolved, immutable layout configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub base_width: f32,
    pub gutter_x: f32,
    pub gutter_y: f32,
    pub ultimate_gutter: f32,
    pub surrounding_gutter: bool,
    pub minify: bool,
    pub direction: Direction,
    pub wedge: bool,
}

impl LayoutConfig {
    /// Vertical margin added below each element.
    #[inline]
    pub fn trailing_gutter(&self, column_count: usize) -> f32 {
        if column_count > 1 {
            self.gutter_y
        } else {
            self.ultimate_gutter
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        MasonryOptions::default().resolve()
    }
}

impl From<&MasonryOptions> for LayoutConfig {
    fn from(options: &MasonryOptions) -> Self {
        options.resolve()
    }
}

/// Where the layout container comes from.
#[derive(Clone, Debug)]
pub enum ContainerSource<C> {
    /// Look the container up in the host document.
    Selector(String),
    /// Use this handle directly.
    Element(C),
}

impl<C> ContainerSource<C> {
    /// Resolve to a container handle.
    ///
    /// Fails with a configuration error when a selector matches nothing.
    pub fn resolve<H>(self, host: &H) -> GalleryResult<C>
    where
        H: Host<Container = C>,
    {
        match self {
            ContainerSource::Element(container) => Ok(container),
            ContainerSource::Selector(selector) => host.query_selector(&selector).ok_or_else(|| {
                GalleryError::configuration(format!(
                    "Container not found or missing: '{selector}'"
                ))
            }),
        }
    }
}

impl<C> From<&str> for ContainerSource<C> {
    fn from(selector: &str) -> Self {
        ContainerSource::Selector(selector.to_string())
    }
}

impl<C> From<String> for ContainerSource<C> {
    fn from(selector: String) -> Self {
        ContainerSource::Selector(selector)
    }
}

/// Options plus the container they apply to.
#[derive(Clone, Debug)]
pub struct MasonryConfig<C> {
    pub container: ContainerSource<C>,
    pub options: MasonryOptions,
}

impl<C> MasonryConfig<C> {
    pub fn new(container: impl Into<ContainerSource<C>>) -> Self {
        Self {
            container: container.into(),
            options: MasonryOptions::default(),
        }
    }

    /// Use a container handle directly.
    pub fn element(container: C) -> Self {
        Self::new(ContainerSource::Element(container))
    }

    pub fn with_options(mut self, options: MasonryOptions) -> Self {
        self.options = options;
        self
    }
}
