//! Masonry layout engine.
//!
//! This crate places the children of a container into balanced columns:
//! configuration resolution, column planning, element placement and
//! resize handling. Hosts plug in through the traits in [`host`].

pub mod columns;
pub mod config;
pub mod engine;
pub mod host;
pub mod memory;
pub mod placement;
pub mod resize;

pub use columns::{plan_columns, ColumnPlan};
pub use config::{ContainerSource, Direction, LayoutConfig, MasonryConfig, MasonryOptions};
pub use engine::{LayoutSnapshot, LayoutState, Masonry};
pub use host::{Container, Host, ResizeListener, ResizeSubscription};
pub use placement::{place, Placement};
pub use resize::ResizeController;
