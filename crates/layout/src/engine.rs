//! Main masonry engine.

use crate::columns::plan_columns;
use crate::config::{LayoutConfig, MasonryConfig};
use crate::host::{Container, Host};
use crate::placement::place;
use crate::resize::{width_changed, ResizeController};
use common::geometry::{Point, Rect, Size};
use common::GalleryResult;
use parking_lot::Mutex;
use serde::Serialize;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Transient state of the last layout pass.
#[derive(Clone, Debug, Default)]
pub struct LayoutState {
    /// Last working width of the container.
    pub width: f32,
    pub column_count: usize,
    pub current_gutter_x: f32,
    pub column_width: f32,
    /// Measured height of each element.
    pub sizes: Vec<f32>,
    /// Accumulated height of each column that received an element.
    pub columns: SmallVec<[f32; 8]>,
    pub positions: Vec<Point>,
    pub container_height: f32,
}

/// Serializable view of the last layout pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    pub width: f32,
    pub column_count: usize,
    pub gutter_x: f32,
    pub column_width: f32,
    pub container_height: f32,
    pub passes: u64,
    /// Box of every element, in child order.
    pub elements: Vec<Rect>,
}

/// Engine state shared with the resize listener.
struct LayoutEngine<C> {
    config: LayoutConfig,
    container: C,
    state: LayoutState,
    passes: u64,
    destroyed: bool,
}

impl<C: Container> LayoutEngine<C> {
    fn new(config: LayoutConfig, container: C) -> Self {
        let column_count = plan_columns(&config, container.client_width()).column_count;
        Self {
            config,
            container,
            state: LayoutState {
                column_count,
                current_gutter_x: config.gutter_x,
                ..Default::default()
            },
            passes: 0,
            destroyed: false,
        }
    }

    /// Full recomputation from the container's current children.
    fn layout(&mut self) {
        self.passes += 1;

        let plan = plan_columns(&self.config, self.container.client_width());
        if plan.clamped {
            self.container.set_min_width(self.config.base_width);
        }

        let count = self.container.child_count();
        let mut sizes = Vec::with_capacity(count);
        for index in 0..count {
            // Height is often intrinsic to width, so width goes first.
            self.container.set_child_width(index, plan.column_width);
            sizes.push(self.container.child_height(index));
        }

        let placement = place(&self.config, &plan, &sizes);
        for (index, &position) in placement.positions.iter().enumerate() {
            self.container.set_child_position(index, position);
        }
        self.container.set_height(placement.container_height);

        debug!(
            pass = self.passes,
            width = plan.width,
            columns = plan.column_count,
            gutter = plan.gutter_x,
            column_width = plan.column_width,
            elements = count,
            height = placement.container_height,
            "masonry layout"
        );

        self.state = LayoutState {
            width: plan.width,
            column_count: plan.column_count,
            current_gutter_x: plan.gutter_x,
            column_width: plan.column_width,
            sizes,
            columns: placement.columns,
            positions: placement.positions,
            container_height: placement.container_height,
        };
    }

    fn on_resize(&mut self) -> bool {
        let measured = self.container.client_width();
        if !width_changed(self.state.width, measured) {
            trace!(width = measured, "resize without width change ignored");
            return false;
        }
        debug!(from = self.state.width, to = measured, "container width changed");
        self.layout();
        true
    }

    fn clear_styles(&mut self) {
        for index in 0..self.container.child_count() {
            self.container.clear_child_overrides(index);
        }
        self.container.clear_overrides();
        self.destroyed = true;
    }

    fn snapshot(&self) -> LayoutSnapshot {
        let elements = self
            .state
            .positions
            .iter()
            .zip(&self.state.sizes)
            .map(|(&origin, &height)| {
                Rect::from_origin_size(origin, Size::new(self.state.column_width, height))
            })
            .collect();

        LayoutSnapshot {
            width: self.state.width,
            column_count: self.state.column_count,
            gutter_x: self.state.current_gutter_x,
            column_width: self.state.column_width,
            container_height: self.state.container_height,
            passes: self.passes,
            elements,
        }
    }
}

/// Masonry layout bound to one container.
///
/// Construction resolves the options and the container, runs a first
/// layout pass and subscribes to host resize notifications. Collaborators
/// that change the container's children call [`Masonry::layout`] afterwards.
pub struct Masonry<C> {
    engine: Arc<Mutex<LayoutEngine<C>>>,
    resize: Mutex<ResizeController>,
}

impl<C> Masonry<C>
where
    C: Container + Send + 'static,
{
    /// Build an engine for the container described by `config`.
    ///
    /// Fails with a configuration error when the container selector matches
    /// nothing in `host`.
    pub fn new<H>(host: &H, config: MasonryConfig<C>) -> GalleryResult<Self>
    where
        H: Host<Container = C>,
    {
        let layout_config = config.options.resolve();
        let container = config.container.resolve(host)?;

        let mut engine = LayoutEngine::new(layout_config, container);
        engine.layout();
        let engine = Arc::new(Mutex::new(engine));

        let weak = Arc::downgrade(&engine);
        let resize = ResizeController::attach(host, move || {
            if let Some(engine) = weak.upgrade() {
                engine.lock().on_resize();
            }
        });

        info!(
            base_width = layout_config.base_width,
            gutter_x = layout_config.gutter_x,
            gutter_y = layout_config.gutter_y,
            direction = %layout_config.direction,
            "masonry created"
        );

        Ok(Self {
            engine,
            resize: Mutex::new(resize),
        })
    }

    /// Recompute the whole layout from the container's current state.
    pub fn layout(&self) {
        self.engine.lock().layout();
    }

    /// Process a resize notification directly.
    ///
    /// Returns whether a layout pass ran.
    pub fn handle_resize(&self) -> bool {
        self.engine.lock().on_resize()
    }

    /// Unsubscribe from resize notifications and remove every style
    /// override applied to the container and its children. Safe to call
    /// more than once.
    pub fn destroy(&self) {
        let detached = self.resize.lock().detach();
        self.engine.lock().clear_styles();
        if detached {
            info!("masonry destroyed");
        }
    }

    /// Whether [`Masonry::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.engine.lock().destroyed
    }

    /// Resolved options.
    pub fn config(&self) -> LayoutConfig {
        self.engine.lock().config
    }

    /// Column count of the last pass.
    pub fn column_count(&self) -> usize {
        self.engine.lock().state.column_count
    }

    /// Width written onto every element in the last pass.
    pub fn column_width(&self) -> f32 {
        self.engine.lock().state.column_width
    }

    /// Effective horizontal gutter of the last pass.
    pub fn current_gutter_x(&self) -> f32 {
        self.engine.lock().state.current_gutter_x
    }

    /// Working width used by the last pass.
    pub fn width(&self) -> f32 {
        self.engine.lock().state.width
    }

    /// Number of layout passes run so far.
    pub fn passes(&self) -> u64 {
        self.engine.lock().passes
    }

    /// Copy of the last pass's state.
    pub fn state(&self) -> LayoutState {
        self.engine.lock().state.clone()
    }

    /// Serializable view of the last pass.
    pub fn snapshot(&self) -> LayoutSnapshot {
        self.engine.lock().snapshot()
    }
}
