//! In-memory host.
//!
//! A container and resize source built from plain data. It lets the engine
//! run without any rendering surface, for tests and headless layout.

use crate::host::{Container, Host, ResizeListener, ResizeSubscription};
use common::geometry::{Point, Size};
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// How an element's rendered height is derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementHeight {
    /// Height independent of width.
    Fixed(f32),
    /// Height follows the width at this natural size's aspect ratio.
    Proportional(Size),
}

/// A child of a [`MemoryContainer`].
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryElement {
    pub height: ElementHeight,
    /// Width override, if any.
    pub width: Option<f32>,
    /// Position override, if any.
    pub position: Option<Point>,
}

impl MemoryElement {
    pub fn fixed(height: f32) -> Self {
        Self {
            height: ElementHeight::Fixed(height),
            width: None,
            position: None,
        }
    }

    pub fn proportional(natural: Size) -> Self {
        Self {
            height: ElementHeight::Proportional(natural),
            width: None,
            position: None,
        }
    }

    /// Rendered height at the current width override.
    pub fn rendered_height(&self) -> f32 {
        match self.height {
            ElementHeight::Fixed(height) => height,
            ElementHeight::Proportional(natural) => {
                natural.height_for_width(self.width.unwrap_or(natural.width))
            }
        }
    }
}

#[derive(Debug, Default)]
struct ContainerState {
    width: f32,
    min_width: Option<f32>,
    height: Option<f32>,
    children: Vec<MemoryElement>,
}

/// Shared handle to an in-memory container.
///
/// Clones refer to the same container, so a test can keep one handle while
/// the engine owns another.
#[derive(Clone, Debug, Default)]
pub struct MemoryContainer {
    state: Arc<RwLock<ContainerState>>,
}

impl MemoryContainer {
    pub fn new(width: f32) -> Self {
        Self {
            state: Arc::new(RwLock::new(ContainerState {
                width,
                ..Default::default()
            })),
        }
    }

    pub fn with_children(width: f32, children: impl IntoIterator<Item = MemoryElement>) -> Self {
        let container = Self::new(width);
        container.state.write().children.extend(children);
        container
    }

    /// Width of the region, ignoring any min-width override.
    pub fn width(&self) -> f32 {
        self.state.read().width
    }

    pub fn set_width(&self, width: f32) {
        self.state.write().width = width;
    }

    pub fn min_width(&self) -> Option<f32> {
        self.state.read().min_width
    }

    pub fn height(&self) -> Option<f32> {
        self.state.read().height
    }

    pub fn push(&self, element: MemoryElement) {
        self.state.write().children.push(element);
    }

    pub fn insert(&self, index: usize, element: MemoryElement) {
        let mut state = self.state.write();
        let index = index.min(state.children.len());
        state.children.insert(index, element);
    }

    pub fn remove(&self, index: usize) -> Option<MemoryElement> {
        let mut state = self.state.write();
        if index < state.children.len() {
            Some(state.children.remove(index))
        } else {
            None
        }
    }

    pub fn set_element_height(&self, index: usize, height: ElementHeight) {
        if let Some(child) = self.state.write().children.get_mut(index) {
            child.height = height;
        }
    }

    pub fn element(&self, index: usize) -> Option<MemoryElement> {
        self.state.read().children.get(index).cloned()
    }

    pub fn elements(&self) -> Vec<MemoryElement> {
        self.state.read().children.clone()
    }

    pub fn positions(&self) -> Vec<Option<Point>> {
        self.state.read().children.iter().map(|c| c.position).collect()
    }

    pub fn len(&self) -> usize {
        self.state.read().children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Container for MemoryContainer {
    fn client_width(&self) -> f32 {
        let state = self.state.read();
        match state.min_width {
            Some(min) => state.width.max(min),
            None => state.width,
        }
    }

    fn set_min_width(&mut self, width: f32) {
        self.state.write().min_width = Some(width);
    }

    fn set_height(&mut self, height: f32) {
        self.state.write().height = Some(height);
    }

    fn clear_overrides(&mut self) {
        let mut state = self.state.write();
        state.min_width = None;
        state.height = None;
    }

    fn child_count(&self) -> usize {
        self.len()
    }

    fn set_child_width(&mut self, index: usize, width: f32) {
        if let Some(child) = self.state.write().children.get_mut(index) {
            child.width = Some(width);
        }
    }

    fn child_height(&self, index: usize) -> f32 {
        self.state
            .read()
            .children
            .get(index)
            .map(MemoryElement::rendered_height)
            .unwrap_or(0.0)
    }

    fn set_child_position(&mut self, index: usize, position: Point) {
        if let Some(child) = self.state.write().children.get_mut(index) {
            child.position = Some(position);
        }
    }

    fn clear_child_overrides(&mut self, index: usize) {
        if let Some(child) = self.state.write().children.get_mut(index) {
            child.width = None;
            child.position = None;
        }
    }
}

type ListenerMap = IndexMap<u64, ResizeListener>;

/// In-memory host: named containers and a manually fired resize source.
#[derive(Default)]
pub struct MemoryHost {
    containers: RwLock<HashMap<String, MemoryContainer>>,
    listeners: Arc<Mutex<ListenerMap>>,
    next_listener: AtomicU64,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `container` reachable through `selector`.
    pub fn register(&self, selector: &str, container: MemoryContainer) {
        self.containers.write().insert(selector.to_string(), container);
    }

    /// Fire a resize notification. Returns the number of listeners called.
    pub fn notify_resize(&self) -> usize {
        // Listeners may unsubscribe while running, so call them unlocked.
        let listeners: Vec<ResizeListener> = self.listeners.lock().values().cloned().collect();
        for listener in &listeners {
            listener();
        }
        listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl Host for MemoryHost {
    type Container = MemoryContainer;

    fn query_selector(&self, selector: &str) -> Option<MemoryContainer> {
        self.containers.read().get(selector).cloned()
    }

    fn subscribe_resize(&self, listener: ResizeListener) -> ResizeSubscription {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().insert(id, listener);

        let listeners = Arc::downgrade(&self.listeners);
        ResizeSubscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.lock().shift_remove(&id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proportional_height() {
        let mut element = MemoryElement::proportional(Size::new(400.0, 300.0));
        assert_eq!(element.rendered_height(), 300.0);
        element.width = Some(200.0);
        assert_eq!(element.rendered_height(), 150.0);
    }

    #[test]
    fn test_container_min_width() {
        let mut container = MemoryContainer::new(100.0);
        assert_eq!(container.client_width(), 100.0);
        container.set_min_width(128.0);
        assert_eq!(container.client_width(), 128.0);
        container.clear_overrides();
        assert_eq!(container.client_width(), 100.0);
        assert_eq!(container.min_width(), None);
    }

    #[test]
    fn test_child_overrides() {
        let mut container = MemoryContainer::with_children(500.0, [MemoryElement::fixed(40.0)]);
        container.set_child_width(0, 120.0);
        container.set_child_position(0, Point::new(5.0, 6.0));
        let child = container.element(0).unwrap();
        assert_eq!(child.width, Some(120.0));
        assert_eq!(child.position, Some(Point::new(5.0, 6.0)));

        container.clear_child_overrides(0);
        let child = container.element(0).unwrap();
        assert_eq!(child.width, None);
        assert_eq!(child.position, None);

        // Out-of-range indices are ignored.
        container.set_child_width(7, 1.0);
        assert_eq!(container.child_height(7), 0.0);
    }

    #[test]
    fn test_shared_handles() {
        let container = MemoryContainer::new(300.0);
        let other = container.clone();
        other.push(MemoryElement::fixed(10.0));
        assert_eq!(container.len(), 1);
        assert_eq!(container.remove(0), Some(MemoryElement::fixed(10.0)));
        assert!(other.is_empty());
        assert_eq!(other.remove(0), None);
    }

    #[test]
    fn test_host_lookup_and_listeners() {
        let host = MemoryHost::new();
        host.register(".cards", MemoryContainer::new(640.0));
        assert!(host.query_selector(".cards").is_some());
        assert!(host.query_selector(".missing").is_none());

        let mut subscription = host.subscribe_resize(Arc::new(|| {}));
        assert_eq!(host.listener_count(), 1);
        assert_eq!(host.notify_resize(), 1);
        subscription.release();
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.notify_resize(), 0);
    }
}
