//! Binding of the masonry engine to the headless DOM.
//!
//! Sizes and offsets are written as inline styles (`width`, `height`,
//! `min-width`, `transform`) and read back through the box metrics.

use common::geometry::Point;
use dom::metrics::{client_width, offset_height};
use dom::{DocumentRef, Event, EventType, NodeId, StyleProperty, StyleValue, Window};
use layout::{Container, Host, ResizeListener, ResizeSubscription};
use std::sync::Arc;
use tracing::warn;

/// An element of the document used as a layout container.
#[derive(Clone)]
pub struct DomContainer {
    document: DocumentRef,
    node: NodeId,
}

impl DomContainer {
    pub fn new(document: DocumentRef, node: NodeId) -> Self {
        Self { document, node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    fn child(&self, index: usize) -> Option<NodeId> {
        self.document
            .read()
            .tree
            .element_children(self.node)
            .get(index)
            .copied()
    }

    fn set_child_style(&self, index: usize, property: StyleProperty, value: StyleValue) {
        if let Some(child) = self.child(index) {
            self.document.write().set_style(child, property, value);
        }
    }
}

impl std::fmt::Debug for DomContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomContainer").field("node", &self.node).finish()
    }
}

impl Container for DomContainer {
    fn client_width(&self) -> f32 {
        client_width(&self.document.read(), self.node)
    }

    fn set_min_width(&mut self, width: f32) {
        self.document
            .write()
            .set_style(self.node, StyleProperty::MinWidth, StyleValue::Px(width));
    }

    fn set_height(&mut self, height: f32) {
        self.document
            .write()
            .set_style(self.node, StyleProperty::Height, StyleValue::Px(height));
    }

    fn clear_overrides(&mut self) {
        let mut document = self.document.write();
        document.remove_style(self.node, StyleProperty::MinWidth);
        document.remove_style(self.node, StyleProperty::Height);
    }

    fn child_count(&self) -> usize {
        self.document.read().tree.element_children(self.node).len()
    }

    fn set_child_width(&mut self, index: usize, width: f32) {
        self.set_child_style(index, StyleProperty::Width, StyleValue::Px(width));
    }

    fn child_height(&self, index: usize) -> f32 {
        let document = self.document.read();
        document
            .tree
            .element_children(self.node)
            .get(index)
            .map(|&child| offset_height(&document, child))
            .unwrap_or(0.0)
    }

    fn set_child_position(&mut self, index: usize, position: Point) {
        self.set_child_style(
            index,
            StyleProperty::Transform,
            StyleValue::Translate(position.x, position.y),
        );
    }

    fn clear_child_overrides(&mut self, index: usize) {
        if let Some(child) = self.child(index) {
            let mut document = self.document.write();
            document.remove_style(child, StyleProperty::Width);
            document.remove_style(child, StyleProperty::Transform);
        }
    }
}

/// The window as a layout host.
#[derive(Clone, Debug)]
pub struct DomHost {
    window: Arc<Window>,
}

impl DomHost {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}

impl Host for DomHost {
    type Container = DomContainer;

    fn query_selector(&self, selector: &str) -> Option<DomContainer> {
        let document = self.window.document();
        let found = document.read().query_selector(selector);
        match found {
            Ok(node) => node.map(|node| DomContainer::new(document.clone(), node)),
            Err(e) => {
                warn!(selector, error = %e, "unusable container selector");
                None
            }
        }
    }

    fn subscribe_resize(&self, listener: ResizeListener) -> ResizeSubscription {
        let id = self.window.add_event_listener(
            EventType::Resize,
            Arc::new(move |_: &mut Event| listener()),
        );

        let window = Arc::downgrade(&self.window);
        ResizeSubscription::new(move || {
            if let Some(window) = window.upgrade() {
                window.remove_event_listener(id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::geometry::Size;

    /// `body > div.cards` holding `count` image children of natural size
    /// `natural`.
    fn page(width: f32, count: usize, natural: Size) -> (Arc<Window>, DomHost) {
        let window = Arc::new(Window::new(width, 600.0));
        {
            let document = window.document();
            let mut document = document.write();
            let body = document.body();
            let cards = document.create_element_with_class("div", "cards");
            document.tree.append_child(body, cards);
            for _ in 0..count {
                let img = document.create_element("img");
                document.set_natural_size(img, natural);
                document.tree.append_child(cards, img);
            }
        }
        let host = DomHost::new(window.clone());
        (window, host)
    }

    #[test]
    fn test_query_selector() {
        let (_, host) = page(800.0, 0, Size::ZERO);
        assert!(host.query_selector(".cards").is_some());
        assert!(host.query_selector("body > .cards").is_some());
        assert!(host.query_selector(".missing").is_none());
        assert!(host.query_selector("> bad").is_none());
    }

    #[test]
    fn test_container_reads_and_writes_styles() {
        let (window, host) = page(800.0, 2, Size::new(200.0, 100.0));
        let mut container = host.query_selector(".cards").unwrap();
        assert_eq!(container.client_width(), 800.0);
        assert_eq!(container.child_count(), 2);

        container.set_child_width(0, 100.0);
        assert_eq!(container.child_height(0), 50.0);
        container.set_child_position(1, Point::new(124.0, 0.0));
        container.set_min_width(1000.0);
        container.set_height(74.0);
        assert_eq!(container.client_width(), 1000.0);

        let document = window.document();
        {
            let document = document.read();
            let children = document.tree.element_children(container.node());
            let style = &document.tree.get_element(children[1]).unwrap().style;
            assert_eq!(style.css_text(), "transform: translate3d(124px, 0px, 0);");
            let own = &document.tree.get_element(container.node()).unwrap().style;
            assert_eq!(own.css_text(), "min-width: 1000px; height: 74px;");
        }

        container.clear_child_overrides(0);
        container.clear_child_overrides(1);
        container.clear_overrides();
        let document = document.read();
        for child in document.tree.element_children(container.node()) {
            assert!(document.tree.get_element(child).unwrap().style.is_empty());
        }
        assert!(document.tree.get_element(container.node()).unwrap().style.is_empty());
    }

    #[test]
    fn test_resize_subscription() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let (window, host) = page(800.0, 0, Size::ZERO);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let mut subscription = host.subscribe_resize(Arc::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        window.resize_to(640.0, 600.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(subscription.release());
        assert_eq!(window.listener_count(&EventType::Resize), 0);
        window.resize_to(480.0, 600.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
