//! Caption editing.
//!
//! Captions grow with their text. Every edit resets the caption height to
//! its content height and reflows the cards, so the cards below a growing
//! caption move down.

use crate::binding::DomContainer;
use dom::metrics::scroll_height;
use dom::{Event, EventType, ListenerId, NodeId, StyleProperty, StyleValue, Window};
use layout::Masonry;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Auto-growing caption behaviour.
pub struct CaptionEditor {
    window: Arc<Window>,
    masonry: Arc<Masonry<DomContainer>>,
}

impl CaptionEditor {
    pub fn new(window: Arc<Window>, masonry: Arc<Masonry<DomContainer>>) -> Arc<Self> {
        Arc::new(Self { window, masonry })
    }

    /// Grow `textarea` on every `input` event.
    pub fn attach(self: &Arc<Self>, textarea: NodeId) -> ListenerId {
        let editor: Weak<Self> = Arc::downgrade(self);
        self.window.add_node_listener(
            textarea,
            EventType::Input,
            Arc::new(move |_: &mut Event| {
                if let Some(editor) = editor.upgrade() {
                    editor.auto_grow(textarea);
                }
            }),
        )
    }

    /// Fit `textarea` to its content and reflow. Returns the new height.
    pub fn auto_grow(&self, textarea: NodeId) -> f32 {
        let height = {
            let document = self.window.document();
            let mut document = document.write();
            document.remove_style(textarea, StyleProperty::Height);
            let height = scroll_height(&document, textarea);
            document.set_style(textarea, StyleProperty::Height, StyleValue::Px(height));
            height
        };
        debug!(height, "caption resized");
        self.masonry.layout();
        height
    }

    /// Replace the caption text as typing would, firing `input`.
    pub fn edit(&self, textarea: NodeId, text: &str) {
        self.window.document().write().set_value(textarea, text);
        let mut event = Event::new(EventType::Input);
        self.window.dispatch_event(textarea, &mut event);
    }
}
