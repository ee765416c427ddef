//! DOM Window object implementation.

use crate::document::{Document, DocumentRef};
use crate::events::{self, Event, EventCallback, EventListeners, EventManager, EventType, ListenerId};
use crate::node::NodeId;
use common::geometry::Size;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::trace;

/// Headless window: owns the document, the viewport size and every event
/// listener. Shared as `Arc<Window>`; all state sits behind locks that are
/// released before any listener runs.
pub struct Window {
    document: DocumentRef,
    inner_size: RwLock<Size>,
    listeners: Mutex<EventListeners>,
    events: Mutex<EventManager>,
}

impl Window {
    pub fn new(inner_width: f32, inner_height: f32) -> Self {
        let size = Size::new(inner_width, inner_height);
        Self {
            document: Arc::new(RwLock::new(Document::new(size))),
            inner_size: RwLock::new(size),
            listeners: Mutex::new(EventListeners::new()),
            events: Mutex::new(EventManager::new()),
        }
    }

    /// Associated document.
    pub fn document(&self) -> DocumentRef {
        self.document.clone()
    }

    pub fn inner_width(&self) -> f32 {
        self.inner_size.read().width
    }

    pub fn inner_height(&self) -> f32 {
        self.inner_size.read().height
    }

    /// Listen for window-level events such as `resize`.
    pub fn add_event_listener(&self, event_type: EventType, callback: EventCallback) -> ListenerId {
        let id = self.events.lock().next_id();
        self.listeners.lock().add(id, event_type, callback);
        id
    }

    /// Remove a listener added with [`Window::add_event_listener`] or
    /// [`Window::add_node_listener`].
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.listeners.lock().remove(id) || self.events.lock().remove_listener(id)
    }

    pub fn listener_count(&self, event_type: &EventType) -> usize {
        self.listeners.lock().count(event_type)
    }

    /// Listen for events targeted at, or bubbling through, `node`.
    pub fn add_node_listener(
        &self,
        node: NodeId,
        event_type: EventType,
        callback: EventCallback,
    ) -> ListenerId {
        self.events.lock().add_listener(node, event_type, callback)
    }

    /// Resize the viewport. Fires `resize` only when the size changed.
    pub fn resize_to(&self, inner_width: f32, inner_height: f32) -> bool {
        let size = Size::new(inner_width, inner_height);
        {
            let mut current = self.inner_size.write();
            if *current == size {
                return false;
            }
            *current = size;
        }
        self.document.write().viewport = size;
        self.dispatch_resize();
        true
    }

    /// Fire a `resize` event without changing the size, as some mobile
    /// browsers do while scrolling. Returns the number of listeners run.
    pub fn dispatch_resize(&self) -> usize {
        let callbacks = self.listeners.lock().get(&EventType::Resize);
        trace!(listeners = callbacks.len(), "dispatching resize");
        let mut event = Event::new(EventType::Resize);
        for callback in &callbacks {
            callback(&mut event);
        }
        callbacks.len()
    }

    /// Dispatch `event` at `target`, bubbling up to the window.
    /// Returns `false` when the default action was prevented.
    pub fn dispatch_event(&self, target: NodeId, event: &mut Event) -> bool {
        event.target = Some(target);
        let path = {
            let document = self.document.read();
            self.events
                .lock()
                .path(&document.tree, target, &event.event_type, event.bubbles)
        };
        trace!(event = %event.event_type, handlers = path.len(), "dispatching event");

        let not_prevented = events::invoke(&path, event);
        if event.bubbles && !event.propagation_stopped {
            let callbacks = self.listeners.lock().get(&event.event_type);
            for callback in &callbacks {
                callback(event);
            }
        }
        not_prevented && !event.default_prevented
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("inner_size", &*self.inner_size.read())
            .field("listeners", &*self.listeners.lock())
            .finish()
    }
}
