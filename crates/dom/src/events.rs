//! DOM Events implementation.

use crate::file::{DataTransfer, File};
use crate::node::NodeId;
use crate::tree::DomTree;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Event type enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    // Form events
    Change,
    Input,

    // Document/Window events
    Load,
    Error,
    Resize,

    // Drag events
    DragEnter,
    DragOver,
    DragLeave,
    Drop,

    // Other
    Custom(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Change => "change",
            EventType::Input => "input",
            EventType::Load => "load",
            EventType::Error => "error",
            EventType::Resize => "resize",
            EventType::DragEnter => "dragenter",
            EventType::DragOver => "dragover",
            EventType::DragLeave => "dragleave",
            EventType::Drop => "drop",
            EventType::Custom(s) => s,
        }
    }

    /// Check if event bubbles by default.
    pub fn bubbles(&self) -> bool {
        !matches!(self, EventType::Load | EventType::Error | EventType::Resize)
    }

    /// Check if event is cancelable by default.
    pub fn cancelable(&self) -> bool {
        !matches!(
            self,
            EventType::Load | EventType::Error | EventType::Resize | EventType::Input
        )
    }

    pub fn is_drag(&self) -> bool {
        matches!(
            self,
            EventType::DragEnter | EventType::DragOver | EventType::DragLeave | EventType::Drop
        )
    }
}

impl FromStr for EventType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "change" => EventType::Change,
            "input" => EventType::Input,
            "load" => EventType::Load,
            "error" => EventType::Error,
            "resize" => EventType::Resize,
            "dragenter" => EventType::DragEnter,
            "dragover" => EventType::DragOver,
            "dragleave" => EventType::DragLeave,
            "drop" => EventType::Drop,
            other => EventType::Custom(other.to_string()),
        })
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DOM Event.
#[derive(Clone, Debug)]
pub struct Event {
    /// Event type.
    pub event_type: EventType,
    /// Target element.
    pub target: Option<NodeId>,
    /// Current target during propagation.
    pub current_target: Option<NodeId>,
    /// Whether event bubbles.
    pub bubbles: bool,
    /// Whether event is cancelable.
    pub cancelable: bool,
    /// Whether default was prevented.
    pub default_prevented: bool,
    /// Whether propagation was stopped.
    pub propagation_stopped: bool,
    /// Dragged payload, for drag events.
    pub data_transfer: Option<DataTransfer>,
}

impl Event {
    pub fn new(event_type: EventType) -> Self {
        let bubbles = event_type.bubbles();
        let cancelable = event_type.cancelable();

        Self {
            event_type,
            target: None,
            current_target: None,
            bubbles,
            cancelable,
            default_prevented: false,
            propagation_stopped: false,
            data_transfer: None,
        }
    }

    /// An event carrying user-supplied files, as `drop` and the `change`
    /// of a file input do.
    pub fn with_files(event_type: EventType, files: Vec<File>) -> Self {
        let mut event = Self::new(event_type);
        event.data_transfer = Some(DataTransfer::new(files));
        event
    }

    /// Files carried by the event, if it has a payload at all.
    pub fn files(&self) -> Option<&[File]> {
        self.data_transfer.as_ref().map(|dt| dt.files.as_slice())
    }

    /// Prevent default action.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Event listener callback type.
pub type EventCallback = Arc<dyn Fn(&mut Event) + Send + Sync>;

/// Handle returned when registering a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listeners of one target, by event type, in registration order.
#[derive(Clone, Default)]
pub struct EventListeners {
    by_type: HashMap<EventType, IndexMap<ListenerId, EventCallback>>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: ListenerId, event_type: EventType, callback: EventCallback) {
        self.by_type.entry(event_type).or_default().insert(id, callback);
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.by_type
            .values_mut()
            .any(|listeners| listeners.shift_remove(&id).is_some())
    }

    /// Snapshot of the callbacks for `event_type`.
    pub fn get(&self, event_type: &EventType) -> Vec<EventCallback> {
        self.by_type
            .get(event_type)
            .map(|l| l.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn count(&self, event_type: &EventType) -> usize {
        self.by_type.get(event_type).map_or(0, IndexMap::len)
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .by_type
            .iter()
            .map(|(t, l)| (t.as_str(), l.len()))
            .collect();
        f.debug_struct("EventListeners").field("counts", &counts).finish()
    }
}

/// Event manager for node listeners.
#[derive(Debug, Default)]
pub struct EventManager {
    listeners: HashMap<NodeId, EventListeners>,
    next_id: u64,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a listener id.
    pub fn next_id(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }

    /// Add event listener for a node.
    pub fn add_listener(
        &mut self,
        node: NodeId,
        event_type: EventType,
        callback: EventCallback,
    ) -> ListenerId {
        let id = self.next_id();
        self.listeners
            .entry(node)
            .or_default()
            .add(id, event_type, callback);
        id
    }

    /// Remove event listener by id.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.values_mut().any(|l| l.remove(id))
    }

    /// Callbacks along the propagation path of an event on `target`:
    /// the target first, then its ancestors if the event bubbles.
    pub fn path(
        &self,
        tree: &DomTree,
        target: NodeId,
        event_type: &EventType,
        bubbles: bool,
    ) -> Vec<(NodeId, Vec<EventCallback>)> {
        let nodes = std::iter::once(target).chain(
            bubbles
                .then(|| tree.ancestors(target))
                .into_iter()
                .flatten(),
        );
        nodes
            .filter_map(|node| {
                let callbacks = self.listeners.get(&node)?.get(event_type);
                (!callbacks.is_empty()).then_some((node, callbacks))
            })
            .collect()
    }

    /// Remove all listeners for a node.
    pub fn remove_all(&mut self, node: NodeId) {
        self.listeners.remove(&node);
    }
}

/// Run `event` through collected callbacks, honouring `stop_propagation`.
/// Returns `false` when the default action was prevented.
pub fn invoke(path: &[(NodeId, Vec<EventCallback>)], event: &mut Event) -> bool {
    for (node, callbacks) in path {
        event.current_target = Some(*node);
        for callback in callbacks {
            callback(event);
        }
        if event.propagation_stopped {
            break;
        }
    }
    event.current_target = None;
    !event.default_prevented
}
