//! Headless DOM.
//!
//! A document tree with inline styles, a small box-metrics model, selector
//! queries, files and events, enough to host the gallery page without a
//! rendering engine.

pub mod document;
pub mod element;
pub mod events;
pub mod file;
pub mod metrics;
pub mod node;
pub mod selector;
pub mod style;
pub mod tree;
pub mod window;

pub use document::{Document, DocumentRef};
pub use element::{ElementData, ImageState, TagName};
pub use events::{Event, EventCallback, EventManager, EventType, ListenerId};
pub use file::{DataTransfer, File};
pub use node::{Node, NodeData, NodeId, NodeType};
pub use selector::{Selector, SelectorList};
pub use style::{InlineStyle, StyleProperty, StyleValue};
pub use tree::DomTree;
pub use window::Window;
