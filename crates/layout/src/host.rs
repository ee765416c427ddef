//! Host capabilities the masonry engine relies on.
//!
//! The engine never touches a rendering surface directly. A host hands it a
//! [`Container`] that can report widths and heights and accept size and
//! position directives, plus a resize notification source.

use common::geometry::Point;
use std::fmt;
use std::sync::Arc;

/// Callback invoked on every host size-change notification.
pub type ResizeListener = Arc<dyn Fn() + Send + Sync>;

/// A sized region whose ordered children are laid out by the engine.
///
/// Child indices follow the container's current child order and are only
/// valid until the next structural change.
pub trait Container {
    /// Current measured width of the container.
    fn client_width(&self) -> f32;

    /// Force a minimum width on the container.
    fn set_min_width(&mut self, width: f32);

    /// Set the total height of the container.
    fn set_height(&mut self, height: f32);

    /// Remove the min-width and height overrides.
    fn clear_overrides(&mut self);

    /// Number of children.
    fn child_count(&self) -> usize;

    /// Set the width override of a child.
    fn set_child_width(&mut self, index: usize, width: f32);

    /// Rendered height of a child, with its current width applied.
    fn child_height(&self, index: usize) -> f32;

    /// Position a child relative to the container origin.
    fn set_child_position(&mut self, index: usize, position: Point);

    /// Remove the width and position overrides of a child.
    fn clear_child_overrides(&mut self, index: usize);
}

/// The environment the engine is constructed in.
pub trait Host {
    type Container: Container;

    /// Find a container by selector in the host document.
    fn query_selector(&self, selector: &str) -> Option<Self::Container>;

    /// Subscribe to size-change notifications.
    fn subscribe_resize(&self, listener: ResizeListener) -> ResizeSubscription;
}

/// Scoped registration of a resize listener.
///
/// The release closure runs exactly once: on [`release`](Self::release) or
/// when the subscription is dropped, whichever comes first.
pub struct ResizeSubscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl ResizeSubscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Release the registration. Returns `false` if it was already released.
    pub fn release(&mut self) -> bool {
        match self.release.take() {
            Some(release) => {
                release();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ResizeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeSubscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_release_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut subscription = ResizeSubscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(subscription.is_active());
        assert!(subscription.release());
        assert!(!subscription.release());
        drop(subscription);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_releases() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        {
            let _subscription = ResizeSubscription::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_detached() {
        let mut subscription = ResizeSubscription::detached();
        assert!(!subscription.is_active());
        assert!(!subscription.release());
    }
}
