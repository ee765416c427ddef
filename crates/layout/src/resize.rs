//! Resize handling.
//!
//! The controller holds the engine's single resize subscription. Every
//! notification re-measures the container; only an actual width change
//! triggers a layout pass, and there is no throttling.

use crate::host::{Host, ResizeSubscription};
use std::sync::Arc;
use tracing::debug;

/// Owns the resize subscription of one engine.
#[derive(Debug)]
pub struct ResizeController {
    subscription: Option<ResizeSubscription>,
}

impl ResizeController {
    /// Subscribe `on_resize` to the host's size-change notifications.
    pub fn attach<H, F>(host: &H, on_resize: F) -> Self
    where
        H: Host,
        F: Fn() + Send + Sync + 'static,
    {
        let subscription = host.subscribe_resize(Arc::new(on_resize));
        debug!("resize listener attached");
        Self {
            subscription: Some(subscription),
        }
    }

    /// Release the subscription. Returns `false` when already detached.
    pub fn detach(&mut self) -> bool {
        match self.subscription.take() {
            Some(mut subscription) => {
                let released = subscription.release();
                debug!("resize listener detached");
                released
            }
            None => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.as_ref().is_some_and(|s| s.is_active())
    }
}

/// Whether a notification carries an actual width change.
///
/// Some mobile browsers fire resize events while scrolling without any
/// change in width.
#[inline]
pub fn width_changed(previous: f32, measured: f32) -> bool {
    previous != measured
}
