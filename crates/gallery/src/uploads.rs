//! Upload surface.
//!
//! Turns user-supplied files into image cards. Each accepted file gets a
//! detached card right away; the card joins the container, after its first
//! child, once the image has loaded, and the layout is then recomputed.

use crate::binding::DomContainer;
use crate::caption::CaptionEditor;
use crate::card::Card;
use crate::image_loader;
use crate::notify::{Notifier, NO_FILE_FOUND, ONLY_IMAGES};
use dom::{Event, EventType, File, ListenerId, NodeId, Window};
use layout::Masonry;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

/// Outcome of one batch of files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UploadReport {
    /// Files that became cards.
    pub accepted: usize,
    /// Files skipped for not being images.
    pub rejected: usize,
}

/// An image waiting to load.
struct PendingImage {
    card: Card,
    name: String,
    bytes: Arc<[u8]>,
    listeners: [ListenerId; 2],
}

#[derive(Default)]
struct UploadState {
    icon_count: u32,
    pending: VecDeque<PendingImage>,
}

/// Creates cards from files and feeds them to the layout.
pub struct Uploader {
    window: Arc<Window>,
    masonry: Arc<Masonry<DomContainer>>,
    container: NodeId,
    notifier: Arc<dyn Notifier>,
    captions: Option<Arc<CaptionEditor>>,
    state: Mutex<UploadState>,
}

impl Uploader {
    pub fn new(
        window: Arc<Window>,
        masonry: Arc<Masonry<DomContainer>>,
        container: NodeId,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            window,
            masonry,
            container,
            notifier,
            captions: None,
            state: Mutex::new(UploadState::default()),
        }
    }

    /// Make the captions of new cards auto-grow.
    pub fn with_captions(mut self, captions: Arc<CaptionEditor>) -> Self {
        self.captions = Some(captions);
        self
    }

    /// Accept a batch of files. `None` means the gesture carried no file
    /// list at all.
    pub fn handle_files(self: &Arc<Self>, files: Option<&[File]>) -> UploadReport {
        let files = match files {
            Some(files) if !files.is_empty() => files,
            _ => {
                self.notifier.notify(NO_FILE_FOUND);
                return UploadReport::default();
            }
        };

        let mut report = UploadReport::default();
        for file in files {
            let mime_type = image_loader::mime_type(file);
            if !mime_type.starts_with("image/") {
                warn!(file = %file.name, mime_type = %mime_type, "skipping non-image file");
                report.rejected += 1;
                continue;
            }
            self.queue(file);
            report.accepted += 1;
        }

        // One notice per batch.
        if report.rejected > 0 {
            self.notifier.notify(ONLY_IMAGES);
        }

        info!(accepted = report.accepted, rejected = report.rejected, "files handled");
        report
    }

    fn queue(self: &Arc<Self>, file: &File) {
        let alt = {
            let mut state = self.state.lock();
            state.icon_count += 1;
            format!("Uploaded icon #{}", state.icon_count)
        };

        let card = Card::build(&mut self.window.document().write(), &alt);

        let uploader: Weak<Self> = Arc::downgrade(self);
        let on_load = self.window.add_node_listener(
            card.image,
            EventType::Load,
            Arc::new(move |_: &mut Event| {
                if let Some(uploader) = uploader.upgrade() {
                    uploader.attach_card(card);
                }
            }),
        );
        let uploader: Weak<Self> = Arc::downgrade(self);
        let name = file.name.clone();
        let on_error = self.window.add_node_listener(
            card.image,
            EventType::Error,
            Arc::new(move |_: &mut Event| {
                if let Some(uploader) = uploader.upgrade() {
                    uploader.discard_card(card, &name);
                }
            }),
        );

        debug!(file = %file.name, alt = %alt, "image queued");
        self.state.lock().pending.push_back(PendingImage {
            card,
            name: file.name.clone(),
            bytes: file.bytes.clone(),
            listeners: [on_load, on_error],
        });
    }

    /// Number of images still loading.
    pub fn pending(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Decode every queued image, firing `load` or `error` on each.
    /// Returns the number of cards added.
    pub fn complete_loads(&self) -> usize {
        let mut loaded = 0;
        loop {
            let Some(pending) = self.state.lock().pending.pop_front() else {
                break;
            };
            let mut event = match image_loader::natural_size(&pending.bytes) {
                Ok(size) => {
                    self.window
                        .document()
                        .write()
                        .set_natural_size(pending.card.image, size);
                    loaded += 1;
                    Event::new(EventType::Load)
                }
                Err(e) => {
                    warn!(file = %pending.name, error = %e, "image failed to load");
                    Event::new(EventType::Error)
                }
            };
            self.window.dispatch_event(pending.card.image, &mut event);
            for id in pending.listeners {
                self.window.remove_event_listener(id);
            }
        }
        loaded
    }

    fn attach_card(&self, card: Card) {
        {
            let document = self.window.document();
            let mut document = document.write();
            match document.tree.element_children(self.container).first() {
                Some(&first) => document.tree.insert_after(first, card.root),
                None => document.tree.append_child(self.container, card.root),
            }
        }
        if let Some(captions) = &self.captions {
            captions.attach(card.caption);
        }
        self.masonry.layout();
    }

    fn discard_card(&self, card: Card, name: &str) {
        self.window.document().write().tree.remove(card.root);
        self.notifier.notify(&format!("Could not load {name}"));
    }
}
