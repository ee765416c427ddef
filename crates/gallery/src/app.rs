//! Gallery page.
//!
//! Builds `main > .cards` with the leading add card, then creates the
//! single masonry engine and hands it to the uploader, the caption editor
//! and the resize binding.

use crate::binding::{DomContainer, DomHost};
use crate::caption::CaptionEditor;
use crate::card::AddCard;
use crate::config::GalleryConfig;
use crate::drag::{install_change_handler, install_drag_handlers};
use crate::notify::Notifier;
use crate::uploads::{UploadReport, Uploader};
use common::{GalleryError, GalleryResult};
use dom::{Event, EventType, File, NodeId, Window};
use layout::{LayoutSnapshot, Masonry, MasonryConfig};
use std::sync::Arc;
use tracing::info;

/// A gallery page with its layout engine.
pub struct Gallery {
    window: Arc<Window>,
    masonry: Arc<Masonry<DomContainer>>,
    uploader: Arc<Uploader>,
    captions: Arc<CaptionEditor>,
    cards: NodeId,
    add_card: AddCard,
}

impl Gallery {
    /// Build the page and its engine.
    pub fn new(config: &GalleryConfig, notifier: Arc<dyn Notifier>) -> GalleryResult<Self> {
        let window = Arc::new(Window::new(config.viewport.width, config.viewport.height));
        let add_card = build_page(&window);

        let host = DomHost::new(window.clone());
        let masonry_config =
            MasonryConfig::new(config.container.as_str()).with_options(config.options.clone());
        let masonry = Arc::new(Masonry::new(&host, masonry_config)?);

        let cards = window
            .document()
            .read()
            .query_selector(&config.container)?
            .ok_or_else(|| GalleryError::not_found(config.container.clone()))?;

        let captions = CaptionEditor::new(window.clone(), masonry.clone());
        let uploader = Arc::new(
            Uploader::new(window.clone(), masonry.clone(), cards, notifier)
                .with_captions(captions.clone()),
        );

        let body = window.document().read().body();
        install_drag_handlers(&window, body, &uploader);
        install_change_handler(&window, add_card.input, &uploader);

        info!(
            width = config.viewport.width,
            height = config.viewport.height,
            container = %config.container,
            "gallery ready"
        );

        Ok(Self {
            window,
            masonry,
            uploader,
            captions,
            cards,
            add_card,
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn masonry(&self) -> &Arc<Masonry<DomContainer>> {
        &self.masonry
    }

    pub fn uploader(&self) -> &Arc<Uploader> {
        &self.uploader
    }

    /// Drag `files` onto the page and drop them. `None` drops nothing.
    pub fn drop_files(&self, files: Option<Vec<File>>) {
        let body = self.window.document().read().body();
        self.window
            .dispatch_event(body, &mut Event::new(EventType::DragEnter));
        let mut drop = match files {
            Some(files) => Event::with_files(EventType::Drop, files),
            None => Event::new(EventType::Drop),
        };
        self.window.dispatch_event(body, &mut drop);
    }

    /// Pick `files` with the add card's file input.
    pub fn select_files(&self, files: Vec<File>) {
        let mut change = Event::with_files(EventType::Change, files);
        self.window.dispatch_event(self.add_card.input, &mut change);
    }

    /// Upload files without going through an event.
    pub fn upload(&self, files: &[File]) -> UploadReport {
        self.uploader.handle_files(Some(files))
    }

    /// Finish every pending image load.
    pub fn complete_loads(&self) -> usize {
        self.uploader.complete_loads()
    }

    /// Resize the viewport.
    pub fn resize(&self, width: f32, height: f32) -> bool {
        self.window.resize_to(width, height)
    }

    /// Image cards, in container order.
    pub fn cards(&self) -> Vec<NodeId> {
        let document = self.window.document();
        let document = document.read();
        document
            .tree
            .element_children(self.cards)
            .into_iter()
            .filter(|&node| node != self.add_card.root)
            .collect()
    }

    /// Caption textarea of an image card.
    pub fn caption_of(&self, card: NodeId) -> Option<NodeId> {
        let document = self.window.document();
        let document = document.read();
        document
            .tree
            .descendants(card)
            .into_iter()
            .find(|&node| {
                document
                    .tree
                    .get_element(node)
                    .is_some_and(|e| e.tag_name == "textarea")
            })
    }

    /// Type `text` into the caption of `card`.
    pub fn edit_caption(&self, card: NodeId, text: &str) -> GalleryResult<()> {
        let caption = self
            .caption_of(card)
            .ok_or_else(|| GalleryError::not_found("card caption"))?;
        self.captions.edit(caption, text);
        Ok(())
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        self.masonry.snapshot()
    }

    /// Tear down the layout engine.
    pub fn destroy(&self) {
        self.masonry.destroy();
    }
}

/// `body > main > div.cards > div.card.add`
fn build_page(window: &Window) -> AddCard {
    let document = window.document();
    let mut document = document.write();
    let body = document.body();
    let main = document.create_element("main");
    let cards = document.create_element_with_class("div", "cards");
    let add_card = AddCard::build(&mut document);
    document.tree.append_child(body, main);
    document.tree.append_child(main, cards);
    document.tree.append_child(cards, add_card.root);
    add_card
}
