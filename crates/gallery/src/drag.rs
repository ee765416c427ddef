//! Drag-and-drop and file input wiring.
//!
//! While files are dragged over the drop target the body carries the
//! `dragging` class. Dropped or selected files go to the uploader.

use crate::uploads::Uploader;
use dom::{Event, EventType, ListenerId, NodeId, Window};
use std::sync::{Arc, Weak};

/// Class set on the body during a drag.
pub const DRAGGING_CLASS: &str = "dragging";

/// Listen for drag events on `target`. Returns the listener ids.
pub fn install_drag_handlers(
    window: &Arc<Window>,
    target: NodeId,
    uploader: &Arc<Uploader>,
) -> Vec<ListenerId> {
    let mut ids = Vec::with_capacity(4);

    for (event_type, dragging) in [
        (EventType::DragEnter, true),
        (EventType::DragOver, true),
        (EventType::DragLeave, false),
    ] {
        let weak = Arc::downgrade(window);
        ids.push(window.add_node_listener(
            target,
            event_type,
            Arc::new(move |event: &mut Event| {
                event.stop_propagation();
                event.prevent_default();
                set_dragging(&weak, dragging);
            }),
        ));
    }

    let weak = Arc::downgrade(window);
    let drop_uploader = Arc::downgrade(uploader);
    ids.push(window.add_node_listener(
        target,
        EventType::Drop,
        Arc::new(move |event: &mut Event| {
            event.stop_propagation();
            event.prevent_default();
            if let Some(uploader) = drop_uploader.upgrade() {
                uploader.handle_files(event.files());
            }
            set_dragging(&weak, false);
        }),
    ));

    ids
}

/// Hand the files of `change` events on a file input to the uploader.
pub fn install_change_handler(
    window: &Arc<Window>,
    input: NodeId,
    uploader: &Arc<Uploader>,
) -> ListenerId {
    let uploader = Arc::downgrade(uploader);
    window.add_node_listener(
        input,
        EventType::Change,
        Arc::new(move |event: &mut Event| {
            if let Some(uploader) = uploader.upgrade() {
                uploader.handle_files(event.files());
            }
        }),
    )
}

fn set_dragging(window: &Weak<Window>, dragging: bool) {
    let Some(window) = window.upgrade() else {
        return;
    };
    let document = window.document();
    let mut document = document.write();
    let body = document.body();
    if dragging {
        document.add_class(body, DRAGGING_CLASS);
    } else {
        document.remove_class(body, DRAGGING_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{DomContainer, DomHost};
    use crate::notify::{RecordingNotifier, NO_FILE_FOUND, ONLY_IMAGES};
    use crate::test_support::png;
    use dom::File;
    use layout::{Masonry, MasonryConfig};

    fn setup() -> (Arc<Window>, Arc<Uploader>, Arc<RecordingNotifier>, NodeId) {
        let window = Arc::new(Window::new(800.0, 600.0));
        let (body, cards) = {
            let document = window.document();
            let mut document = document.write();
            let body = document.body();
            let cards = document.create_element_with_class("div", "cards");
            document.tree.append_child(body, cards);
            (body, cards)
        };
        let host = DomHost::new(window.clone());
        let masonry: Arc<Masonry<DomContainer>> =
            Arc::new(Masonry::new(&host, MasonryConfig::new(".cards")).unwrap());
        let notifier = Arc::new(RecordingNotifier::new());
        let uploader = Arc::new(Uploader::new(window.clone(), masonry, cards, notifier.clone()));
        install_drag_handlers(&window, body, &uploader);
        (window, uploader, notifier, body)
    }

    fn dragging(window: &Window) -> bool {
        let document = window.document();
        let document = document.read();
        document.has_class(document.body(), DRAGGING_CLASS)
    }

    #[test]
    fn test_dragging_class_toggles() {
        let (window, _, _, body) = setup();

        let mut enter = Event::new(EventType::DragEnter);
        assert!(!window.dispatch_event(body, &mut enter));
        assert!(enter.propagation_stopped);
        assert!(dragging(&window));

        window.dispatch_event(body, &mut Event::new(EventType::DragOver));
        assert!(dragging(&window));

        window.dispatch_event(body, &mut Event::new(EventType::DragLeave));
        assert!(!dragging(&window));
    }

    #[test]
    fn test_drop_hands_files_over() {
        let (window, uploader, notifier, body) = setup();
        window.dispatch_event(body, &mut Event::new(EventType::DragEnter));

        let files = vec![
            File::new("readme.md", "text/markdown", b"# hi".to_vec()),
            File::new("photo.png", "image/png", png(3, 3)),
        ];
        let mut drop = Event::with_files(EventType::Drop, files);
        assert!(!window.dispatch_event(body, &mut drop));

        assert!(!dragging(&window));
        assert_eq!(uploader.pending(), 1);
        assert_eq!(notifier.messages(), vec![ONLY_IMAGES]);
    }

    #[test]
    fn test_drop_without_payload() {
        let (window, uploader, notifier, body) = setup();
        window.dispatch_event(body, &mut Event::new(EventType::Drop));
        assert_eq!(uploader.pending(), 0);
        assert_eq!(notifier.messages(), vec![NO_FILE_FOUND]);
    }

    #[test]
    fn test_change_on_input() {
        let (window, uploader, notifier, body) = setup();
        let input = {
            let document = window.document();
            let mut document = document.write();
            let input = document.create_element("input");
            document.tree.append_child(body, input);
            input
        };
        install_change_handler(&window, input, &uploader);

        let mut change = Event::with_files(
            EventType::Change,
            vec![File::new("a.png", "image/png", png(1, 1))],
        );
        window.dispatch_event(input, &mut change);
        assert_eq!(uploader.pending(), 1);
        assert!(notifier.messages().is_empty());
    }
}
