//! Drag state and drop-target ids.
//!
//! Drop targets are addressed by id shape: a plain folder id nests the
//! dragged folder inside that folder, `dropzone-<id>` (the thin zone above
//! a row) makes it a sibling of that folder, and `root-drop-area` moves it
//! to the top level.

use std::fmt;

use serde::{Deserialize, Serialize};

use rdm_core::types::FolderId;

/// Sentinel id of the top-level drop area.
pub const ROOT_DROP_AREA: &str = "root-drop-area";

/// Prefix of the sibling dropzone rendered above each folder row.
pub const DROPZONE_PREFIX: &str = "dropzone-";

/// A parsed drop-target id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropTarget {
    /// Drop directly onto a folder (nest as child).
    Folder(FolderId),
    /// Drop into the zone above a folder (become its sibling).
    Dropzone(FolderId),
    /// Drop onto the top-level area.
    Root,
}

impl DropTarget {
    /// Parse a raw target id exactly as given. Returns `None` for ids that
    /// cannot name a target.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        if raw == ROOT_DROP_AREA {
            return Some(Self::Root);
        }
        match raw.strip_prefix(DROPZONE_PREFIX) {
            Some("") => None,
            Some(folder) => Some(Self::Dropzone(FolderId::from(folder))),
            None => Some(Self::Folder(FolderId::from(raw))),
        }
    }

    /// The folder this target refers to, if any.
    pub fn folder(&self) -> Option<&FolderId> {
        match self {
            Self::Folder(id) | Self::Dropzone(id) => Some(id),
            Self::Root => None,
        }
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folder(id) => write!(f, "{id}"),
            Self::Dropzone(id) => write!(f, "{DROPZONE_PREFIX}{id}"),
            Self::Root => f.write_str(ROOT_DROP_AREA),
        }
    }
}

/// A completed drag gesture: what was dragged and what it was released over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    /// Id of the dragged folder.
    pub active_id: FolderId,
    /// Raw id of the target under the pointer, `None` when released over nothing.
    pub over_id: Option<String>,
}

impl DropEvent {
    pub fn new(active_id: impl Into<FolderId>, over_id: Option<&str>) -> Self {
        Self {
            active_id: active_id.into(),
            over_id: over_id.map(str::to_string),
        }
    }

    /// The parsed target, if the event has one.
    pub fn target(&self) -> Option<DropTarget> {
        self.over_id.as_deref().and_then(DropTarget::parse)
    }
}

/// Transient drag state: set on drag start, cleared on drop or cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    active_id: Option<FolderId>,
    hovered: Option<DropTarget>,
}

impl DragState {
    pub fn start(&mut self, id: FolderId) {
        self.active_id = Some(id);
        self.hovered = None;
    }

    /// Track the target under the pointer; ignored when nothing is dragged.
    pub fn hover(&mut self, target: Option<DropTarget>) {
        if self.active_id.is_some() {
            self.hovered = target;
        }
    }

    /// Clear the drag, returning the id that was being dragged.
    pub fn finish(&mut self) -> Option<FolderId> {
        self.hovered = None;
        self.active_id.take()
    }

    pub fn active_id(&self) -> Option<&FolderId> {
        self.active_id.as_ref()
    }

    pub fn hovered(&self) -> Option<&DropTarget> {
        self.hovered.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.active_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shapes() {
        assert_eq!(
            DropTarget::parse("abc"),
            Some(DropTarget::Folder(FolderId::from("abc")))
        );
        assert_eq!(
            DropTarget::parse("dropzone-abc"),
            Some(DropTarget::Dropzone(FolderId::from("abc")))
        );
        assert_eq!(DropTarget::parse("root-drop-area"), Some(DropTarget::Root));
        assert_eq!(DropTarget::parse(""), None);
        assert_eq!(DropTarget::parse("dropzone-"), None);
    }

    #[test]
    fn test_parse_keeps_whitespace() {
        assert_eq!(
            DropTarget::parse(" A "),
            Some(DropTarget::Folder(FolderId::from(" A ")))
        );
        assert_eq!(
            DropTarget::parse(" root-drop-area"),
            Some(DropTarget::Folder(FolderId::from(" root-drop-area")))
        );
    }

    #[test]
    fn test_display_matches_parse() {
        for raw in ["f1", "dropzone-f1", "root-drop-area"] {
            let target = DropTarget::parse(raw).expect("valid target");
            assert_eq!(target.to_string(), raw);
        }
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut drag = DragState::default();
        drag.hover(Some(DropTarget::Root));
        assert!(drag.hovered().is_none());

        drag.start(FolderId::from("a"));
        assert!(drag.is_dragging());
        drag.hover(Some(DropTarget::Root));
        assert_eq!(drag.hovered(), Some(&DropTarget::Root));

        assert_eq!(drag.finish(), Some(FolderId::from("a")));
        assert!(!drag.is_dragging());
        assert!(drag.hovered().is_none());
    }

    #[test]
    fn test_event_without_target() {
        let event = DropEvent::new("a", None);
        assert!(event.target().is_none());
    }
}
