//! Row projection and plain-text rendering.

use std::fmt::Write as _;

use serde::Serialize;

use rdm_core::types::FolderId;
use rdm_entity::folder::{FolderNode, FolderTree};

use crate::drag::DropTarget;
use crate::expansion::ExpansionSet;

/// How a row is highlighted while a drag hovers over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DropHighlight {
    #[default]
    None,
    /// The dragged folder would be nested inside this row.
    Inside,
    /// The dragged folder would become a sibling placed above this row.
    Above,
}

/// One rendered line of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleRow {
    pub id: FolderId,
    pub name: String,
    pub depth: usize,
    pub file_count: u64,
    /// Whether the row shows an expand affordance.
    pub has_children: bool,
    pub expanded: bool,
    pub selected: bool,
    pub editing: bool,
    pub drop_highlight: DropHighlight,
}

/// Flatten the tree depth-first, descending only into expanded folders.
pub fn visible_rows(
    tree: &FolderTree,
    expansion: &ExpansionSet,
    selected: Option<&FolderId>,
    editing: Option<&FolderId>,
    hovered: Option<&DropTarget>,
) -> Vec<VisibleRow> {
    let mut rows = Vec::new();
    let mut stack: Vec<(&FolderNode, usize)> = tree.roots.iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        let expanded = node.has_children() && expansion.is_expanded(node.id.as_str());
        let drop_highlight = match hovered {
            Some(DropTarget::Folder(id)) if *id == node.id => DropHighlight::Inside,
            Some(DropTarget::Dropzone(id)) if *id == node.id => DropHighlight::Above,
            _ => DropHighlight::None,
        };

        rows.push(VisibleRow {
            id: node.id.clone(),
            name: node.name.clone(),
            depth,
            file_count: node.file_count,
            has_children: node.has_children(),
            expanded,
            selected: selected == Some(&node.id),
            editing: editing == Some(&node.id),
            drop_highlight,
        });

        if expanded {
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
    }

    rows
}

/// Options for [`render_text`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Spaces per level.
    pub indent_width: usize,
    /// Append each folder's id.
    pub show_ids: bool,
    /// Text shown in place of the name of the row being edited.
    pub draft: Option<String>,
    /// Draw the top-level drop area line (while dragging).
    pub root_drop_area: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            show_ids: false,
            draft: None,
            root_drop_area: false,
        }
    }
}

/// Render rows as an indented text tree.
pub fn render_text(rows: &[VisibleRow], options: &RenderOptions) -> String {
    let mut out = String::new();

    if rows.is_empty() {
        out.push_str("(no folders)\n");
    }

    for row in rows {
        let indent = " ".repeat(row.depth * options.indent_width);

        if row.drop_highlight == DropHighlight::Above {
            let _ = writeln!(out, "{indent}┈┈┈┈┈┈┈┈");
        }

        let affordance = match (row.has_children, row.expanded) {
            (false, _) => " ",
            (true, true) => "▾",
            (true, false) => "▸",
        };

        let label = match (&options.draft, row.editing) {
            (Some(draft), true) => format!("[{draft}]"),
            _ => row.name.clone(),
        };

        let _ = write!(out, "{indent}{affordance} {label}");
        if row.file_count > 0 {
            let _ = write!(out, " ({})", row.file_count);
        }
        if options.show_ids {
            let _ = write!(out, "  #{}", row.id);
        }
        if row.selected {
            out.push_str("  ◀");
        }
        if row.drop_highlight == DropHighlight::Inside {
            out.push_str("  ⇐ drop inside");
        }
        out.push('\n');
    }

    if options.root_drop_area {
        out.push_str("┈┈ root-drop-area ┈┈\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_tree;
    use rdm_entity::folder::FolderRecord;

    fn tree() -> FolderTree {
        build_tree(&[
            FolderRecord::new("a", "Alpha", None),
            FolderRecord::new("b", "Beta", Some("a")),
            FolderRecord::new("c", "Gamma", Some("b")),
            FolderRecord::new("d", "Delta", None),
        ])
    }

    #[test]
    fn test_collapsed_shows_roots_only() {
        let rows = visible_rows(&tree(), &ExpansionSet::new(), None, None, None);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);
        assert!(rows[0].has_children);
        assert!(!rows[0].expanded);
        assert!(!rows[1].has_children);
    }

    #[test]
    fn test_expanded_descends() {
        let mut expansion = ExpansionSet::new();
        expansion.expand(&FolderId::from("a"));
        let rows = visible_rows(&tree(), &expansion, None, None, None);
        let ids: Vec<(&str, usize)> = rows.iter().map(|r| (r.id.as_str(), r.depth)).collect();
        assert_eq!(ids, vec![("a", 0), ("b", 1), ("d", 0)]);
    }

    #[test]
    fn test_leaf_in_expansion_set_is_not_expanded() {
        let mut expansion = ExpansionSet::new();
        expansion.expand(&FolderId::from("d"));
        let rows = visible_rows(&tree(), &expansion, None, None, None);
        assert!(!rows[1].expanded);
    }

    #[test]
    fn test_flags_and_highlight() {
        let selected = FolderId::from("d");
        let hovered = DropTarget::Dropzone(FolderId::from("a"));
        let rows = visible_rows(
            &tree(),
            &ExpansionSet::new(),
            Some(&selected),
            Some(&FolderId::from("a")),
            Some(&hovered),
        );
        assert!(rows[0].editing);
        assert_eq!(rows[0].drop_highlight, DropHighlight::Above);
        assert!(rows[1].selected);
    }

    #[test]
    fn test_render_text() {
        let mut expansion = ExpansionSet::new();
        expansion.expand(&FolderId::from("a"));
        let selected = FolderId::from("b");
        let rows = visible_rows(&tree(), &expansion, Some(&selected), None, None);
        let text = render_text(&rows, &RenderOptions::default());
        assert_eq!(text, "▾ Alpha\n  ▸ Beta  ◀\n  Delta\n");
    }

    #[test]
    fn test_render_empty() {
        let text = render_text(&[], &RenderOptions::default());
        assert_eq!(text, "(no folders)\n");
    }
}
