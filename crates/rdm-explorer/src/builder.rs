//! Flat parent-pointer list to nested folder tree.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use rdm_entity::folder::{FolderNode, FolderRecord, FolderTree};

/// Builds a folder forest from the server's flat list.
///
/// Input order is arbitrary (parents need not precede children). Roots and
/// children keep input order. A node whose `parent_id` names no folder in
/// the list is promoted to root, so every record appears exactly once.
///
/// Two malformed inputs are tolerated: duplicate ids keep their first
/// occurrence, and parent cycles are cut by promoting one member of each
/// cycle to root.
pub fn build_tree(records: &[FolderRecord]) -> FolderTree {
    // Pass 1: id -> slot, first occurrence wins.
    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut nodes: Vec<&FolderRecord> = Vec::with_capacity(records.len());
    for record in records {
        if slots.contains_key(record.id.as_str()) {
            warn!(folder_id = %record.id, "Duplicate folder id in list, keeping first occurrence");
            continue;
        }
        slots.insert(record.id.as_str(), nodes.len());
        nodes.push(record);
    }

    // Pass 2: attach each node to its parent or to the root list.
    let count = nodes.len();
    let mut parent_of: Vec<Option<usize>> = vec![None; count];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut roots: Vec<usize> = Vec::new();

    for (slot, record) in nodes.iter().enumerate() {
        let parent = record
            .parent_id
            .as_ref()
            .and_then(|parent_id| slots.get(parent_id.as_str()).copied());

        match parent {
            Some(parent) => {
                parent_of[slot] = Some(parent);
                children[parent].push(slot);
            }
            None => {
                if let Some(parent_id) = &record.parent_id {
                    debug!(
                        folder_id = %record.id,
                        parent_id = %parent_id,
                        "Dangling parent reference, promoting folder to root"
                    );
                }
                roots.push(slot);
            }
        }
    }

    // Anything not reachable from a root sits on or under a cycle.
    let mut reached = vec![false; count];
    mark_reachable(&roots, &children, &mut reached);

    for slot in 0..count {
        if reached[slot] {
            continue;
        }

        let mut seen = HashSet::new();
        let mut cursor = slot;
        while seen.insert(cursor) {
            match parent_of[cursor] {
                Some(parent) => cursor = parent,
                None => break,
            }
        }

        warn!(
            folder_id = %nodes[cursor].id,
            "Folder list contains a parent cycle, promoting folder to root"
        );

        if let Some(parent) = parent_of[cursor].take() {
            children[parent].retain(|&child| child != cursor);
        }
        roots.push(cursor);
        mark_reachable(&[cursor], &children, &mut reached);
    }

    FolderTree::from_roots(assemble(&roots, &nodes, &children))
}

fn mark_reachable(start: &[usize], children: &[Vec<usize>], reached: &mut [bool]) {
    let mut stack: Vec<usize> = start.to_vec();
    while let Some(slot) = stack.pop() {
        if reached[slot] {
            continue;
        }
        reached[slot] = true;
        stack.extend(children[slot].iter().copied());
    }
}

/// Builds nodes children-first so nesting depth never reaches the call stack.
fn assemble(roots: &[usize], nodes: &[&FolderRecord], children: &[Vec<usize>]) -> Vec<FolderNode> {
    let mut preorder = Vec::with_capacity(nodes.len());
    let mut stack: Vec<usize> = roots.to_vec();
    while let Some(slot) = stack.pop() {
        preorder.push(slot);
        stack.extend(children[slot].iter().copied());
    }

    let mut built: Vec<Option<FolderNode>> = (0..nodes.len()).map(|_| None).collect();
    for &slot in preorder.iter().rev() {
        let mut node = FolderNode::from_record(nodes[slot]);
        node.children = children[slot]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[slot] = Some(node);
    }

    roots.iter().filter_map(|&slot| built[slot].take()).collect()
}
