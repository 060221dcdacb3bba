//! Flat entry list to linked tree.
//!
//! Two passes: sort every node once by the display key, then link each node
//! to its parent in that order. Sibling order is therefore the global sort
//! order restricted to one parent, independent of transmission order, and no
//! insertion point is ever searched for.

use std::collections::{HashMap, HashSet};

use super::node::{parent_path, NodeId, TreeNode};
use super::FileTree;
use crate::codec::FileEntry;
use crate::error::{Result, SessionError};

/// Build a tree from one snapshot's entries.
///
/// Fails with `DuplicatePath` if two entries share a path (or an entry has
/// an empty path) or would land under one directory with the same name, and
/// with `OrphanEntry` if a parent directory is missing.
///
/// # Example
///
/// ```
/// use editor_session::codec::FileEntry;
/// use editor_session::tree::build_tree;
///
/// let tree = build_tree(&[
///     FileEntry::file(1, "b.txt"),
///     FileEntry::directory(2, "a"),
/// ])
/// .unwrap();
///
/// let names: Vec<_> = tree.children(tree.root_id()).map(|n| n.name()).collect();
/// assert_eq!(names, ["a", "b.txt"]);
/// ```
pub fn build_tree(entries: &[FileEntry]) -> Result<FileTree> {
    let mut nodes: Vec<TreeNode> = entries
        .iter()
        .map(|entry| TreeNode {
            path: entry.path.trim_end_matches('/').to_string(),
            entry_id: Some(entry.id),
            is_directory: entry.is_directory,
            parent: None,
            children: Vec::new(),
        })
        .collect();

    // Directories first, then case-insensitive path, then exact path.
    nodes.sort_by_cached_key(|node| (!node.is_directory, node.path.to_lowercase(), node.path.clone()));
    nodes.insert(0, TreeNode::root());

    let mut by_path: HashMap<String, NodeId> = HashMap::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        if by_path.insert(node.path.clone(), NodeId(index)).is_some() {
            return Err(SessionError::DuplicatePath(node.path.clone()));
        }
    }

    let folded = fold_directories(&nodes);

    // Sibling names stay unique even when a parent was found by case folding
    let mut linked: HashSet<(NodeId, String)> = HashSet::with_capacity(nodes.len());
    for index in 1..nodes.len() {
        let parent_id = resolve_parent(&nodes, &by_path, &folded, &nodes[index].path)?;
        if !linked.insert((parent_id, nodes[index].name().to_string())) {
            return Err(SessionError::DuplicatePath(nodes[index].path.clone()));
        }
        nodes[index].parent = Some(parent_id);
        nodes[parent_id.0].children.push(NodeId(index));
    }

    Ok(FileTree { nodes, by_path })
}

/// Lowercased directory path to every directory with that spelling.
fn fold_directories(nodes: &[TreeNode]) -> HashMap<String, Vec<NodeId>> {
    let mut folded: HashMap<String, Vec<NodeId>> = HashMap::new();
    for (index, node) in nodes.iter().enumerate().skip(1) {
        if node.is_directory {
            folded
                .entry(node.path.to_lowercase())
                .or_default()
                .push(NodeId(index));
        }
    }
    folded
}

/// Exact directory match first; otherwise a single case-insensitive match.
fn resolve_parent(
    nodes: &[TreeNode],
    by_path: &HashMap<String, NodeId>,
    folded: &HashMap<String, Vec<NodeId>>,
    path: &str,
) -> Result<NodeId> {
    let parent = parent_path(path);

    if let Some(&id) = by_path.get(parent) {
        if nodes[id.0].is_directory {
            return Ok(id);
        }
    } else if let Some([id]) = folded.get(&parent.to_lowercase()).map(Vec::as_slice) {
        tracing::debug!("Entry {:?} linked to {:?} by case-insensitive match", path, nodes[id.0].path);
        return Ok(*id);
    }

    Err(SessionError::OrphanEntry {
        path: path.to_string(),
        parent: parent.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tree: &FileTree, id: NodeId) -> Vec<String> {
        tree.children(id).map(|n| n.name().to_string()).collect()
    }

    #[test]
    fn test_empty_entries_root_only() {
        let tree = build_tree(&[]).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.root().children().is_empty());
    }

    #[test]
    fn test_directories_before_files_case_insensitive() {
        let entries = [
            FileEntry::file(1, "b.txt"),
            FileEntry::directory(2, "a"),
            FileEntry::file(3, "a/z.txt"),
            FileEntry::file(4, "A/y.txt"),
        ];
        let tree = build_tree(&entries).unwrap();

        assert_eq!(names(&tree, NodeId::ROOT), ["a", "b.txt"]);
        let a = tree.find("a").unwrap();
        assert_eq!(names(&tree, a), ["y.txt", "z.txt"]);
    }

    #[test]
    fn test_ordering_independent_of_input_order() {
        let mut entries = vec![
            FileEntry::file(1, "b.txt"),
            FileEntry::directory(2, "a"),
            FileEntry::file(3, "a/z.txt"),
            FileEntry::file(4, "a/Y.txt"),
            FileEntry::directory(5, "a/sub"),
            FileEntry::file(6, "README"),
            FileEntry::directory(7, "Docs"),
        ];
        let expected = build_tree(&entries).unwrap();
        let expected: Vec<_> = expected.walk().map(|(d, n)| (d, n.path().to_string())).collect();

        entries.reverse();
        let reversed = build_tree(&entries).unwrap();
        let reversed: Vec<_> = reversed.walk().map(|(d, n)| (d, n.path().to_string())).collect();
        assert_eq!(expected, reversed);

        entries.rotate_left(3);
        let rotated = build_tree(&entries).unwrap();
        let rotated: Vec<_> = rotated.walk().map(|(d, n)| (d, n.path().to_string())).collect();
        assert_eq!(expected, rotated);
    }

    #[test]
    fn test_case_sensitive_tie_break() {
        let entries = [FileEntry::file(1, "readme"), FileEntry::file(2, "README")];
        let tree = build_tree(&entries).unwrap();
        // Uppercase sorts before lowercase in byte order
        assert_eq!(names(&tree, NodeId::ROOT), ["README", "readme"]);
    }

    #[test]
    fn test_parent_links() {
        let entries = [
            FileEntry::directory(1, "src"),
            FileEntry::directory(2, "src/net"),
            FileEntry::file(3, "src/net/ws.rs"),
        ];
        let tree = build_tree(&entries).unwrap();

        let ws = tree.find("src/net/ws.rs").unwrap();
        let net = tree.parent(ws).unwrap();
        assert_eq!(tree.get(net).path(), "src/net");
        let src = tree.parent(net).unwrap();
        assert_eq!(tree.get(src).path(), "src");
        assert_eq!(tree.parent(src), Some(NodeId::ROOT));
        assert_eq!(tree.parent(NodeId::ROOT), None);
    }

    #[test]
    fn test_orphan_entry() {
        let entries = [FileEntry::file(1, "x/y.txt")];
        let err = build_tree(&entries).unwrap_err();
        match err {
            SessionError::OrphanEntry { path, parent } => {
                assert_eq!(path, "x/y.txt");
                assert_eq!(parent, "x");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_file_cannot_be_parent() {
        let entries = [FileEntry::file(1, "x"), FileEntry::file(2, "x/y.txt")];
        assert!(matches!(
            build_tree(&entries),
            Err(SessionError::OrphanEntry { .. })
        ));
    }

    #[test]
    fn test_duplicate_path() {
        let entries = [FileEntry::file(1, "a.txt"), FileEntry::file(2, "a.txt")];
        assert!(matches!(
            build_tree(&entries),
            Err(SessionError::DuplicatePath(p)) if p == "a.txt"
        ));
    }

    #[test]
    fn test_duplicate_path_across_kinds() {
        let entries = [FileEntry::directory(1, "a"), FileEntry::file(2, "a")];
        assert!(matches!(
            build_tree(&entries),
            Err(SessionError::DuplicatePath(_))
        ));
    }

    #[test]
    fn test_empty_path_collides_with_root() {
        let entries = [FileEntry::file(1, "")];
        assert!(matches!(
            build_tree(&entries),
            Err(SessionError::DuplicatePath(p)) if p.is_empty()
        ));
    }

    #[test]
    fn test_ambiguous_case_fold_is_orphan() {
        let entries = [
            FileEntry::directory(1, "ab"),
            FileEntry::directory(2, "AB"),
            FileEntry::file(3, "ab/x"),
            FileEntry::file(4, "AB/y"),
            FileEntry::file(5, "Ab/z"),
        ];
        assert!(matches!(
            build_tree(&entries),
            Err(SessionError::OrphanEntry { path, .. }) if path == "Ab/z"
        ));
    }

    #[test]
    fn test_case_fold_sibling_name_clash() {
        let entries = [
            FileEntry::directory(1, "a"),
            FileEntry::file(2, "a/y.txt"),
            FileEntry::file(3, "A/y.txt"),
        ];
        // "A/y.txt" sorts first and takes the name; the exact path clashes
        assert!(matches!(
            build_tree(&entries),
            Err(SessionError::DuplicatePath(p)) if p == "a/y.txt"
        ));
    }

    #[test]
    fn test_case_fold_distinct_names_link() {
        let entries = [
            FileEntry::directory(1, "a"),
            FileEntry::file(2, "a/Y.txt"),
            FileEntry::file(3, "A/y.txt"),
        ];
        let tree = build_tree(&entries).unwrap();
        let a = tree.find("a").unwrap();
        assert_eq!(names(&tree, a), ["y.txt", "Y.txt"]);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let entries = [FileEntry::directory(1, "a/"), FileEntry::file(2, "a/b")];
        let tree = build_tree(&entries).unwrap();
        let a = tree.find("a").unwrap();
        assert_eq!(names(&tree, a), ["b"]);
    }

    #[test]
    fn test_entry_ids_preserved() {
        let entries = [FileEntry::directory(10, "d"), FileEntry::file(20, "d/f")];
        let tree = build_tree(&entries).unwrap();
        let f = tree.find_by_entry_id(20).unwrap();
        assert_eq!(tree.get(f).path(), "d/f");
        assert_eq!(tree.get(f).entry_id(), Some(20));
    }
}
