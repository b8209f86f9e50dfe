//! Read-only helpers over a built node tree
//!
//! All walks are depth-first and pre-order, visiting siblings in order.
//! Top-level nodes are at depth 0.

use crate::models::{plain_text, BlockKind, Node};
use std::collections::BTreeMap;

/// Visit every node with its depth and parent
pub fn walk<'a, F>(nodes: &'a [Node], visit: &mut F)
where
    F: FnMut(&'a Node, usize, Option<&'a Node>),
{
    walk_from(nodes, 0, None, visit);
}

fn walk_from<'a, F>(nodes: &'a [Node], depth: usize, parent: Option<&'a Node>, visit: &mut F)
where
    F: FnMut(&'a Node, usize, Option<&'a Node>),
{
    for node in nodes {
        visit(node, depth, parent);
        walk_from(node.children(), depth + 1, Some(node), visit);
    }
}

pub fn find_node_by_id<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    nodes.iter().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            find_node_by_id(node.children(), id)
        }
    })
}

pub fn filter_by_kind(nodes: &[Node], kind: BlockKind) -> Vec<&Node> {
    let mut found = Vec::new();
    walk(nodes, &mut |node, _, _| {
        if node.kind() == kind {
            found.push(node);
        }
    });
    found
}

pub fn nodes_at_depth(nodes: &[Node], depth: usize) -> Vec<&Node> {
    let mut found = Vec::new();
    walk(nodes, &mut |node, node_depth, _| {
        if node_depth == depth {
            found.push(node);
        }
    });
    found
}

/// Parent of the node with `id`; `None` for top-level or unknown ids
pub fn find_parent<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    nodes.iter().find_map(|node| {
        if node.children().iter().any(|child| child.id == id) {
            Some(node)
        } else {
            find_parent(node.children(), id)
        }
    })
}

/// Every node below `node`, pre-order
pub fn descendants(node: &Node) -> Vec<&Node> {
    let mut found = Vec::new();
    walk(node.children(), &mut |child, _, _| found.push(child));
    found
}

pub fn count_nodes(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + count_nodes(node.children()))
        .sum()
}

/// Depth of the deepest node (0 for a flat or empty tree)
pub fn tree_depth(nodes: &[Node]) -> usize {
    let mut deepest = 0;
    walk(nodes, &mut |_, depth, _| deepest = deepest.max(depth));
    deepest
}

/// Rebuild the tree, applying `mapper` to each node before its children
pub fn map_nodes<F>(nodes: Vec<Node>, mapper: &mut F) -> Vec<Node>
where
    F: FnMut(Node, usize) -> Node,
{
    map_from(nodes, 0, mapper)
}

fn map_from<F>(nodes: Vec<Node>, depth: usize, mapper: &mut F) -> Vec<Node>
where
    F: FnMut(Node, usize) -> Node,
{
    nodes
        .into_iter()
        .map(|node| {
            let mut mapped = mapper(node, depth);
            if let Some(children) = mapped.children.take() {
                mapped.set_children(map_from(children, depth + 1, mapper));
            }
            mapped
        })
        .collect()
}

/// Plain text of a node followed by its children's, space separated
pub fn extract_text(node: &Node) -> String {
    let own = node
        .properties
        .rich_text()
        .map(plain_text)
        .unwrap_or_default();

    let children: Vec<String> = node
        .children()
        .iter()
        .map(extract_text)
        .filter(|text| !text.is_empty())
        .collect();

    match (own.is_empty(), children.is_empty()) {
        (_, true) => own,
        (true, false) => children.join(" "),
        (false, false) => format!("{} {}", own, children.join(" ")),
    }
}

/// Node count per kind
pub fn kind_stats(nodes: &[Node]) -> BTreeMap<BlockKind, usize> {
    let mut stats = BTreeMap::new();
    walk(nodes, &mut |node, _, _| {
        *stats.entry(node.kind()).or_insert(0) += 1;
    });
    stats
}

/// Other nodes sharing the parent of `id` (or the top level)
pub fn siblings<'a>(nodes: &'a [Node], id: &str) -> Vec<&'a Node> {
    let level = match find_parent(nodes, id) {
        Some(parent) => parent.children(),
        None if nodes.iter().any(|node| node.id == id) => nodes,
        None => return Vec::new(),
    };
    level.iter().filter(|node| node.id != id).collect()
}
