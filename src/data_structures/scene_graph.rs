//! Named scene nodes stored in an arena.
//!
//! The graph owns every node; parents refer to children by [`NodeId`], so a
//! child can be listed under several parents without any ownership transfer.
//! There is no removal and no cycle detection. Rendering never walks the
//! graph; demos use it to name their objects.

use log::warn;

/// Stable index of a node inside its [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct SceneNode {
    name: String,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node without a parent. Names are fixed once created.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        self.nodes.push(SceneNode {
            name: name.into(),
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Append `child` to `parent`'s children.
    ///
    /// `None` is ignored, as are ids that do not belong to this graph.
    pub fn add_child(&mut self, parent: NodeId, child: Option<NodeId>) {
        let Some(child) = child else {
            return;
        };
        if !self.contains(child) {
            warn!("Ignoring unknown child node {:?}", child);
            return;
        }
        match self.nodes.get_mut(parent.0) {
            Some(node) => node.children.push(child),
            None => warn!("Ignoring child for unknown parent node {:?}", parent),
        }
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0).map(|node| node.name.as_str())
    }

    /// Children in insertion order; empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// First node with the given name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(NodeId)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_child_keeps_insertion_order() {
        let mut graph = SceneGraph::new();
        let root = graph.add_node("root");
        let left = graph.add_node("left");
        let right = graph.add_node("right");

        graph.add_child(root, Some(left));
        graph.add_child(root, Some(right));

        assert_eq!(graph.children(root), &[left, right]);
        assert_eq!(graph.name(root), Some("root"));
        assert_eq!(graph.name(right), Some("right"));
    }

    #[test]
    fn absent_child_is_a_no_op() {
        let mut graph = SceneGraph::new();
        let root = graph.add_node("root");
        graph.add_child(root, None);
        graph.add_child(root, Some(NodeId(42)));
        assert!(graph.children(root).is_empty());
    }

    #[test]
    fn a_node_may_have_several_parents() {
        let mut graph = SceneGraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let shared = graph.add_node("shared");
        graph.add_child(a, Some(shared));
        graph.add_child(b, Some(shared));
        assert_eq!(graph.children(a), graph.children(b));
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn find_returns_first_match() {
        let mut graph = SceneGraph::new();
        let first = graph.add_node("box");
        graph.add_node("box");
        assert_eq!(graph.find("box"), Some(first));
        assert_eq!(graph.find("missing"), None);
    }

    #[test]
    fn unknown_ids_have_no_name_or_children() {
        let graph = SceneGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.name(NodeId(0)), None);
        assert!(graph.children(NodeId(0)).is_empty());
    }
}
