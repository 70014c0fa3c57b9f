//! Narrative graph - nodes of story text and the gated edges between them
//!
//! The graph owns its nodes and edges; edges reference nodes by id. Both
//! endpoints of an edge must already exist, and node ids are unique. Edge
//! availability is decided by the engine's prerequisite evaluator; the graph
//! itself only stores the gating data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::Prerequisites;
use crate::DomainError;

/// One narrative text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub text: String,
}

impl Node {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A directed, optionally gated transition between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// Choice text shown to the player
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<Prerequisites>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
            prerequisites: None,
        }
    }

    pub fn with_prerequisites(mut self, prerequisites: Prerequisites) -> Self {
        self.prerequisites = Some(prerequisites);
        self
    }
}

/// The dialogue/story graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    nodes: HashMap<String, Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node.
    ///
    /// # Errors
    ///
    /// Node ids are unique; re-registering an id is a content error.
    pub fn add_node(&mut self, node: Node) -> Result<(), DomainError> {
        if self.nodes.contains_key(&node.id) {
            return Err(DomainError::DuplicateNode(node.id));
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Register an edge between two existing nodes.
    ///
    /// # Errors
    ///
    /// Both endpoints must already be present in the graph.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), DomainError> {
        if !self.nodes.contains_key(&edge.from) {
            return Err(DomainError::MissingNode(edge.from));
        }
        if !self.nodes.contains_key(&edge.to) {
            return Err(DomainError::MissingNode(edge.to));
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Outgoing edges of a node, in insertion order.
    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.from == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Node::new("intro", "You wake up.")).unwrap();
        graph.add_node(Node::new("cave", "A cave mouth yawns.")).unwrap();
        graph
    }

    #[test]
    fn duplicate_node_id_is_rejected() {
        let mut graph = two_node_graph();
        let err = graph.add_node(Node::new("intro", "Again?")).unwrap_err();
        assert_eq!(err, DomainError::DuplicateNode("intro".into()));
    }

    #[test]
    fn edge_endpoints_must_exist() {
        let mut graph = two_node_graph();
        let err = graph
            .add_edge(Edge::new("intro", "castle", "Walk north"))
            .unwrap_err();
        assert_eq!(err, DomainError::MissingNode("castle".into()));

        let err = graph
            .add_edge(Edge::new("castle", "cave", "Walk south"))
            .unwrap_err();
        assert_eq!(err, DomainError::MissingNode("castle".into()));
    }

    #[test]
    fn edges_from_preserves_declaration_order() {
        let mut graph = two_node_graph();
        graph.add_edge(Edge::new("intro", "cave", "Enter the cave")).unwrap();
        graph.add_edge(Edge::new("intro", "intro", "Wait")).unwrap();

        let labels: Vec<_> = graph.edges_from("intro").map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Enter the cave", "Wait"]);
    }
}
