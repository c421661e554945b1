//! petgraph-backed plain-data block graph.
//!
//! `BlockGraph` is the crate's own `GraphAdapter` implementation, used by
//! the tests and the wasm boundary. Sibling and body links are labeled
//! directed edges; nodes carry their kind string plus a string field map.

use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use super::{BlockKind, GraphAdapter};
use crate::error::CodecError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Ownership link to the following sibling block in the same chain.
    Next,
    /// Ownership link from a repeat block to the head of its nested chain.
    Body,
}

#[derive(Debug, Clone, Default)]
pub struct BlockData {
    pub kind: String,
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug)]
pub struct BlockGraph {
    graph: DiGraph<BlockData, LinkKind>,
}

impl BlockGraph {
    pub fn new() -> Self {
        BlockGraph {
            graph: DiGraph::new(),
        }
    }

    /// Add a node with an arbitrary kind string, recognized or not. The
    /// typed `create_node` covers the kinds this crate encodes; this exists
    /// so graphs holding stale/future block kinds can be represented too.
    pub fn add_raw(&mut self, kind: &str) -> NodeIndex {
        self.graph.add_node(BlockData {
            kind: kind.to_string(),
            fields: BTreeMap::new(),
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn link_target(&self, node: NodeIndex, kind: LinkKind) -> Option<NodeIndex> {
        self.graph
            .edges(node)
            .find(|e| *e.weight() == kind)
            .map(|e| e.target())
    }

    /// Serialize to the JSON shape used at the wasm boundary. `head` is the
    /// chain head returned by encode, if the graph is non-empty.
    pub fn to_dto(&self, head: Option<NodeIndex>) -> GraphDto {
        GraphDto {
            nodes: self
                .graph
                .node_indices()
                .map(|idx| NodeDto {
                    id: idx.index(),
                    kind: self.graph[idx].kind.clone(),
                    fields: self.graph[idx].fields.clone(),
                })
                .collect(),
            links: self
                .graph
                .edge_references()
                .map(|e| LinkDto {
                    from: e.source().index(),
                    to: e.target().index(),
                    slot: *e.weight(),
                })
                .collect(),
            head: head.map(|h| h.index()),
        }
    }

    /// Rebuild a graph (and its chain head) from the wasm-boundary JSON
    /// shape. Links or heads referencing unknown node ids fail with W003.
    pub fn from_dto(dto: &GraphDto) -> Result<(Self, Option<NodeIndex>), CodecError> {
        let mut graph = BlockGraph::new();
        let mut indices = HashMap::new();

        for node in &dto.nodes {
            let idx = graph.graph.add_node(BlockData {
                kind: node.kind.clone(),
                fields: node.fields.clone(),
            });
            indices.insert(node.id, idx);
        }

        for link in &dto.links {
            let from = *indices.get(&link.from).ok_or_else(|| {
                CodecError::wire(
                    "W003",
                    format!("Link references unknown source node {}", link.from),
                )
            })?;
            let to = *indices.get(&link.to).ok_or_else(|| {
                CodecError::wire(
                    "W003",
                    format!("Link references unknown target node {}", link.to),
                )
            })?;
            graph.graph.add_edge(from, to, link.slot);
        }

        let head = match dto.head {
            Some(id) => Some(*indices.get(&id).ok_or_else(|| {
                CodecError::wire("W003", format!("Head references unknown node {}", id))
            })?),
            None => None,
        };

        Ok((graph, head))
    }
}

impl GraphAdapter for BlockGraph {
    type Node = NodeIndex;

    fn create_node(&mut self, kind: BlockKind) -> NodeIndex {
        self.add_raw(kind.name())
    }

    fn kind(&self, node: NodeIndex) -> String {
        self.graph[node].kind.clone()
    }

    fn field(&self, node: NodeIndex, name: &str) -> Option<String> {
        self.graph[node].fields.get(name).cloned()
    }

    fn set_field(&mut self, node: NodeIndex, name: &str, value: &str) {
        self.graph[node]
            .fields
            .insert(name.to_string(), value.to_string());
    }

    fn next(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.link_target(node, LinkKind::Next)
    }

    fn link_next(&mut self, a: NodeIndex, b: NodeIndex) {
        self.graph.add_edge(a, b, LinkKind::Next);
    }

    fn body_head(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.link_target(node, LinkKind::Body)
    }

    fn set_body_head(&mut self, node: NodeIndex, head: NodeIndex) {
        self.graph.add_edge(node, head, LinkKind::Body);
    }
}

// ---------------------------------------------------------------------------
// DTOs for the wasm boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDto {
    pub nodes: Vec<NodeDto>,
    pub links: Vec<LinkDto>,
    pub head: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDto {
    pub id: usize,
    pub kind: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkDto {
    pub from: usize,
    pub to: usize,
    pub slot: LinkKind,
}
