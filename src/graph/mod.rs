//! Visual-graph side: block kinds, field names, and the adapter trait the
//! codec is written against.

pub mod store;

pub use store::{BlockGraph, GraphDto};

/// Field names used on the visual blocks. All field values are stored and
/// read as strings; numeric fields are parsed/formatted at the codec
/// boundary.
pub mod field {
    pub const BUTTON: &str = "BUTTON";
    pub const STICK: &str = "STICK";
    pub const DIRECTION: &str = "DIRECTION";
    pub const MAGNITUDE: &str = "MAGNITUDE";
    pub const INTERVAL: &str = "INTERVAL";
    pub const DURATION: &str = "DURATION";
    pub const COUNT: &str = "COUNT";
    pub const DELAY_MS: &str = "DELAY_MS";
    pub const COMMENT: &str = "COMMENT";
}

/// The closed set of block kinds the codec understands. Editors may hold
/// other kinds; decode skips those (see `codec::decode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Button,
    Stick,
    AutoClicker,
    Repeat,
    Comment,
}

impl BlockKind {
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Button => "macro_button",
            BlockKind::Stick => "macro_stick",
            BlockKind::AutoClicker => "macro_autoclicker",
            BlockKind::Repeat => "macro_repeat",
            BlockKind::Comment => "macro_comment",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "macro_button" => Some(BlockKind::Button),
            "macro_stick" => Some(BlockKind::Stick),
            "macro_autoclicker" => Some(BlockKind::AutoClicker),
            "macro_repeat" => Some(BlockKind::Repeat),
            "macro_comment" => Some(BlockKind::Comment),
            _ => None,
        }
    }
}

/// Minimal interface the codec needs from a visual editing surface.
///
/// Blocks form chains through `next` links; repeat blocks additionally own
/// the head of a nested chain through their body slot. The codec never
/// retains node handles across calls; the adapter owns the graph's lifetime.
///
/// An unset field and a field holding the empty string are treated
/// identically everywhere, so `field` may report either as it likes.
pub trait GraphAdapter {
    type Node: Copy + Eq + std::hash::Hash;

    fn create_node(&mut self, kind: BlockKind) -> Self::Node;

    /// Raw kind string of a node. May be a kind this crate does not know.
    fn kind(&self, node: Self::Node) -> String;

    fn field(&self, node: Self::Node, name: &str) -> Option<String>;

    fn set_field(&mut self, node: Self::Node, name: &str, value: &str);

    /// Following sibling in the same chain, if any.
    fn next(&self, node: Self::Node) -> Option<Self::Node>;

    fn link_next(&mut self, a: Self::Node, b: Self::Node);

    /// Head of the nested chain of a repeat block, if any.
    fn body_head(&self, node: Self::Node) -> Option<Self::Node>;

    fn set_body_head(&mut self, node: Self::Node, head: Self::Node);
}
