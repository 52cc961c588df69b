use blockdoc_store::Subscription;

use crate::rect::Rect;

/// Opaque handle to a rendered node in the host document. The selection core
/// never inspects it; it is only handed back to the [`DocumentHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeSelectionKind {
    None,
    Caret,
    Range,
}

/// State of the host's native text selection at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeSelection {
    pub kind: NativeSelectionKind,
    pub anchor: Option<NodeId>,
    pub focus: Option<NodeId>,
}

impl NativeSelection {
    pub fn none() -> Self {
        Self {
            kind: NativeSelectionKind::None,
            anchor: None,
            focus: None,
        }
    }

    pub fn caret(node: NodeId) -> Self {
        Self {
            kind: NativeSelectionKind::Caret,
            anchor: Some(node),
            focus: Some(node),
        }
    }

    pub fn range(anchor: NodeId, focus: NodeId) -> Self {
        Self {
            kind: NativeSelectionKind::Range,
            anchor: Some(anchor),
            focus: Some(focus),
        }
    }
}

/// Queries the selection core needs from the document it manages. Implemented
/// by the embedding editor over its rendered tree.
pub trait DocumentHost {
    /// Current native selection, queried live on every call.
    fn native_selection(&self) -> Option<NativeSelection>;

    /// Whether the node lives inside this document's subtree.
    fn contains(&self, node: NodeId) -> bool;

    /// Id of the nearest block enclosing `node`, walking up from the node.
    fn enclosing_block_id(&self, node: NodeId) -> Option<String>;

    /// Rendered extent of a block, if it is currently laid out.
    fn block_rect(&self, block_id: &str) -> Option<Rect>;

    /// Id of the document's root block, if the document is attached.
    fn root_block_id(&self) -> Option<String>;
}

/// Source of the host's no-argument "selection changed" signal. Injected at
/// construction so tests can substitute a scripted source.
pub trait SelectionSource {
    fn subscribe(&self, handler: Box<dyn Fn()>) -> Subscription;
}
