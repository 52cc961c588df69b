use serde::{Deserialize, Serialize};

/// Read-only view over one node of the document's structural block tree.
///
/// The tree is owned and mutated by the embedding editor; consumers of this
/// crate only traverse `children` and read `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockModel {
    pub id: String,
    #[serde(default)]
    pub children: Vec<BlockModel>,
}

impl BlockModel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: BlockModel) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl Into<Vec<BlockModel>>) -> Self {
        self.children.extend(children.into());
        self
    }

    /// Direct child with the given id, if any. Does not search deeper.
    pub fn child_by_id(&self, id: &str) -> Option<&BlockModel> {
        self.children.iter().find(|child| child.id == id)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
