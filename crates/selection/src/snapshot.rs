use serde::{Deserialize, Serialize};

/// Which notion of selection currently holds. Exactly one at any instant;
/// always derived from current state, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    #[default]
    None,
    Caret,
    Range,
    Block,
}

/// The aggregate selection value pushed to subscribers and returned by
/// [`SelectionManager::snapshot`](crate::SelectionManager::snapshot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SelectionSnapshot {
    None,
    Caret {
        anchor_block_id: String,
        focus_block_id: String,
    },
    Range {
        anchor_block_id: String,
        focus_block_id: String,
    },
    Block {
        selected_block_ids: Vec<String>,
    },
}

impl SelectionSnapshot {
    pub fn mode(&self) -> SelectionMode {
        match self {
            SelectionSnapshot::None => SelectionMode::None,
            SelectionSnapshot::Caret { .. } => SelectionMode::Caret,
            SelectionSnapshot::Range { .. } => SelectionMode::Range,
            SelectionSnapshot::Block { .. } => SelectionMode::Block,
        }
    }
}
