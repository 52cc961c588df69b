use std::collections::HashMap;

use blockdoc_store::{Slot, Subscription};

use crate::snapshot::SelectionSnapshot;

/// Per-block selected-state channels plus the single aggregate snapshot
/// channel. Owns the block-id map exclusively; block channels are created
/// lazily on first subscription and live until explicitly torn down.
pub struct SelectionSlots {
    blocks: HashMap<String, Slot<bool>>,
    selection: Slot<SelectionSnapshot>,
}

impl Default for SelectionSlots {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionSlots {
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            selection: Slot::new(),
        }
    }

    /// Register `handler` on the channel for `block_id`, creating the
    /// channel if absent. Multiple subscribers per block are delivered in
    /// subscription order.
    pub fn subscribe_block(
        &mut self,
        block_id: &str,
        handler: impl Fn(bool) + 'static,
    ) -> Subscription {
        self.blocks
            .entry(block_id.to_string())
            .or_default()
            .on(move |selected| handler(*selected))
    }

    /// Tear down the whole channel for `block_id`: every handler goes, and
    /// later emits for this id are no-ops until a new subscription recreates
    /// the channel.
    pub fn unsubscribe_all_for_block(&mut self, block_id: &str) {
        if let Some(slot) = self.blocks.remove(block_id) {
            slot.dispose();
        }
    }

    pub fn subscribe(&self, handler: impl Fn(&SelectionSnapshot) + 'static) -> Subscription {
        self.selection.on(handler)
    }

    /// No-op if no channel exists for `block_id`; otherwise synchronous
    /// in-order delivery with no error isolation.
    pub fn emit_block(&self, block_id: &str, selected: bool) {
        if let Some(slot) = self.blocks.get(block_id) {
            slot.emit(&selected);
        }
    }

    pub fn emit_selection(&self, snapshot: &SelectionSnapshot) {
        self.selection.emit(snapshot);
    }

    pub fn has_block_channel(&self, block_id: &str) -> bool {
        self.blocks.contains_key(block_id)
    }

    /// Tear down every channel, block and aggregate. Idempotent.
    pub fn dispose_all(&mut self) {
        for (_, slot) in self.blocks.drain() {
            slot.dispose();
        }
        self.selection.dispose();
    }

    pub(crate) fn block_slot(&self, block_id: &str) -> Option<Slot<bool>> {
        self.blocks.get(block_id).cloned()
    }

    pub(crate) fn selection_slot(&self) -> Slot<SelectionSnapshot> {
        self.selection.clone()
    }
}
