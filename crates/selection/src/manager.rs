use std::cell::RefCell;
use std::rc::Rc;

use blockdoc_store::{BlockModel, Subscription};

use crate::host::{DocumentHost, NativeSelectionKind, SelectionSource};
use crate::rect::Rect;
use crate::slots::SelectionSlots;
use crate::snapshot::{SelectionMode, SelectionSnapshot};

#[derive(Default)]
struct ManagerState {
    selected_block_ids: Vec<String>,
    anchor_block_id: String,
    focus_block_id: String,
    slots: SelectionSlots,
}

struct ManagerInner {
    host: Rc<dyn DocumentHost>,
    state: RefCell<ManagerState>,
}

/// The single source of truth for the current selection of one document.
///
/// Reconciles the host's native text selection with editor-level block
/// selection into one [`SelectionSnapshot`], and drives per-block and
/// aggregate notifications. One instance per document/editor session;
/// [`SelectionManager::dispose`] (or drop) detaches it from the host.
pub struct SelectionManager {
    inner: Rc<ManagerInner>,
    source_subscription: RefCell<Option<Subscription>>,
}

impl SelectionManager {
    pub fn new(host: Rc<dyn DocumentHost>, source: &dyn SelectionSource) -> Self {
        let inner = Rc::new(ManagerInner {
            host,
            state: RefCell::new(ManagerState::default()),
        });
        let source_subscription = source.subscribe(Box::new({
            let inner = Rc::clone(&inner);
            move || inner.on_native_selection_changed()
        }));
        Self {
            inner,
            source_subscription: RefCell::new(Some(source_subscription)),
        }
    }

    pub fn selected_block_ids(&self) -> Vec<String> {
        self.inner.state.borrow().selected_block_ids.clone()
    }

    /// Replace the selected block-id set. Emits `false` for every block
    /// leaving the set, then `true` for every block entering it (blocks in
    /// both sets get nothing), then the new aggregate snapshot. The only
    /// place the set is mutated; an empty sequence clears Block mode.
    pub fn set_selected_block_ids<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner
            .set_selected_block_ids(ids.into_iter().map(Into::into).collect());
    }

    /// Entry point for the host's "selection changed" signal. Wired to the
    /// injected [`SelectionSource`] at construction, but callable directly.
    pub fn on_native_selection_changed(&self) {
        self.inner.on_native_selection_changed();
    }

    pub fn mode(&self) -> SelectionMode {
        self.inner.mode()
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        self.inner.snapshot()
    }

    pub fn subscribe_block(
        &self,
        block_id: &str,
        handler: impl Fn(bool) + 'static,
    ) -> Subscription {
        self.inner
            .state
            .borrow_mut()
            .slots
            .subscribe_block(block_id, handler)
    }

    pub fn unsubscribe_all_for_block(&self, block_id: &str) {
        self.inner
            .state
            .borrow_mut()
            .slots
            .unsubscribe_all_for_block(block_id);
    }

    pub fn subscribe(&self, handler: impl Fn(&SelectionSnapshot) + 'static) -> Subscription {
        self.inner.state.borrow().slots.subscribe(handler)
    }

    /// Block ids in `block`'s subtree whose rendered extent intersects
    /// `selection_rect`, per the single-match drill-down rule. When `block`
    /// is the document root, the result is also assigned as the current
    /// block selection; nested recursive calls stay pure.
    pub fn calc_intersect_blocks(&self, selection_rect: &Rect, block: &BlockModel) -> Vec<String> {
        self.inner.calc_intersect_blocks(selection_rect, block)
    }

    /// Detach from the selection source and tear down every notification
    /// channel. Idempotent; also runs on drop.
    pub fn dispose(&self) {
        if let Some(subscription) = self.source_subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
        self.inner.state.borrow_mut().slots.dispose_all();
    }
}

impl Drop for SelectionManager {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl ManagerInner {
    fn set_selected_block_ids(&self, new_ids: Vec<String>) {
        let mut deduped: Vec<String> = Vec::with_capacity(new_ids.len());
        for id in new_ids {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }

        // Commit before notifying so re-entrant reads from handlers observe
        // the new set.
        let (to_deselect, to_select) = {
            let mut state = self.state.borrow_mut();
            let old_ids = std::mem::replace(&mut state.selected_block_ids, deduped);
            let new_ids = &state.selected_block_ids;
            let to_deselect: Vec<String> = old_ids
                .iter()
                .filter(|id| !new_ids.contains(*id))
                .cloned()
                .collect();
            let to_select: Vec<String> = new_ids
                .iter()
                .filter(|id| !old_ids.contains(*id))
                .cloned()
                .collect();
            (to_deselect, to_select)
        };

        for block_id in &to_deselect {
            self.emit_block(block_id, false);
        }
        for block_id in &to_select {
            self.emit_block(block_id, true);
        }
        self.emit_selection_changed();
    }

    fn on_native_selection_changed(&self) {
        // Structural and native selection are mutually exclusive; any native
        // change cancels a prior block selection.
        self.set_selected_block_ids(Vec::new());

        let resolved = self.host.native_selection().and_then(|selection| {
            if selection.kind == NativeSelectionKind::None {
                return None;
            }
            let anchor = selection.anchor?;
            let focus = selection.focus?;
            if !self.host.contains(anchor) || !self.host.contains(focus) {
                return None;
            }
            Some((
                self.host.enclosing_block_id(anchor).unwrap_or_default(),
                self.host.enclosing_block_id(focus).unwrap_or_default(),
            ))
        });

        {
            let mut state = self.state.borrow_mut();
            let (anchor_block_id, focus_block_id) = resolved.unwrap_or_default();
            state.anchor_block_id = anchor_block_id;
            state.focus_block_id = focus_block_id;
        }

        self.emit_selection_changed();
    }

    fn mode(&self) -> SelectionMode {
        {
            let state = self.state.borrow();
            if !state.selected_block_ids.is_empty() {
                return SelectionMode::Block;
            }
            if state.anchor_block_id.is_empty() {
                return SelectionMode::None;
            }
        }
        match self.host.native_selection().map(|selection| selection.kind) {
            Some(NativeSelectionKind::Caret) => SelectionMode::Caret,
            Some(NativeSelectionKind::Range) => SelectionMode::Range,
            Some(NativeSelectionKind::None) | None => SelectionMode::None,
        }
    }

    fn snapshot(&self) -> SelectionSnapshot {
        let mode = self.mode();
        let state = self.state.borrow();
        match mode {
            SelectionMode::None => SelectionSnapshot::None,
            SelectionMode::Caret => SelectionSnapshot::Caret {
                anchor_block_id: state.anchor_block_id.clone(),
                focus_block_id: state.focus_block_id.clone(),
            },
            SelectionMode::Range => SelectionSnapshot::Range {
                anchor_block_id: state.anchor_block_id.clone(),
                focus_block_id: state.focus_block_id.clone(),
            },
            SelectionMode::Block => SelectionSnapshot::Block {
                selected_block_ids: state.selected_block_ids.clone(),
            },
        }
    }

    fn calc_intersect_blocks(&self, selection_rect: &Rect, block: &BlockModel) -> Vec<String> {
        let mut selected: Vec<String> = Vec::new();

        let block_rect = self.host.block_rect(&block.id);
        if block_rect.is_some_and(|rect| selection_rect.intersects(&rect)) {
            for child in &block.children {
                let intersects = self
                    .host
                    .block_rect(&child.id)
                    .is_some_and(|rect| selection_rect.intersects(&rect));
                if intersects {
                    selected.push(child.id.clone());
                }
            }

            // A rect grazing exactly one child of a container is ambiguous
            // between that child and its contents; prefer the finer-grained
            // descendant match when one exists.
            if selected.len() == 1 {
                let only_id = selected[0].clone();
                if let Some(child) = block.child_by_id(&only_id) {
                    if !child.children.is_empty() {
                        let selected_children = self.calc_intersect_blocks(selection_rect, child);
                        if !selected_children.is_empty() {
                            selected = selected_children;
                        }
                    }
                }
            }
        }

        if self.host.root_block_id().as_deref() == Some(block.id.as_str()) {
            self.set_selected_block_ids(selected.clone());
        }
        selected
    }

    fn emit_block(&self, block_id: &str, selected: bool) {
        // Clone the slot handle out so no state borrow is held while
        // handlers run; they may re-enter the manager.
        let slot = self.state.borrow().slots.block_slot(block_id);
        if let Some(slot) = slot {
            slot.emit(&selected);
        }
    }

    fn emit_selection_changed(&self) {
        let snapshot = self.snapshot();
        let slot = self.state.borrow().slots.selection_slot();
        slot.emit(&snapshot);
    }
}
