#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use blockdoc_selection::{
    DocumentHost, NativeSelection, NodeId, Rect, SelectionManager, SelectionSource,
};
use blockdoc_store::{Slot, Subscription};

/// In-memory stand-in for the host document: node containment, nearest
/// enclosing block resolution, layout rects, and a scriptable native
/// selection. Every field is settable mid-test.
#[derive(Default)]
pub struct FakeHost {
    native: RefCell<Option<NativeSelection>>,
    contained: RefCell<HashSet<NodeId>>,
    node_blocks: RefCell<HashMap<NodeId, String>>,
    rects: RefCell<HashMap<String, Rect>>,
    root: RefCell<Option<String>>,
    rect_queries: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn set_native(&self, selection: Option<NativeSelection>) {
        *self.native.borrow_mut() = selection;
    }

    /// Register a rendered node inside the document, resolving to `block_id`.
    pub fn add_node(&self, node: NodeId, block_id: &str) {
        self.contained.borrow_mut().insert(node);
        self.node_blocks
            .borrow_mut()
            .insert(node, block_id.to_string());
    }

    /// Register a rendered node inside the document whose upward walk finds
    /// no enclosing block.
    pub fn add_unresolved_node(&self, node: NodeId) {
        self.contained.borrow_mut().insert(node);
    }

    pub fn set_rect(&self, block_id: &str, rect: Rect) {
        self.rects.borrow_mut().insert(block_id.to_string(), rect);
    }

    pub fn set_root(&self, block_id: &str) {
        *self.root.borrow_mut() = Some(block_id.to_string());
    }

    /// Block ids whose rects have been queried, in query order.
    pub fn rect_queries(&self) -> Vec<String> {
        self.rect_queries.borrow().clone()
    }
}

impl DocumentHost for FakeHost {
    fn native_selection(&self) -> Option<NativeSelection> {
        *self.native.borrow()
    }

    fn contains(&self, node: NodeId) -> bool {
        self.contained.borrow().contains(&node)
    }

    fn enclosing_block_id(&self, node: NodeId) -> Option<String> {
        self.node_blocks.borrow().get(&node).cloned()
    }

    fn block_rect(&self, block_id: &str) -> Option<Rect> {
        self.rect_queries.borrow_mut().push(block_id.to_string());
        self.rects.borrow().get(block_id).copied()
    }

    fn root_block_id(&self) -> Option<String> {
        self.root.borrow().clone()
    }
}

/// Scripted stand-in for the host's "selection changed" event stream.
#[derive(Default)]
pub struct FakeSource {
    signal: Slot<()>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fire(&self) {
        self.signal.emit(&());
    }

    pub fn has_subscribers(&self) -> bool {
        self.signal.has_handlers()
    }
}

impl SelectionSource for FakeSource {
    fn subscribe(&self, handler: Box<dyn Fn()>) -> Subscription {
        self.signal.on(move |_| handler())
    }
}

pub fn manager_with(host: &Rc<FakeHost>, source: &FakeSource) -> SelectionManager {
    let host: Rc<dyn DocumentHost> = host.clone();
    SelectionManager::new(host, source)
}
