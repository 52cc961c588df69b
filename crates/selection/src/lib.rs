mod host;
mod manager;
mod rect;
mod slots;
mod snapshot;

pub use crate::host::{
    DocumentHost, NativeSelection, NativeSelectionKind, NodeId, SelectionSource,
};
pub use crate::manager::SelectionManager;
pub use crate::rect::Rect;
pub use crate::slots::SelectionSlots;
pub use crate::snapshot::{SelectionMode, SelectionSnapshot};

pub use blockdoc_store::{BlockModel, Slot, Subscription};
