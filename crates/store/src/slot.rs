use std::cell::RefCell;
use std::rc::{Rc, Weak};

struct SlotHandler<T: 'static> {
    id: u64,
    callback: Rc<dyn Fn(&T)>,
}

struct SlotState<T: 'static> {
    next_id: u64,
    handlers: Vec<SlotHandler<T>>,
    disposed: bool,
}

/// A broadcast channel delivering values synchronously to every registered
/// handler, in subscription order.
///
/// Cloning yields another handle to the same channel. Single-threaded by
/// construction; handlers may re-enter the slot (subscribe, unsubscribe,
/// emit) while an emission is in flight.
pub struct Slot<T: 'static> {
    state: Rc<RefCell<SlotState<T>>>,
}

impl<T: 'static> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: 'static> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Slot<T> {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(SlotState {
                next_id: 0,
                handlers: Vec::new(),
                disposed: false,
            })),
        }
    }

    /// Register `callback`. Dropping the returned [`Subscription`] removes
    /// exactly this handler; a disposed slot hands back an inert handle.
    pub fn on(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let mut state = self.state.borrow_mut();
        if state.disposed {
            return Subscription::new(|| {});
        }
        let id = state.next_id;
        state.next_id += 1;
        state.handlers.push(SlotHandler {
            id,
            callback: Rc::new(callback),
        });
        drop(state);

        let weak = Rc::downgrade(&self.state);
        Subscription::new(move || unsubscribe(&weak, id))
    }

    /// Invoke every handler with `value`, in subscription order. Handlers
    /// added or removed during delivery take effect from the next emission.
    /// A panicking handler propagates to the caller.
    pub fn emit(&self, value: &T) {
        let callbacks: Vec<Rc<dyn Fn(&T)>> = {
            let state = self.state.borrow();
            if state.disposed {
                return;
            }
            state
                .handlers
                .iter()
                .map(|handler| Rc::clone(&handler.callback))
                .collect()
        };
        for callback in callbacks {
            callback(value);
        }
    }

    /// Remove every handler and mark the slot dead; later emits are no-ops.
    /// Idempotent.
    pub fn dispose(&self) {
        let mut state = self.state.borrow_mut();
        state.handlers.clear();
        state.disposed = true;
    }

    pub fn has_handlers(&self) -> bool {
        !self.state.borrow().handlers.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.state.borrow().disposed
    }
}

fn unsubscribe<T: 'static>(state: &Weak<RefCell<SlotState<T>>>, id: u64) {
    if let Some(state) = state.upgrade() {
        state.borrow_mut().handlers.retain(|handler| handler.id != id);
    }
}

/// Handle to a registered handler. Dropping it unsubscribes; call
/// [`Subscription::detach`] to keep the handler for the channel's lifetime.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Leave the handler registered and discard the handle.
    pub fn detach(mut self) {
        self.unsubscribe.take();
    }

    /// Remove the handler now. Equivalent to dropping the handle.
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}
