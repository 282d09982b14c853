//! Subscription-based notification primitives.
//!
//! Algorithms expose [`Signal`]s instead of letting observers reach into
//! their internal maps: a recorder subscribes, receives owned payloads on the
//! compute thread, and builds its own derived structures. Dropping the
//! returned [`Subscription`] always detaches, including on early exit.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Handler<T> = Box<dyn FnMut(&T)>;

struct Slots<T> {
    next_id: u64,
    handlers: Vec<(u64, Handler<T>)>,
    /// Ids unsubscribed while an emit had the handler list checked out.
    dead: Vec<u64>,
}

impl<T> Slots<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
            dead: Vec::new(),
        }
    }
}

/// A multicast event channel with RAII unsubscription.
pub struct Signal<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots::new())),
        }
    }

    /// Registers a handler. The handler runs on the emitting thread; it is
    /// removed when the returned subscription is dropped.
    pub fn subscribe(&self, handler: impl FnMut(&T) + 'static) -> Subscription<T> {
        let mut slots = self.slots.borrow_mut();
        let id = slots.next_id;
        slots.next_id += 1;
        slots.handlers.push((id, Box::new(handler)));
        Subscription {
            slots: Rc::downgrade(&self.slots),
            id,
        }
    }

    /// Invokes every live handler with `event`. Handlers may subscribe or
    /// unsubscribe from within the callback.
    pub fn emit(&self, event: &T) {
        let mut checked_out = std::mem::take(&mut self.slots.borrow_mut().handlers);
        for (_, handler) in checked_out.iter_mut() {
            handler(event);
        }
        let mut slots = self.slots.borrow_mut();
        // Handlers added during the emit were pushed onto the fresh list.
        checked_out.append(&mut slots.handlers);
        checked_out.retain(|(id, _)| !slots.dead.contains(id));
        slots.dead.clear();
        slots.handlers = checked_out;
    }

    pub fn subscriber_count(&self) -> usize {
        self.slots.borrow().handlers.len()
    }
}

/// Scoped handle returned by [`Signal::subscribe`]; drop detaches.
pub struct Subscription<T> {
    slots: Weak<RefCell<Slots<T>>>,
    id: u64,
}

impl<T> Subscription<T> {
    /// Explicit detach, equivalent to dropping the handle.
    pub fn detach(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.upgrade() {
            let mut slots = slots.borrow_mut();
            let before = slots.handlers.len();
            let id = self.id;
            slots.handlers.retain(|(h, _)| *h != id);
            if slots.handlers.len() == before {
                // Emit has the list checked out; record for removal after it.
                slots.dead.push(id);
            }
        }
    }
}

/// A relaxation that improved the target's distance ("tree edge").
#[derive(Clone, Debug)]
pub struct TreeEdge<E> {
    pub edge: E,
    /// Improved distance of the edge target after the relaxation.
    pub distance: f64,
}

/// Per-algorithm vertex and edge notifications shared by the single-source
/// shortest-path algorithms.
pub struct SearchEvents<V, E> {
    pub initialize_vertex: Signal<V>,
    pub discover_vertex: Signal<V>,
    pub examine_vertex: Signal<V>,
    pub finish_vertex: Signal<V>,
    pub examine_edge: Signal<E>,
    pub tree_edge: Signal<TreeEdge<E>>,
    pub edge_not_relaxed: Signal<E>,
}

impl<V, E> Default for SearchEvents<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> SearchEvents<V, E> {
    pub fn new() -> Self {
        Self {
            initialize_vertex: Signal::new(),
            discover_vertex: Signal::new(),
            examine_vertex: Signal::new(),
            finish_vertex: Signal::new(),
            examine_edge: Signal::new(),
            tree_edge: Signal::new(),
            edge_not_relaxed: Signal::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn emits_to_every_subscriber() {
        let signal: Signal<u32> = Signal::new();
        let seen = Rc::new(Cell::new(0u32));

        let a = Rc::clone(&seen);
        let _sub_a = signal.subscribe(move |v| a.set(a.get() + v));
        let b = Rc::clone(&seen);
        let _sub_b = signal.subscribe(move |v| b.set(b.get() + v));

        signal.emit(&3);
        assert_eq!(seen.get(), 6);
    }

    #[test]
    fn drop_detaches() {
        let signal: Signal<u32> = Signal::new();
        let seen = Rc::new(Cell::new(0u32));

        let a = Rc::clone(&seen);
        let sub = signal.subscribe(move |v| a.set(a.get() + v));
        signal.emit(&1);
        drop(sub);
        signal.emit(&1);

        assert_eq!(seen.get(), 1);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn unsubscribe_from_within_handler() {
        let signal: Rc<Signal<u32>> = Rc::new(Signal::new());
        let seen = Rc::new(Cell::new(0u32));

        let a = Rc::clone(&seen);
        let slot: Rc<RefCell<Option<Subscription<u32>>>> = Rc::new(RefCell::new(None));
        let slot_inner = Rc::clone(&slot);
        let sub = signal.subscribe(move |v| {
            a.set(a.get() + v);
            // self-cancel on first delivery
            slot_inner.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(sub);

        signal.emit(&1);
        signal.emit(&1);
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn subscribe_during_emit_takes_effect_next_emit() {
        let signal: Rc<Signal<u32>> = Rc::new(Signal::new());
        let seen = Rc::new(Cell::new(0u32));
        let keep: Rc<RefCell<Vec<Subscription<u32>>>> = Rc::new(RefCell::new(Vec::new()));

        let outer_signal = Rc::clone(&signal);
        let outer_seen = Rc::clone(&seen);
        let outer_keep = Rc::clone(&keep);
        let _sub = signal.subscribe(move |_| {
            let inner_seen = Rc::clone(&outer_seen);
            let sub = outer_signal.subscribe(move |v| inner_seen.set(inner_seen.get() + v));
            outer_keep.borrow_mut().push(sub);
        });

        signal.emit(&5);
        assert_eq!(seen.get(), 0);
        signal.emit(&5);
        assert_eq!(seen.get(), 5);
    }
}
