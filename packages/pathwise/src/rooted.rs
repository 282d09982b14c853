//! Optional root/target bookkeeping with change notification, shared by the
//! single-source algorithms. Membership validation against a graph happens in
//! the owning algorithm's setters; this type only tracks values and notifies
//! when they actually change.

use crate::events::Signal;

pub struct RootedComputation<V> {
    root: Option<V>,
    target: Option<V>,
    pub root_changed: Signal<Option<V>>,
    pub target_changed: Signal<Option<V>>,
}

impl<V: Clone + PartialEq> Default for RootedComputation<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + PartialEq> RootedComputation<V> {
    pub fn new() -> Self {
        Self {
            root: None,
            target: None,
            root_changed: Signal::new(),
            target_changed: Signal::new(),
        }
    }

    pub fn root(&self) -> Option<&V> {
        self.root.as_ref()
    }

    pub fn target(&self) -> Option<&V> {
        self.target.as_ref()
    }

    pub fn set_root(&mut self, vertex: V) {
        if self.root.as_ref() != Some(&vertex) {
            self.root = Some(vertex);
            self.root_changed.emit(&self.root);
        }
    }

    pub fn clear_root(&mut self) {
        if self.root.is_some() {
            self.root = None;
            self.root_changed.emit(&self.root);
        }
    }

    pub fn set_target(&mut self, vertex: V) {
        if self.target.as_ref() != Some(&vertex) {
            self.target = Some(vertex);
            self.target_changed.emit(&self.target);
        }
    }

    pub fn clear_target(&mut self) {
        if self.target.is_some() {
            self.target = None;
            self.target_changed.emit(&self.target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn notifies_only_on_actual_change() {
        let mut rooted: RootedComputation<&str> = RootedComputation::new();
        let changes = Rc::new(Cell::new(0u32));
        let sink = Rc::clone(&changes);
        let _sub = rooted.root_changed.subscribe(move |_| sink.set(sink.get() + 1));

        rooted.set_root("a");
        rooted.set_root("a");
        assert_eq!(changes.get(), 1);

        rooted.set_root("b");
        rooted.clear_root();
        rooted.clear_root();
        assert_eq!(changes.get(), 3);
        assert_eq!(rooted.root(), None);
    }
}
