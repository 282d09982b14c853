//! Cancellable algorithm lifecycle shared by every algorithm in the crate.
//!
//! One [`Lifecycle`] is embedded by value in each algorithm. `compute` runs
//! `begin` / body / `settle`; the body polls a [`CancellationToken`] at its
//! safe points and unwinds with [`Interrupt::Cancelled`], which `settle`
//! catches and turns into the `Aborted` state instead of an error.
//!
//! [`AbortHandle`] is the only cross-thread surface: it shares the state cell
//! and the cancellation flag with the running instance, nothing else.

use crate::core::ComputationState;
use crate::error::{AlgorithmError, Result};
use crate::events::Signal;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Internal unwinding signal for algorithm bodies. Never escapes `compute`:
/// `Cancelled` is swallowed by the lifecycle, `Failed` is unwrapped into the
/// caller-visible error.
#[derive(Debug)]
pub(crate) enum Interrupt {
    Cancelled,
    Failed(AlgorithmError),
}

impl From<AlgorithmError> for Interrupt {
    fn from(error: AlgorithmError) -> Self {
        Interrupt::Failed(error)
    }
}

pub(crate) type Interruptible<T> = std::result::Result<T, Interrupt>;

/// State and flag shared with abort handles across threads.
struct Shared {
    state: Mutex<ComputationState>,
    cancel: AtomicBool,
}

/// The algorithm state machine.
///
/// Lifecycle notifications (`started`, `finished`, `aborted`,
/// `state_changed`) fire on the compute thread. A cross-thread `abort` only
/// flips the shared state to `PendingAbortion` and raises the flag; the
/// transition to `Aborted` (and its notification) happens once the running
/// body observes the flag.
pub struct Lifecycle {
    shared: Arc<Shared>,
    pub started: Signal<()>,
    pub finished: Signal<()>,
    pub aborted: Signal<()>,
    pub state_changed: Signal<ComputationState>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ComputationState::NotRunning),
                cancel: AtomicBool::new(false),
            }),
            started: Signal::new(),
            finished: Signal::new(),
            aborted: Signal::new(),
            state_changed: Signal::new(),
        }
    }

    pub fn state(&self) -> ComputationState {
        *self.shared.state.lock()
    }

    /// Handle for requesting cancellation from another thread.
    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub(crate) fn token(&self) -> CancellationToken {
        CancellationToken {
            shared: Arc::clone(&self.shared),
        }
    }

    /// `NotRunning | Finished | Aborted -> Running`. Resets the cancellation
    /// flag and fires `started`.
    pub(crate) fn begin(&self) -> Result<()> {
        {
            let mut state = self.shared.state.lock();
            if matches!(
                *state,
                ComputationState::Running | ComputationState::PendingAbortion
            ) {
                return Err(AlgorithmError::AlreadyRunning);
            }
            *state = ComputationState::Running;
            self.shared.cancel.store(false, Ordering::SeqCst);
        }
        self.state_changed.emit(&ComputationState::Running);
        self.started.emit(&());
        Ok(())
    }

    /// Folds the body outcome into the terminal state. Cancellation becomes
    /// `Aborted` with an `Ok` return; errors reset the machine to
    /// `NotRunning` and propagate.
    pub(crate) fn settle(&self, outcome: Interruptible<()>) -> Result<()> {
        match outcome {
            Ok(()) => {
                self.transition(ComputationState::Finished);
                self.finished.emit(&());
                Ok(())
            }
            Err(Interrupt::Cancelled) => {
                debug!("computation aborted cooperatively");
                self.transition(ComputationState::Aborted);
                self.aborted.emit(&());
                Ok(())
            }
            Err(Interrupt::Failed(error)) => {
                debug!(%error, "computation failed");
                self.transition(ComputationState::NotRunning);
                Err(error)
            }
        }
    }

    fn transition(&self, next: ComputationState) {
        *self.shared.state.lock() = next;
        self.state_changed.emit(&next);
    }
}

/// Cross-thread cancellation request handle. Cheap to clone.
#[derive(Clone)]
pub struct AbortHandle {
    shared: Arc<Shared>,
}

impl AbortHandle {
    /// Requests cooperative cancellation. A no-op unless a run is in
    /// progress; the running body observes the flag at its next safe point.
    pub fn abort(&self) {
        let mut state = self.shared.state.lock();
        if *state == ComputationState::Running {
            *state = ComputationState::PendingAbortion;
            self.shared.cancel.store(true, Ordering::SeqCst);
        }
    }

    pub fn state(&self) -> ComputationState {
        *self.shared.state.lock()
    }
}

/// Polled by algorithm bodies at safe points (once per outer loop iteration).
pub(crate) struct CancellationToken {
    shared: Arc<Shared>,
}

impl CancellationToken {
    pub(crate) fn check(&self) -> Interruptible<()> {
        if self.shared.cancel.load(Ordering::SeqCst) {
            Err(Interrupt::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn begin_and_settle_walk_the_state_machine() {
        let lifecycle = Lifecycle::new();
        let states: Rc<RefCell<Vec<ComputationState>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);
        let _sub = lifecycle
            .state_changed
            .subscribe(move |s| sink.borrow_mut().push(*s));

        assert_eq!(lifecycle.state(), ComputationState::NotRunning);
        lifecycle.begin().unwrap();
        assert_eq!(lifecycle.state(), ComputationState::Running);
        lifecycle.settle(Ok(())).unwrap();
        assert_eq!(lifecycle.state(), ComputationState::Finished);

        assert_eq!(
            *states.borrow(),
            vec![ComputationState::Running, ComputationState::Finished]
        );
    }

    #[test]
    fn begin_while_running_fails_fast() {
        let lifecycle = Lifecycle::new();
        lifecycle.begin().unwrap();
        assert_eq!(
            lifecycle.begin().unwrap_err(),
            AlgorithmError::AlreadyRunning
        );
    }

    #[test]
    fn abort_is_observed_at_the_next_check() {
        let lifecycle = Lifecycle::new();
        lifecycle.begin().unwrap();
        let token = lifecycle.token();
        assert!(token.check().is_ok());

        lifecycle.abort_handle().abort();
        assert_eq!(lifecycle.state(), ComputationState::PendingAbortion);
        assert!(matches!(token.check(), Err(Interrupt::Cancelled)));

        lifecycle.settle(token.check()).unwrap();
        assert_eq!(lifecycle.state(), ComputationState::Aborted);
    }

    #[test]
    fn abort_outside_a_run_is_a_no_op() {
        let lifecycle = Lifecycle::new();
        lifecycle.abort_handle().abort();
        assert_eq!(lifecycle.state(), ComputationState::NotRunning);

        // the flag must not leak into the next run
        lifecycle.begin().unwrap();
        assert!(lifecycle.token().check().is_ok());
    }

    #[test]
    fn failure_resets_to_not_running() {
        let lifecycle = Lifecycle::new();
        lifecycle.begin().unwrap();
        let err = lifecycle
            .settle(Err(Interrupt::Failed(AlgorithmError::NotAcyclic)))
            .unwrap_err();
        assert_eq!(err, AlgorithmError::NotAcyclic);
        assert_eq!(lifecycle.state(), ComputationState::NotRunning);
    }
}
