//! Shared lazy cells and the evaluation policies that build them.
//!
//! A [`Deferred`] is a handle to a slot holding either an unevaluated thunk
//! or its memoized result. Handles are cheap to clone and every clone sees
//! the same slot, so a cell forced through one handle is ready through all
//! of them and its thunk runs at most once.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use crate::error::{PipelineError, Result};
use crate::Value;

/// Unit of deferred work. Returns a `Result` so an upstream failure reaches
/// every downstream cell.
pub type Thunk = Box<dyn FnOnce() -> Result<Value> + Send + 'static>;

/// A stage function shared by every cell of one map.
pub type Stage = Arc<dyn Fn(Value) -> Value + Send + Sync + 'static>;

/// When the work behind a cell starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Nothing runs until a consumer forces the cell; the forcing thread
    /// does the work.
    Lazy,
    /// Work is handed to the rayon pool as soon as the cell exists; forcing
    /// only waits for it.
    Eager,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Lazy => write!(f, "lazy"),
            Policy::Eager => write!(f, "eager"),
        }
    }
}

enum State {
    Pending(Thunk),
    Running,
    Ready(Value),
    Failed(PipelineError),
}

struct Slot {
    state: Mutex<State>,
    ready: Condvar,
}

impl Slot {
    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state.lock().map_err(|_| PipelineError::LockPoisoned)
    }
}

/// A shareable, memoized deferred computation producing one [`Value`].
#[derive(Clone)]
pub struct Deferred {
    slot: Arc<Slot>,
    policy: Policy,
}

impl Deferred {
    /// Wrap `thunk` in a new cell. Under [`Policy::Eager`] the thunk is
    /// dispatched to the rayon pool before this returns.
    pub fn new<F>(policy: Policy, thunk: F) -> Self
    where
        F: FnOnce() -> Result<Value> + Send + 'static,
    {
        let cell = Self::with_state(policy, State::Pending(Box::new(thunk)));

        if policy == Policy::Eager {
            let worker = cell.clone();
            rayon::spawn(move || {
                if let Err(err) = worker.force() {
                    tracing::warn!(error = %err, "eager computation failed");
                }
            });
        }

        cell
    }

    /// A cell that is already forced.
    pub fn ready(policy: Policy, value: Value) -> Self {
        Self::with_state(policy, State::Ready(value))
    }

    fn with_state(policy: Policy, state: State) -> Self {
        Deferred {
            slot: Arc::new(Slot {
                state: Mutex::new(state),
                ready: Condvar::new(),
            }),
            policy,
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// True once the result (value or error) has been published.
    pub fn is_ready(&self) -> bool {
        match self.slot.lock() {
            Ok(state) => matches!(*state, State::Ready(_) | State::Failed(_)),
            Err(_) => false,
        }
    }

    /// Make sure the result is available and return it.
    ///
    /// A pending thunk runs on the calling thread. If another thread is
    /// already running it, this blocks until that thread publishes.
    pub fn force(&self) -> Result<Value> {
        let mut state = self.slot.lock()?;
        loop {
            match std::mem::replace(&mut *state, State::Running) {
                State::Pending(thunk) => {
                    drop(state);
                    return self.run(thunk);
                }
                State::Running => {
                    state = self
                        .slot
                        .ready
                        .wait(state)
                        .map_err(|_| PipelineError::LockPoisoned)?;
                }
                State::Ready(value) => {
                    *state = State::Ready(value);
                    return Ok(value);
                }
                State::Failed(err) => {
                    *state = State::Failed(err.clone());
                    return Err(err);
                }
            }
        }
    }

    fn run(&self, thunk: Thunk) -> Result<Value> {
        tracing::trace!(policy = %self.policy, "running deferred computation");

        let outcome = match panic::catch_unwind(AssertUnwindSafe(thunk)) {
            Ok(result) => result,
            Err(payload) => Err(PipelineError::from_panic(payload)),
        };

        {
            let mut state = self.slot.lock()?;
            *state = match &outcome {
                Ok(value) => State::Ready(*value),
                Err(err) => State::Failed(err.clone()),
            };
        }
        self.slot.ready.notify_all();

        outcome
    }

    /// A new cell, under the same policy, that forces `self` and applies
    /// `stage` to the result. Nothing is forced here.
    pub fn then(&self, stage: Stage) -> Deferred {
        let input = self.clone();
        Deferred::new(self.policy, move || input.force().map(|value| stage(value)))
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.slot.state.try_lock() {
            Ok(state) => match &*state {
                State::Pending(_) => "pending".to_string(),
                State::Running => "running".to_string(),
                State::Ready(value) => format!("ready({})", value),
                State::Failed(err) => format!("failed({})", err),
            },
            Err(_) => "locked".to_string(),
        };
        f.debug_struct("Deferred")
            .field("policy", &self.policy)
            .field("state", &state)
            .finish()
    }
}
