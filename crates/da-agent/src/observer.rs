//! Controller observer trait for metrics and visualization.

use da_core::Tick;

use crate::{ControllerState, ExecutionSnapshot, RunSummary, SearchRecord};

/// Callbacks invoked by [`Controller::step`][crate::Controller::step] and
/// [`Controller::run`][crate::Controller::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: block counter
///
/// ```rust,ignore
/// struct BlockCounter(u32);
///
/// impl ControllerObserver for BlockCounter {
///     fn on_transition(&mut self, _tick: Tick, _from: &ControllerState, to: &ControllerState) {
///         if *to == ControllerState::Blocked {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait ControllerObserver {
    /// Called whenever the state changes.  Moves within `Executing` are
    /// reported through [`on_step`](Self::on_step) instead.
    fn on_transition(&mut self, _tick: Tick, _from: &ControllerState, _to: &ControllerState) {}

    /// Called once per planner invocation, successful or not.
    fn on_search(&mut self, _record: &SearchRecord) {}

    /// Called after every move.
    fn on_step(&mut self, _snapshot: &ExecutionSnapshot) {}

    /// Called once by `run` after a terminal state is reached.
    fn on_finish(&mut self, _summary: &RunSummary) {}
}

/// A [`ControllerObserver`] that does nothing.
pub struct NoopObserver;

impl ControllerObserver for NoopObserver {}
