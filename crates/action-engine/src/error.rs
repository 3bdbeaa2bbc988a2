//! Error types surfaced by the scheduler API.
//!
//! The lifecycle itself never fails: degenerate configuration completes
//! instantly and missing callbacks are no-ops. Only handle-based operations on
//! the [`Scheduler`](crate::Scheduler) can be handed something they cannot act on.

use thiserror::Error;

use crate::scheduler::ActionId;

pub type Result<T> = std::result::Result<T, SchedulerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The handle never existed, or its action already finished and the slot
    /// was recycled.
    #[error("no running action for {0}")]
    UnknownAction(ActionId),
}
