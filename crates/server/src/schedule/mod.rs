//! Background maintenance loops over the shared store.
//!
//! Both loops hold a [`Store`](lmu_races_core::Store) handle only and stop when
//! the shared cancellation token fires.

pub mod eviction;
pub mod refresh;

pub use eviction::{Clock, EvictionScheduler, SystemClock};
pub use refresh::RefreshScheduler;
