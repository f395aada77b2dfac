//! Core types and shared functionality for lmu-races.
//!
//! This crate provides:
//! - Race data model (flat slots and grouped schedules)
//! - In-memory store with atomic snapshot publishing
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod model;
pub mod store;

pub use config::{AppConfig, ConfigError, EVICTION_PERIOD};
pub use error::Error;
pub use model::{RaceDescriptor, RaceSchedule, RaceSlot};
pub use store::{Store, StoreSnapshot};
