//! Pure domain logic for the datacenter inventory and monitoring platform.
//!
//! Everything in this crate is stateless and side-effect free: the API and
//! repository layers materialise rack/server records, call in, and persist
//! or serialise whatever comes back. That keeps the capacity arithmetic and
//! the metrics simulation testable in isolation and trivially safe to call
//! concurrently.

pub mod alert;
pub mod capacity;
pub mod error;
pub mod metrics;
pub mod overview;
pub mod position;
pub mod types;
