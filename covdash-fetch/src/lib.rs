// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `CovDash` Fetch
//!
//! The asynchronous data access facade for `CovDash`.
//!
//! ## Facade
//!
//! - [`DataService`] - Filtered records, summary stats, and trend data over
//!   any [`RecordSource`](covdash_core::RecordSource), with simulated latency
//! - [`ServiceLatency`] - Per-operation latency
//!
//! ## Request Coordination
//!
//! - [`RequestTracker`] - Generations for discarding stale responses
//! - [`Debouncer`] - Collapses bursts of input into the last value
//!
//! ## Example
//!
//! ```ignore
//! use covdash_fetch::{DataService, RequestTracker};
//! use covdash_store::mock_dataset;
//!
//! let service = DataService::new(mock_dataset(42, today));
//! let tracker = RequestTracker::new();
//!
//! let generation = tracker.begin();
//! let records = service.fetch_api_data(Some(criteria)).await?;
//! if let Some(records) = tracker.accept(generation, records) {
//!     render(&records);
//! }
//! ```

pub mod debounce;
pub mod error;
pub mod generation;
pub mod service;

pub use debounce::{Debouncer, DEFAULT_QUIET_PERIOD};
pub use error::FetchError;
pub use generation::{Generation, RequestTracker};
pub use service::{DataService, DataServiceBuilder, ServiceLatency};
