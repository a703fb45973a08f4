// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `CovDash` Store
//!
//! Dataset loading and configuration for `CovDash`.
//!
//! This crate provides:
//!
//! - **`RecordStore`**: The immutable, shared record set of a session
//! - **Ingestion**: Joining raw coverage and usage exports into records
//! - **Sources**: [`RecordSource`](covdash_core::RecordSource) backends
//!   over memory and dataset directories
//! - **Mock dataset**: A seeded demonstration dataset
//! - **Config**: User configuration with persistence
//!
//! ## Usage
//!
//! ```ignore
//! use covdash_store::{mock_dataset, Config, JsonDirSource, DatasetSource};
//!
//! let config = Config::load().await?;
//! let source: DatasetSource = match &config.data.data_dir {
//!     Some(dir) => JsonDirSource::new(dir, today).into(),
//!     None => mock_dataset(config.data.seed, today).into(),
//! };
//! ```

pub mod config;
pub mod error;
pub mod ingest;
pub mod mock;
pub mod persistence;
pub mod record_store;
pub mod source;

pub use config::{Config, DataConfig, DisplayConfig, EngineConfig, ServiceConfig};
pub use error::StoreError;
pub use ingest::{join, ApiCoverage, ApiUsage, CoverageEntry, DEFAULT_TOTAL_CLIENTS};
pub use mock::{mock_dataset, mock_records, mock_trend, mock_usage, DEFAULT_SEED};
pub use persistence::{
    default_config_dir, default_config_path, default_data_dir, load_json, load_json_opt,
    save_json,
};
pub use record_store::RecordStore;
pub use source::{DatasetSource, JsonDirSource};

#[cfg(test)]
mod persistence_tests;
