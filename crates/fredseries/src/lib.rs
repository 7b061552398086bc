//! Import a FRED time series CSV into DynamoDB and query it by date.
//!
//! The pure parts (CSV validation, schema, provisioning plans, query
//! parsing) live in `fredseries_core`. This crate wires them to the network:
//! the CSV source over HTTP, DynamoDB through `aws-sdk-dynamodb`, and the CLI
//! and Lambda entry points.

pub mod config;
pub mod error;
pub mod importer;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod output;
pub mod query;
pub mod source;
pub mod storage;
pub mod telemetry;
pub mod writer;

pub use config::Config;
pub use error::{AppError, Result};
