//! Storage backend implementations.
//!
//! This module provides concrete implementations of the storage traits
//! defined in `fredseries_core::storage`:
//!
//! - `dynamodb`: AWS DynamoDB backend using `aws-sdk-dynamodb`
//! - `inmemory`: process-local backend used by tests

pub mod dynamodb;
pub mod inmemory;

pub use dynamodb::DynamoDbRepository;
pub use inmemory::InMemoryRepository;
