//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of the storage traits
//! that keeps observations in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. It
//! enforces the same batch constraints as the table service and can simulate
//! slow table activation.
//!
//! # Example
//!
//! ```rust,ignore
//! use fredseries::storage::inmemory::InMemoryRepository;
//! use fredseries_core::table::fred_table_config;
//!
//! let repo = InMemoryRepository::new(fred_table_config());
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
