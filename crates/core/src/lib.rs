//! Functional core for the fredseries importer and query handler.
//!
//! Everything in this crate is pure: CSV row validation, table schema and
//! provisioning plans, query event parsing, and the repository traits the
//! imperative shell implements. No network or AWS access happens here.

pub mod observation;
pub mod query;
pub mod storage;
pub mod table;
