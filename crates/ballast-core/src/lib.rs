//! Ballast Core Library
//!
//! Core domain logic for the ballast sort-priority toolkit: weight tables
//! and the resolution rule, the weight-table editor, the processor registry,
//! and the reference indexing host they run against.

pub mod catalog;
pub mod config;
pub mod engagement;
pub mod error;
pub mod fields;
pub mod form;
pub mod item;
pub mod logging;
pub mod pipeline;
pub mod processor;
pub mod records;
pub mod schema;
pub mod stats_db;
pub mod store;
pub mod weight;
