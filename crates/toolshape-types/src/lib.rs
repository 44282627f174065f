//! Core types for toolshape.
//!
//! This crate defines the tool, schema, dialect configuration and model
//! catalog data structures shared with the runtime. It contains no business
//! logic.

pub mod config;
pub mod error;
pub mod model_catalog;
pub mod schema;
pub mod tool;
