//! Tool parameter schema normalization for LLM providers.
//!
//! Providers accept different subsets of JSON Schema for function calling.
//! This crate rewrites tool parameter schemas per target provider: it merges
//! discriminated `anyOf` unions into one object schema and rewrites schemas
//! into the reduced dialect some providers require. It also carries the tool
//! set used to dispatch calls and the model catalog cache.

pub mod dialect;
pub mod literal;
pub mod model_catalog;
pub mod normalize;
pub mod property_merge;
pub mod tool_set;
pub mod union_flatten;
