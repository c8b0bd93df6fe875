//! Shared domain primitives for the JuaHustle marketplace.
//!
//! Every other workspace crate depends on this one for ids, timestamps,
//! roles, the [`CoreError`](error::CoreError) taxonomy and the small set of
//! validation and formatting helpers used by the views.

pub mod currency;
pub mod error;
pub mod ids;
pub mod roles;
pub mod types;
pub mod validation;
