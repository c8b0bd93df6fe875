//! `juahustle-app` library crate.
//!
//! Composition root pieces ([`config`], [`state`]), the session provider,
//! user-facing [`notice`]s and the view controllers. The binary entrypoint
//! lives in `main.rs`.

pub mod config;
pub mod error;
pub mod notice;
pub mod session;
pub mod state;
pub mod views;
