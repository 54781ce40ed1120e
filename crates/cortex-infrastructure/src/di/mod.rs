//! Composition root
//!
//! Wires the concrete provider implementations selected by [`crate::config::AppConfig`]
//! into an [`AppContext`] via plain constructor calls — no reflection, no
//! container, no runtime service lookup. The server crate builds one
//! `AppContext` at startup and passes it by reference to everything that
//! needs a provider.

pub mod bootstrap;

pub use bootstrap::{build, AppContext};
