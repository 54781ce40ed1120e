//! Domain Layer
//!
//! Core business types and contracts for the incremental multi-index engine
//! and completion pipeline. This layer has no dependency on any concrete
//! storage, embedding, or transport technology: it defines entities, value
//! objects, port traits and repository traits that the application layer
//! orchestrates and the infrastructure/providers layers implement.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`entities`] | Tags, content-addressed paths, chunks, completion state |
//! | [`value_objects`] | Embeddings and search results |
//! | [`ports`] | Contracts for catalog, embedding, vector store and cache providers |
//! | [`repositories`] | Contracts for chunk and search persistence |
//! | [`error`] | Shared error and result types |
//! | [`constants`] | Tunable defaults for indexing and chunking |

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod repositories;
pub mod value_objects;

pub use error::{Error, Result};
