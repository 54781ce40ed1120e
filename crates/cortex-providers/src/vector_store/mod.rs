//! Vector Store Provider Implementations
//!
//! Backs the semantic (vector) per-artifact index.
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`NullVectorStoreProvider`] | No-op stub, default outside tests requiring data |
//! | [`InMemoryVectorStoreProvider`] | `memory` kind: in-process, non-persistent |
//! | [`FilesystemVectorStoreProvider`] | `filesystem` kind: one JSON file per collection |

#[cfg(feature = "vectorstore-filesystem")]
pub mod filesystem;
pub mod in_memory;
pub mod null;

#[cfg(feature = "vectorstore-filesystem")]
pub use filesystem::FilesystemVectorStoreProvider;
pub use in_memory::InMemoryVectorStoreProvider;
pub use null::NullVectorStoreProvider;
