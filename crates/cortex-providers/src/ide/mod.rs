//! IDE collaborator implementations

mod null;

pub use null::NullIdeContext;
