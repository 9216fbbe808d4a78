//! Error types shared across the crate.
//!
//! Per-frame work (`update` / `render`) never returns errors. Everything that
//! can fail happens at setup time (loading configuration, meshes and images,
//! wiring the hierarchy, creating the GPU backend) and reports an
//! [`OrreryError`] through the crate-wide [`Result`] alias.

use thiserror::Error;

use crate::world::EntityId;

/// Errors raised while assembling or loading a scene.
#[derive(Debug, Error)]
pub enum OrreryError {
    /// Reading a file from disk failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document (configuration, bindings, mesh) did not parse.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An image could not be decoded.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Mesh data is structurally inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// An [`EntityId`] does not belong to the world it was used with.
    #[error("Unknown entity {0:?}")]
    UnknownEntity(EntityId),

    /// Parenting `child` under `parent` would make the hierarchy cyclic.
    #[error("Parenting {child:?} under {parent:?} would create a cycle")]
    ParentCycle { child: EntityId, parent: EntityId },

    /// The renderer backend could not be created or driven.
    #[error("Renderer backend error: {0}")]
    Backend(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, OrreryError>;
