//! Resource boundary module
//!
//! Opaque handles and the traits through which geometry and assets
//! enter the scene graph.

mod mesh_factory;
mod asset_loader;

pub use mesh_factory::{GeometryHandle, MeshKind, MeshFactory};
pub use asset_loader::{
    ResourceHandle, AssetPoll, PendingAsset, AssetPromise, AssetLoader,
    AssetAttachQueue, AttachFn, asset_channel,
};
