//! Scene asset import: glTF scene graph -> CPU meshes with deduplicated textures.
//!
//! The pipeline is single-threaded and runs once before the render loop:
//! [`import::import_model`] walks the parsed scene graph, resolves material
//! texture slots through a per-import [`cache::TextureCache`], and produces a
//! [`import::ModelData`] ready for GPU upload by the renderer crate.

pub mod cache;
pub mod import;
pub mod material;
pub mod mesh;
pub mod scene;
pub mod texture;

pub use import::{ImportError, ImportSettings, ModelData, import_model};
pub use mesh::{MeshData, TextureId, TextureRef, TextureSlot, Vertex, sampler_uniforms};
