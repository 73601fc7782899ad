//! GPU-resident model: the uploaded counterpart of [`asset::ModelData`].

use asset::{ModelData, TextureSlot};
use wgpu::{Device, Queue, RenderPass};

use crate::mesh::{GpuMesh, MaterialLayout};
use crate::texture::{self, GpuTexture};

pub struct GpuModel {
    meshes: Vec<GpuMesh>,
}

impl GpuModel {
    /// Upload every image once (the image table is already deduplicated per
    /// path) and build one GPU mesh per imported mesh. The mesh bind groups
    /// keep the texture views alive after upload.
    pub fn upload(
        device: &Device,
        queue: &Queue,
        data: &ModelData,
        layout: &MaterialLayout,
    ) -> Self {
        let color = color_flags(data);
        let textures: Vec<GpuTexture> = data
            .images
            .iter()
            .zip(&color)
            .map(|(image, &is_color)| texture::upload(device, queue, image, is_color))
            .collect();
        let meshes = data
            .meshes
            .iter()
            .map(|mesh| GpuMesh::build(device, mesh, &textures, layout))
            .collect();
        log::info!(
            "uploaded model: {} meshes, {} textures",
            data.meshes.len(),
            textures.len()
        );
        Self { meshes }
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Draw all meshes in import (traversal) order.
    pub fn draw(&self, rpass: &mut RenderPass<'_>) {
        for mesh in &self.meshes {
            mesh.draw(rpass);
        }
    }
}

/// Per-image color-space classification: an image referenced anywhere as a
/// diffuse map is sampled as sRGB; normal/roughness/height data stays
/// linear.
fn color_flags(data: &ModelData) -> Vec<bool> {
    let mut flags = vec![false; data.images.len()];
    for mesh in &data.meshes {
        for tex in &mesh.textures {
            if tex.slot == TextureSlot::Diffuse {
                if let Some(flag) = flags.get_mut(tex.texture) {
                    *flag = true;
                }
            }
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset::cache::TextureImage;
    use asset::{MeshData, TextureRef};

    fn model_with_refs(image_count: usize, refs: Vec<TextureRef>) -> ModelData {
        let images = (0..image_count)
            .map(|i| TextureImage {
                source: format!("tex{i}.png"),
                pixels: None,
            })
            .collect();
        ModelData {
            meshes: vec![MeshData::new(vec![], vec![], refs)],
            images,
            directory: Default::default(),
        }
    }

    fn tex(texture: usize, slot: TextureSlot) -> TextureRef {
        TextureRef {
            texture,
            slot,
            path: String::new(),
        }
    }

    #[test]
    fn diffuse_references_mark_images_as_color() {
        let model = model_with_refs(
            3,
            vec![
                tex(0, TextureSlot::Diffuse),
                tex(1, TextureSlot::Normal),
                tex(2, TextureSlot::Height),
            ],
        );
        assert_eq!(color_flags(&model), vec![true, false, false]);
    }

    #[test]
    fn any_diffuse_use_wins_for_a_shared_image() {
        // Same image bound as normal data in one mesh, diffuse in another.
        let mut model = model_with_refs(1, vec![tex(0, TextureSlot::Normal)]);
        model
            .meshes
            .push(MeshData::new(vec![], vec![], vec![tex(0, TextureSlot::Diffuse)]));
        assert_eq!(color_flags(&model), vec![true]);
    }

    #[test]
    fn unreferenced_images_default_to_linear() {
        let model = model_with_refs(2, vec![tex(1, TextureSlot::Diffuse)]);
        assert_eq!(color_flags(&model), vec![false, true]);
    }
}
