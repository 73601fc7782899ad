//! Scene importer: glTF file -> [`ModelData`].
//!
//! Import is all-or-nothing at the scene level: any failure to open, parse
//! or resolve the scene returns an error and no partial model escapes.
//! Texture decode failures stay local (see [`crate::cache`]) and never abort
//! the import.

use std::fs;
use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use gltf::Gltf;
use thiserror::Error;

use crate::cache::{TextureCache, TextureImage};
use crate::material::{self, Material, MaterialChannel, SlotMapping};
use crate::mesh::{MeshData, TextureSlot, Vertex};
use crate::scene::{SceneGraph, SceneNode};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("scene parse failed: {0}")]
    Parse(#[from] gltf::Error),
    #[error("scene has no root nodes")]
    EmptyScene,
    #[error("unsupported buffer source: {0}")]
    UnsupportedBuffer(String),
    #[error("buffer {index} shorter than declared ({actual} < {expected} bytes)")]
    BufferTooShort {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// Post-processing applied while extracting primitives.
#[derive(Clone, Debug)]
pub struct ImportSettings {
    /// Flip the V texture coordinate to match the renderer's convention.
    pub flip_uvs: bool,
    /// Derive a tangent basis for primitives that have UVs but no tangents.
    pub generate_tangents: bool,
    pub slot_mapping: SlotMapping,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            flip_uvs: true,
            generate_tangents: true,
            slot_mapping: SlotMapping::default(),
        }
    }
}

/// Imported model: meshes in traversal order plus the decoded image table.
///
/// `images[id]` backs every [`crate::mesh::TextureRef`] with that id; the
/// table is scoped to this model, so two models never share entries.
#[derive(Debug, Default)]
pub struct ModelData {
    pub meshes: Vec<MeshData>,
    pub images: Vec<TextureImage>,
    /// Directory the texture paths were resolved against.
    pub directory: PathBuf,
}

impl ModelData {
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn texture_count(&self) -> usize {
        self.images.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len() / 3).sum()
    }
}

/// Import a scene file into CPU-side mesh and image data.
///
/// The scene graph is copied into an owned arena and walked depth-first,
/// meshes of a node before its children, children left to right. One
/// [`MeshData`] is appended per scene-mesh primitive encountered.
pub fn import_model(
    path: impl AsRef<Path>,
    settings: &ImportSettings,
) -> Result<ModelData, ImportError> {
    let path = path.as_ref();
    log::info!("importing model {}", path.display());

    let gltf = Gltf::open(path).map_err(|err| match err {
        gltf::Error::Io(source) => ImportError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => ImportError::Parse(other),
    })?;
    let directory = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let buffers = resolve_buffers(&gltf, &directory)?;
    let document = &gltf.document;
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(ImportError::EmptyScene)?;
    if scene.nodes().next().is_none() {
        return Err(ImportError::EmptyScene);
    }

    // Flatten mesh primitives: one drawable mesh per primitive, with a map
    // from glTF mesh index to the flat ids.
    let mut primitives = Vec::new();
    let mut mesh_index_map: Vec<Vec<usize>> = Vec::new();
    for mesh in document.meshes() {
        let mut flat = Vec::new();
        for primitive in mesh.primitives() {
            flat.push(primitives.len());
            primitives.push(primitive);
        }
        mesh_index_map.push(flat);
    }

    let materials = copy_materials(document);
    let graph = build_scene_graph(document, &scene, &mesh_index_map);

    let mut cache = TextureCache::new(&directory);
    let mut meshes = Vec::new();
    for node_index in graph.walk() {
        for &flat in &graph.node(node_index).meshes {
            if let Some(mesh) =
                extract_primitive(&primitives[flat], &buffers, &materials, settings, &mut cache)
            {
                meshes.push(mesh);
            }
        }
    }

    log::info!(
        "imported {} meshes, {} textures from {}",
        meshes.len(),
        cache.len(),
        path.display()
    );
    Ok(ModelData {
        meshes,
        images: cache.into_images(),
        directory,
    })
}

/// Resolve buffer payloads: the GLB blob or sibling binary files.
fn resolve_buffers(gltf: &Gltf, directory: &Path) -> Result<Vec<Vec<u8>>, ImportError> {
    let mut buffers = Vec::new();
    for buffer in gltf.document.buffers() {
        let data = match buffer.source() {
            gltf::buffer::Source::Bin => gltf
                .blob
                .clone()
                .ok_or_else(|| ImportError::UnsupportedBuffer("missing GLB binary chunk".into()))?,
            gltf::buffer::Source::Uri(uri) => {
                if uri.starts_with("data:") {
                    return Err(ImportError::UnsupportedBuffer(format!(
                        "data URI payload in buffer {}",
                        buffer.index()
                    )));
                }
                let path = directory.join(uri);
                fs::read(&path).map_err(|source| ImportError::Io { path, source })?
            }
        };
        if data.len() < buffer.length() {
            return Err(ImportError::BufferTooShort {
                index: buffer.index(),
                expected: buffer.length(),
                actual: data.len(),
            });
        }
        buffers.push(data);
    }
    Ok(buffers)
}

/// Copy material texture declarations out of the document into owned values.
fn copy_materials(document: &gltf::Document) -> Vec<Material> {
    document
        .materials()
        .map(|mat| {
            let mut out = Material {
                name: mat.name().map(String::from),
                ..Material::default()
            };
            let pbr = mat.pbr_metallic_roughness();
            if let Some(info) = pbr.base_color_texture() {
                push_image_path(&mut out, MaterialChannel::BaseColor, &info.texture());
            }
            if let Some(info) = pbr.metallic_roughness_texture() {
                push_image_path(&mut out, MaterialChannel::MetallicRoughness, &info.texture());
            }
            if let Some(normal) = mat.normal_texture() {
                push_image_path(&mut out, MaterialChannel::Normal, &normal.texture());
            }
            if let Some(occlusion) = mat.occlusion_texture() {
                push_image_path(&mut out, MaterialChannel::Occlusion, &occlusion.texture());
            }
            if let Some(info) = mat.emissive_texture() {
                push_image_path(&mut out, MaterialChannel::Emissive, &info.texture());
            }
            out
        })
        .collect()
}

fn push_image_path(material: &mut Material, channel: MaterialChannel, texture: &gltf::Texture) {
    match texture.source().source() {
        gltf::image::Source::Uri { uri, .. } => material.push_texture(channel, uri),
        gltf::image::Source::View { .. } => {
            log::warn!("embedded image in {channel:?} channel skipped; only file URIs are cached");
        }
    }
}

/// Copy the parser's node hierarchy into an owned arena, index-aligned with
/// the document's node list.
fn build_scene_graph(
    document: &gltf::Document,
    scene: &gltf::Scene,
    mesh_index_map: &[Vec<usize>],
) -> SceneGraph {
    let mut graph = SceneGraph::new();
    for node in document.nodes() {
        let meshes = node
            .mesh()
            .map(|m| mesh_index_map[m.index()].clone())
            .unwrap_or_default();
        let children = node.children().map(|c| c.index()).collect();
        graph.add_node(SceneNode {
            name: node.name().map(String::from),
            meshes,
            children,
        });
    }
    for root in scene.nodes() {
        graph.add_root(root.index());
    }
    graph
}

/// Turn one primitive into a [`MeshData`], resolving its material slots.
///
/// Returns `None` (with a diagnostic) for primitives the pipeline cannot
/// draw: missing positions or a non-triangle topology.
fn extract_primitive(
    primitive: &gltf::Primitive,
    buffers: &[Vec<u8>],
    materials: &[Material],
    settings: &ImportSettings,
    cache: &mut TextureCache,
) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));

    let Some(positions) = reader.read_positions() else {
        log::warn!("skipping primitive without positions");
        return None;
    };
    let mut vertices: Vec<Vertex> = positions.map(Vertex::at).collect();
    let vertex_count = vertices.len() as u32;

    if let Some(normals) = reader.read_normals() {
        for (v, n) in vertices.iter_mut().zip(normals) {
            v.normal = n;
        }
    }
    let has_uvs = if let Some(uvs) = reader.read_tex_coords(0) {
        for (v, uv) in vertices.iter_mut().zip(uvs.into_f32()) {
            v.uv = if settings.flip_uvs {
                [uv[0], 1.0 - uv[1]]
            } else {
                uv
            };
        }
        true
    } else {
        false
    };
    let has_tangents = if let Some(tangents) = reader.read_tangents() {
        for (v, t) in vertices.iter_mut().zip(tangents) {
            let tangent = Vec3::new(t[0], t[1], t[2]);
            v.tangent = tangent.to_array();
            // w carries handedness per the glTF convention.
            v.bitangent = (Vec3::from(v.normal).cross(tangent) * t[3]).to_array();
        }
        true
    } else {
        false
    };
    if let Some(joints) = reader.read_joints(0) {
        for (v, j) in vertices.iter_mut().zip(joints.into_u16()) {
            v.bone_indices = [j[0] as i32, j[1] as i32, j[2] as i32, j[3] as i32];
        }
    }
    if let Some(weights) = reader.read_weights(0) {
        for (v, w) in vertices.iter_mut().zip(weights.into_f32()) {
            v.bone_weights = w;
        }
    }

    let raw_indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..vertex_count).collect(),
    };
    let Some(indices) = triangulate(primitive.mode(), raw_indices) else {
        log::warn!(
            "skipping primitive with non-triangle mode {:?}",
            primitive.mode()
        );
        return None;
    };

    if settings.generate_tangents && has_uvs && !has_tangents {
        generate_tangents(&mut vertices, &indices);
    }

    let mut textures = Vec::new();
    if let Some(material_index) = primitive.material().index() {
        if let Some(material) = materials.get(material_index) {
            for slot in TextureSlot::ALL {
                textures.extend(material::resolve_slot(
                    material,
                    slot,
                    &settings.slot_mapping,
                    cache,
                ));
            }
        }
    }

    Some(MeshData::new(vertices, indices, textures))
}

/// Rewrite strip/fan index lists as triangle lists; `None` for topologies
/// the pipeline does not draw.
fn triangulate(mode: gltf::mesh::Mode, indices: Vec<u32>) -> Option<Vec<u32>> {
    use gltf::mesh::Mode;
    match mode {
        Mode::Triangles => Some(indices),
        Mode::TriangleStrip => {
            let mut out = Vec::with_capacity(indices.len().saturating_sub(2) * 3);
            for (i, tri) in indices.windows(3).enumerate() {
                let (a, b, c) = (tri[0], tri[1], tri[2]);
                if a == b || b == c || a == c {
                    // Degenerate triangle used as a strip restart.
                    continue;
                }
                if i % 2 == 0 {
                    out.extend([a, b, c]);
                } else {
                    out.extend([b, a, c]);
                }
            }
            Some(out)
        }
        Mode::TriangleFan => {
            let mut out = Vec::with_capacity(indices.len().saturating_sub(2) * 3);
            for tri in indices.windows(2).skip(1) {
                out.extend([indices[0], tri[0], tri[1]]);
            }
            Some(out)
        }
        _ => None,
    }
}

/// Per-triangle UV-gradient tangent accumulation (Lengyel's method), with a
/// Gram-Schmidt pass against the vertex normal.
fn generate_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    let mut tan = vec![Vec3::ZERO; vertices.len()];
    let mut bitan = vec![Vec3::ZERO; vertices.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let p0 = Vec3::from(vertices[i0].position);
        let p1 = Vec3::from(vertices[i1].position);
        let p2 = Vec3::from(vertices[i2].position);
        let uv0 = Vec2::from(vertices[i0].uv);
        let uv1 = Vec2::from(vertices[i1].uv);
        let uv2 = Vec2::from(vertices[i2].uv);

        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let d1 = uv1 - uv0;
        let d2 = uv2 - uv0;
        let det = d1.x * d2.y - d2.x * d1.y;
        if det.abs() < 1e-8 {
            continue;
        }
        let r = 1.0 / det;
        let t = (e1 * d2.y - e2 * d1.y) * r;
        let b = (e2 * d1.x - e1 * d2.x) * r;
        for &i in &[i0, i1, i2] {
            tan[i] += t;
            bitan[i] += b;
        }
    }

    for (v, (t, b)) in vertices.iter_mut().zip(tan.into_iter().zip(bitan)) {
        let n = Vec3::from(v.normal);
        let mut tangent = t - n * n.dot(t);
        if tangent.length_squared() < 1e-12 {
            tangent = Vec3::X;
        } else {
            tangent = tangent.normalize();
        }
        let handedness = if n.cross(tangent).dot(b) < 0.0 {
            -1.0
        } else {
            1.0
        };
        v.tangent = tangent.to_array();
        v.bitangent = (n.cross(tangent) * handedness).to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::TextureSlot;

    // Fixture geometry: one triangle in the XY plane with normals and UVs.
    // Layout: positions [0,36), normals [36,72), uvs [72,96), u16 indices
    // [96,102).
    const GEOM_BYTE_LEN: usize = 102;

    fn fixture_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("ocean3d-import-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create fixture dir");
        dir
    }

    fn write_geom_bin(dir: &Path) {
        let mut bytes = Vec::with_capacity(GEOM_BYTE_LEN);
        let positions: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let normals: [[f32; 3]; 3] = [[0.0, 0.0, 1.0]; 3];
        let uvs: [[f32; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        for p in positions.iter().flatten() {
            bytes.extend_from_slice(&p.to_le_bytes());
        }
        for n in normals.iter().flatten() {
            bytes.extend_from_slice(&n.to_le_bytes());
        }
        for t in uvs.iter().flatten() {
            bytes.extend_from_slice(&t.to_le_bytes());
        }
        for i in [0u16, 1, 2] {
            bytes.extend_from_slice(&i.to_le_bytes());
        }
        assert_eq!(bytes.len(), GEOM_BYTE_LEN);
        std::fs::write(dir.join("geom.bin"), bytes).expect("write bin fixture");
    }

    fn write_png(dir: &Path, name: &str) {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 100, 50, 255]));
        img.save(dir.join(name)).expect("write png fixture");
    }

    const MESH_TEXTURED: &str = r#"{ "primitives": [ { "attributes": { "POSITION": 0, "NORMAL": 1, "TEXCOORD_0": 2 }, "indices": 3, "material": 0 } ] }"#;
    const MESH_PLAIN: &str = r#"{ "primitives": [ { "attributes": { "POSITION": 0, "NORMAL": 1, "TEXCOORD_0": 2 }, "indices": 3 } ] }"#;

    fn scene_json(
        roots: &str,
        nodes: &str,
        meshes: &str,
        materials: &str,
        textures: &str,
        images: &str,
    ) -> String {
        format!(
            r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [ {{ "nodes": [ {roots} ] }} ],
  "nodes": [ {nodes} ],
  "meshes": [ {meshes} ],
  "materials": [ {materials} ],
  "textures": [ {textures} ],
  "images": [ {images} ],
  "buffers": [ {{ "uri": "geom.bin", "byteLength": {GEOM_BYTE_LEN} }} ],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
    {{ "buffer": 0, "byteOffset": 36, "byteLength": 36 }},
    {{ "buffer": 0, "byteOffset": 72, "byteLength": 24 }},
    {{ "buffer": 0, "byteOffset": 96, "byteLength": 6 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
    {{ "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3" }},
    {{ "bufferView": 2, "componentType": 5126, "count": 3, "type": "VEC2" }},
    {{ "bufferView": 3, "componentType": 5123, "count": 3, "type": "SCALAR" }}
  ]
}}"#
        )
    }

    fn write_scene(dir: &Path, json: &str) -> PathBuf {
        write_geom_bin(dir);
        let path = dir.join("scene.gltf");
        std::fs::write(&path, json).expect("write gltf fixture");
        path
    }

    #[test]
    fn missing_normal_texture_yields_uninitialized_ref() {
        let dir = fixture_dir("scenario");
        write_png(&dir, "tex.png");
        // missing.png deliberately absent.
        let json = scene_json(
            "0",
            r#"{ "mesh": 0, "name": "root" }"#,
            MESH_TEXTURED,
            r#"{ "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } }, "normalTexture": { "index": 1 } }"#,
            r#"{ "source": 0 }, { "source": 1 }"#,
            r#"{ "uri": "tex.png" }, { "uri": "missing.png" }"#,
        );
        let path = write_scene(&dir, &json);

        let model = import_model(&path, &ImportSettings::default()).expect("import");
        assert_eq!(model.mesh_count(), 1);
        let mesh = &model.meshes[0];
        assert_eq!(mesh.textures.len(), 2);
        assert_eq!(mesh.textures[0].slot, TextureSlot::Diffuse);
        assert_eq!(mesh.textures[0].path, "tex.png");
        assert!(model.images[mesh.textures[0].texture].pixels.is_some());
        assert_eq!(mesh.textures[1].slot, TextureSlot::Normal);
        assert!(model.images[mesh.textures[1].texture].pixels.is_none());
        assert_eq!(model.texture_count(), 2);
    }

    #[test]
    fn shared_texture_path_is_decoded_once() {
        let dir = fixture_dir("dedup");
        write_png(&dir, "tex.png");
        // Two nodes drawing the same textured mesh.
        let json = scene_json(
            "0, 1",
            r#"{ "mesh": 0 }, { "mesh": 0 }"#,
            MESH_TEXTURED,
            r#"{ "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } } }"#,
            r#"{ "source": 0 }"#,
            r#"{ "uri": "tex.png" }"#,
        );
        let path = write_scene(&dir, &json);

        let model = import_model(&path, &ImportSettings::default()).expect("import");
        assert_eq!(model.mesh_count(), 2);
        assert_eq!(model.texture_count(), 1);
        assert_eq!(
            model.meshes[0].textures[0].texture,
            model.meshes[1].textures[0].texture
        );
    }

    #[test]
    fn reimport_gets_an_independent_image_table() {
        let dir = fixture_dir("reimport");
        write_png(&dir, "tex.png");
        let json = scene_json(
            "0",
            r#"{ "mesh": 0 }"#,
            MESH_TEXTURED,
            r#"{ "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } } }"#,
            r#"{ "source": 0 }"#,
            r#"{ "uri": "tex.png" }"#,
        );
        let path = write_scene(&dir, &json);

        let first = import_model(&path, &ImportSettings::default()).expect("first import");
        let second = import_model(&path, &ImportSettings::default()).expect("second import");
        // No cross-model dedup: each import decoded the file into its own table.
        assert_eq!(first.texture_count(), 1);
        assert_eq!(second.texture_count(), 1);
        assert!(second.images[0].pixels.is_some());
    }

    #[test]
    fn traversal_appends_meshes_depth_first() {
        let dir = fixture_dir("traversal");
        write_png(&dir, "tex.png");
        // root(mesh0 textured) -> [child(mesh1 plain) -> [grandchild(mesh0)], sibling(mesh1)]
        let json = scene_json(
            "0",
            r#"{ "mesh": 0, "children": [1, 3], "name": "root" },
               { "mesh": 1, "children": [2], "name": "child" },
               { "mesh": 0, "name": "grandchild" },
               { "mesh": 1, "name": "sibling" }"#,
            &format!("{MESH_TEXTURED}, {MESH_PLAIN}"),
            r#"{ "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } } }"#,
            r#"{ "source": 0 }"#,
            r#"{ "uri": "tex.png" }"#,
        );
        let path = write_scene(&dir, &json);

        let model = import_model(&path, &ImportSettings::default()).expect("import");
        // Sum of per-node mesh counts, every node visited exactly once.
        assert_eq!(model.mesh_count(), 4);
        // Depth-first order: textured, plain, textured, plain.
        let textured: Vec<bool> = model.meshes.iter().map(|m| !m.textures.is_empty()).collect();
        assert_eq!(textured, vec![true, false, true, false]);
    }

    #[test]
    fn import_of_missing_file_fails() {
        let err = import_model("/no/such/scene.gltf", &ImportSettings::default()).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }

    #[test]
    fn missing_buffer_payload_fails_the_whole_import() {
        let dir = fixture_dir("nobuffer");
        write_png(&dir, "tex.png");
        let json = scene_json(
            "0",
            r#"{ "mesh": 0 }"#,
            MESH_TEXTURED,
            r#"{ "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } } }"#,
            r#"{ "source": 0 }"#,
            r#"{ "uri": "tex.png" }"#,
        );
        // No geom.bin on disk: all-or-nothing, not a partial model.
        let path = dir.join("scene.gltf");
        std::fs::write(&path, json).expect("write gltf fixture");
        let err = import_model(&path, &ImportSettings::default()).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }

    #[test]
    fn uvs_are_flipped_and_tangents_generated() {
        let dir = fixture_dir("tangents");
        write_png(&dir, "tex.png");
        let json = scene_json(
            "0",
            r#"{ "mesh": 0 }"#,
            MESH_TEXTURED,
            r#"{ "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } } }"#,
            r#"{ "source": 0 }"#,
            r#"{ "uri": "tex.png" }"#,
        );
        let path = write_scene(&dir, &json);

        let model = import_model(&path, &ImportSettings::default()).expect("import");
        let mesh = &model.meshes[0];
        // Source v=0 becomes v=1 under the flip.
        assert!((mesh.vertices[0].uv[1] - 1.0).abs() < 1e-6);
        // XY-plane triangle with u increasing along +X: tangent is +X.
        let t = mesh.vertices[0].tangent;
        assert!((t[0] - 1.0).abs() < 1e-4, "tangent {t:?}");
        assert!(t[1].abs() < 1e-4 && t[2].abs() < 1e-4, "tangent {t:?}");
        // Indices stay within the vertex buffer.
        let max = *mesh.indices.iter().max().unwrap();
        assert!((max as usize) < mesh.vertices.len());

        let unflipped = import_model(
            &path,
            &ImportSettings {
                flip_uvs: false,
                ..ImportSettings::default()
            },
        )
        .expect("import unflipped");
        assert!(unflipped.meshes[0].vertices[0].uv[1].abs() < 1e-6);
    }

    #[test]
    fn strips_and_fans_become_triangle_lists() {
        use gltf::mesh::Mode;
        assert_eq!(
            triangulate(Mode::TriangleStrip, vec![0, 1, 2, 3]),
            Some(vec![0, 1, 2, 2, 1, 3])
        );
        assert_eq!(
            triangulate(Mode::TriangleFan, vec![0, 1, 2, 3]),
            Some(vec![0, 1, 2, 0, 2, 3])
        );
        // Strip restart via degenerate triangles is dropped entirely.
        assert_eq!(triangulate(Mode::TriangleStrip, vec![0, 1, 1, 2]), Some(vec![]));
        assert_eq!(triangulate(Mode::Lines, vec![0, 1]), None);
        assert_eq!(
            triangulate(Mode::Triangles, vec![0, 1, 2]),
            Some(vec![0, 1, 2])
        );
    }
}
