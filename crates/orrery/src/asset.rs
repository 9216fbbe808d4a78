//! # Assets: Meshes and Textures From Disk
//!
//! Two loaders live here:
//!
//! - [`load_mesh`] parses a JSON mesh synchronously. Meshes are needed to
//!   build geometry at assembly time, so there is nothing to wait for.
//! - [`TextureLoader`] decodes images on background threads. The handle it
//!   returns is usable immediately and shows a 1x1 white placeholder until
//!   the real pixels arrive.
//!
//! ## Texture Loading
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  TextureLoader                                          │
//! │                                                         │
//! │  load(path) ──► backend.create_texture(placeholder)     │
//! │             ──► spawn decode thread ──┐                 │
//! │                                       │ (handle, rgba)  │
//! │  rx ◄──────── mpsc channel ◄──────────┘                 │
//! └─────────────────────────────────────────────────────────┘
//!
//! Per frame: poll(backend)
//!   drain rx, backend.update_texture(handle, rgba) for each
//! ```
//!
//! ## Handle Stability
//!
//! A [`TextureHandle`] is an index into the backend's texture storage. When
//! the decoded image arrives, the data at that index is replaced and the
//! handle value stays the same, so a material that stored the handle at
//! assembly time draws the real image from the next frame on.
//!
//! ## Graceful Degradation
//!
//! A missing or undecodable image is logged and the placeholder stays.
//! Nothing panics.
//!
//! ## Mesh JSON
//!
//! ```json
//! { "vertices": [..], "indices": [..], "normals": [..], "texCoords": [..] }
//! ```
//!
//! `normals` and `texCoords` are optional. The mesh is validated, then
//! missing attributes are padded with zeros.

use std::panic;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use crate::error::{OrreryError, Result};
use crate::math::Color;
use crate::mesh::MeshData;
use crate::render::{RenderBackend, TextureHandle, WHITE_TEXEL};

/// Read, validate and pad a JSON mesh.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<MeshData> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mesh = parse_mesh(&text)?;
    log::debug!(
        "Loaded mesh '{}': {} vertices, {} indices",
        path.display(),
        mesh.vertex_count(),
        mesh.indices.len()
    );
    Ok(mesh)
}

/// Parse, validate and pad a JSON mesh document.
pub fn parse_mesh(json: &str) -> Result<MeshData> {
    let mesh: MeshData = serde_json::from_str(json)?;
    mesh.validate()?;
    Ok(mesh.padded())
}

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode an image file into tightly packed RGBA8.
pub fn decode_rgba(path: impl AsRef<Path>) -> Result<Pixels> {
    let image = image::open(path.as_ref())?.to_rgba8();
    let (width, height) = image.dimensions();
    Ok(Pixels {
        width,
        height,
        rgba: image.into_raw(),
    })
}

/// Skybox face files, in cube-map layer order (+X, -X, +Y, -Y, +Z, -Z).
pub const SKYBOX_FACES: [&str; 6] = ["right.png", "left.png", "top.png", "bottom.png", "front.png", "back.png"];

/// Six square faces of a cube map, concatenated in layer order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeFaces {
    pub size: u32,
    pub rgba: Vec<u8>,
}

impl CubeFaces {
    /// Every face a single texel of `color`.
    pub fn solid(color: Color) -> Self {
        let texel = color.to_array().map(|c| (c * 255.0).round() as u8);
        Self {
            size: 1,
            rgba: texel.repeat(6),
        }
    }
}

/// Decode the six [`SKYBOX_FACES`] from `dir`.
///
/// Faces must be square and share one size.
pub fn load_cube_faces(dir: impl AsRef<Path>) -> Result<CubeFaces> {
    let dir = dir.as_ref();
    let mut size = None;
    let mut rgba = Vec::new();
    for face in SKYBOX_FACES {
        let path = dir.join(face);
        let pixels = decode_rgba(&path)?;
        if pixels.width != pixels.height {
            return Err(OrreryError::Backend(format!(
                "skybox face '{}' is {}x{}, expected a square",
                path.display(),
                pixels.width,
                pixels.height
            )));
        }
        match size {
            None => size = Some(pixels.width),
            Some(size) if size != pixels.width => {
                return Err(OrreryError::Backend(format!(
                    "skybox face '{}' is {}px, expected {size}px",
                    path.display(),
                    pixels.width
                )));
            }
            Some(_) => {}
        }
        rgba.extend_from_slice(&pixels.rgba);
    }
    Ok(CubeFaces {
        size: size.unwrap_or(1),
        rgba,
    })
}

/// A finished decode, sent from the worker thread.
struct Decoded {
    handle: TextureHandle,
    path: PathBuf,
    result: Result<Pixels>,
}

/// Loads textures asynchronously behind stable handles.
pub struct TextureLoader {
    tx: mpsc::Sender<Decoded>,
    rx: mpsc::Receiver<Decoded>,
    /// Decodes started but not yet received.
    pending: usize,
}

impl TextureLoader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx, pending: 0 }
    }

    /// Create a placeholder texture and start decoding `path` in the
    /// background. The returned handle is valid immediately.
    pub fn load(&mut self, backend: &mut dyn RenderBackend, path: impl Into<PathBuf>) -> TextureHandle {
        self.load_with(backend, path.into(), |path| decode_rgba(path))
    }

    fn load_with(
        &mut self,
        backend: &mut dyn RenderBackend,
        path: PathBuf,
        decode: fn(&Path) -> Result<Pixels>,
    ) -> TextureHandle {
        let handle = backend.create_texture(1, 1, &WHITE_TEXEL);
        let tx = self.tx.clone();
        let worker_path = path.clone();

        let spawned = thread::Builder::new()
            .name("orrery-texture".into())
            .spawn(move || {
                // A panicking decoder still has to report, or `wait_all` never returns.
                let result = panic::catch_unwind(|| decode(&worker_path))
                    .unwrap_or_else(|_| Err(OrreryError::Backend("texture decoder panicked".into())));
                // Receiver dropped means nobody will poll again.
                let _ = tx.send(Decoded {
                    handle,
                    path: worker_path,
                    result,
                });
            });

        match spawned {
            Ok(_) => self.pending += 1,
            Err(e) => log::error!("Could not start decoding '{}': {e}", path.display()),
        }
        handle
    }

    /// Number of textures still decoding.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Upload every decode that has finished. Never blocks. Returns the
    /// number of textures replaced.
    pub fn poll(&mut self, backend: &mut dyn RenderBackend) -> usize {
        let mut uploaded = 0;
        while let Ok(decoded) = self.rx.try_recv() {
            uploaded += self.finish(backend, decoded);
        }
        uploaded
    }

    /// Block until every pending decode has finished and been uploaded.
    pub fn wait_all(&mut self, backend: &mut dyn RenderBackend) -> usize {
        let mut uploaded = 0;
        while self.pending > 0 {
            match self.rx.recv() {
                Ok(decoded) => uploaded += self.finish(backend, decoded),
                Err(_) => break,
            }
        }
        uploaded
    }

    fn finish(&mut self, backend: &mut dyn RenderBackend, decoded: Decoded) -> usize {
        self.pending = self.pending.saturating_sub(1);
        match decoded.result {
            Ok(pixels) => {
                backend.update_texture(decoded.handle, pixels.width, pixels.height, &pixels.rgba);
                log::info!(
                    "Loaded texture '{}' ({}x{})",
                    decoded.path.display(),
                    pixels.width,
                    pixels.height
                );
                1
            }
            Err(e) => {
                log::error!("Failed to load texture '{}': {e}; keeping placeholder", decoded.path.display());
                0
            }
        }
    }
}

impl Default for TextureLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CommandRecorder;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("orrery-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn parse_mesh_accepts_camel_case_and_pads() {
        let json = r#"{
            "vertices": [0, 0, 0, 1, 0, 0, 0, 1, 0],
            "indices": [0, 1, 2],
            "texCoords": [0, 0, 1, 0, 0, 1]
        }"#;
        let mesh = parse_mesh(json).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.tex_coords.len(), 6);
        assert_eq!(mesh.normals, vec![0.0; 9]);
    }

    #[test]
    fn parse_mesh_rejects_bad_indices() {
        let json = r#"{ "vertices": [0, 0, 0], "indices": [0, 1, 2] }"#;
        assert!(matches!(parse_mesh(json), Err(OrreryError::InvalidMesh(_))));
    }

    #[test]
    fn parse_mesh_reports_json_errors() {
        assert!(matches!(parse_mesh("{ not json"), Err(OrreryError::Json(_))));
    }

    #[test]
    fn load_mesh_reports_missing_file() {
        assert!(matches!(load_mesh("/nonexistent/mesh.json"), Err(OrreryError::Io(_))));
    }

    #[test]
    fn decoded_texture_replaces_placeholder_in_place() {
        let dir = scratch_dir("texture");
        let path = dir.join("checker.png");
        let image = image::RgbaImage::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 { image::Rgba([0, 0, 0, 255]) } else { image::Rgba([255, 0, 0, 255]) }
        });
        image.save(&path).unwrap();

        let mut recorder = CommandRecorder::new();
        let mut loader = TextureLoader::new();
        let handle = loader.load(&mut recorder, &path);

        let placeholder = recorder.texture(handle).unwrap();
        assert_eq!((placeholder.width, placeholder.height), (1, 1));

        assert_eq!(loader.wait_all(&mut recorder), 1);
        assert_eq!(loader.pending(), 0);
        let texture = recorder.texture(handle).unwrap();
        assert_eq!((texture.width, texture.height), (2, 2));
        assert_eq!(&texture.rgba[4..8], &[255, 0, 0, 255]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn panicking_decoder_does_not_hang_wait_all() {
        fn explode(_: &Path) -> Result<Pixels> {
            panic!("corrupt image");
        }

        let mut recorder = CommandRecorder::new();
        let mut loader = TextureLoader::new();
        let handle = loader.load_with(&mut recorder, PathBuf::from("tile.jpg"), explode);
        assert_eq!(loader.wait_all(&mut recorder), 0);
        assert_eq!(loader.pending(), 0);
        assert_eq!(recorder.texture(handle).unwrap().updates, 0);
    }

    #[test]
    fn missing_texture_keeps_placeholder() {
        let mut recorder = CommandRecorder::new();
        let mut loader = TextureLoader::new();
        let handle = loader.load(&mut recorder, "/nonexistent/tile.jpg");
        assert_eq!(loader.wait_all(&mut recorder), 0);
        let texture = recorder.texture(handle).unwrap();
        assert_eq!(texture.rgba, WHITE_TEXEL.to_vec());
        assert_eq!(texture.updates, 0);
    }

    #[test]
    fn cube_faces_load_in_layer_order() {
        let dir = scratch_dir("skybox");
        for (i, face) in SKYBOX_FACES.iter().enumerate() {
            image::RgbaImage::from_pixel(2, 2, image::Rgba([i as u8, 0, 0, 255]))
                .save(dir.join(face))
                .unwrap();
        }
        let faces = load_cube_faces(&dir).unwrap();
        assert_eq!(faces.size, 2);
        assert_eq!(faces.rgba.len(), 6 * 2 * 2 * 4);
        // First texel of each 16-byte face carries its index.
        let firsts: Vec<u8> = faces.rgba.chunks(16).map(|face| face[0]).collect();
        assert_eq!(firsts, vec![0, 1, 2, 3, 4, 5]);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_cube_face_is_an_error() {
        assert!(load_cube_faces("/nonexistent/sky").is_err());
    }

    #[test]
    fn solid_cube_faces_repeat_one_texel() {
        let faces = CubeFaces::solid(Color::RED);
        assert_eq!(faces.size, 1);
        assert_eq!(faces.rgba.len(), 24);
        assert_eq!(&faces.rgba[20..24], &[255, 0, 0, 255]);
    }
}
