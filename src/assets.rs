//! Named sprite loading
//!
//! Sprites are requested by name (e.g. `"player"`) from an [`AssetSource`].
//! The [`AssetCatalog`] caches decoded textures so every entity sharing a
//! name shares one handle, and keeps the pixels around for GPU upload.

use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Asset loading errors
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("failed to read asset {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode asset {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("asset {name} has invalid size {width}x{height}")]
    InvalidSize { name: String, width: u32, height: u32 },
}

/// Index of a texture inside an [`AssetCatalog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Opaque sprite reference carried by entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle {
    pub id: TextureId,
    /// Source width in pixels
    pub width: u32,
    /// Source height in pixels
    pub height: u32,
}

impl SpriteHandle {
    /// Pixel size as a vector
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// A decoded RGBA8 texture
#[derive(Debug, Clone)]
pub struct Texture {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

impl Texture {
    pub fn new(name: impl Into<String>, width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, AssetError> {
        let name = name.into();
        if width == 0 || height == 0 || pixels.len() != (width as usize) * (height as usize) * 4 {
            return Err(AssetError::InvalidSize { name, width, height });
        }
        Ok(Self {
            name,
            width,
            height,
            pixels,
        })
    }

    /// Solid-colour texture
    pub fn solid(name: impl Into<String>, width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, AssetError> {
        let count = (width as usize) * (height as usize);
        let pixels = rgba.repeat(count);
        Self::new(name, width, height, pixels)
    }
}

/// Provider of decoded textures by name
pub trait AssetSource {
    fn load(&mut self, name: &str) -> Result<Texture, AssetError>;
}

/// Loads `<root>/<name>.png`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.png"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetSource for DirectorySource {
    fn load(&mut self, name: &str) -> Result<Texture, AssetError> {
        let path = self.path_for(name);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AssetError::NotFound(path.display().to_string()));
            }
            Err(source) => {
                return Err(AssetError::Io {
                    name: name.to_string(),
                    source,
                });
            }
        };
        decode_png(name, &bytes)
    }
}

/// Decode PNG bytes into an RGBA8 texture
pub fn decode_png(name: &str, bytes: &[u8]) -> Result<Texture, AssetError> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|source| AssetError::Decode {
            name: name.to_string(),
            source,
        })?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Texture::new(name, width, height, img.into_raw())
}

/// Size and colour of a generated placeholder sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderSprite {
    pub width: u32,
    pub height: u32,
    pub rgba: [u8; 4],
}

/// Generates solid-colour sprites, for builds without image files
#[derive(Debug, Clone, Default)]
pub struct PlaceholderSource {
    sprites: HashMap<String, PlaceholderSprite>,
}

impl PlaceholderSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sprite(mut self, name: impl Into<String>, sprite: PlaceholderSprite) -> Self {
        self.sprites.insert(name.into(), sprite);
        self
    }

    pub fn from_map(sprites: HashMap<String, PlaceholderSprite>) -> Self {
        Self { sprites }
    }
}

impl AssetSource for PlaceholderSource {
    fn load(&mut self, name: &str) -> Result<Texture, AssetError> {
        let sprite = self
            .sprites
            .get(name)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?;
        Texture::solid(name, sprite.width, sprite.height, sprite.rgba)
    }
}

/// Cache of loaded textures, indexed by [`TextureId`]
#[derive(Debug, Default)]
pub struct AssetCatalog {
    textures: Vec<Texture>,
    by_name: HashMap<String, TextureId>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a sprite by name, loading it from `source` on first use
    pub fn load(&mut self, source: &mut dyn AssetSource, name: &str) -> Result<SpriteHandle, AssetError> {
        if let Some(&id) = self.by_name.get(name) {
            return Ok(self.handle(id));
        }

        let texture = source.load(name)?;
        let id = TextureId(self.textures.len() as u32);
        log::debug!(
            "Loaded sprite '{}' as {:?} ({}x{})",
            name,
            id,
            texture.width,
            texture.height
        );
        self.textures.push(texture);
        self.by_name.insert(name.to_string(), id);
        Ok(self.handle(id))
    }

    fn handle(&self, id: TextureId) -> SpriteHandle {
        let tex = &self.textures[id.0 as usize];
        SpriteHandle {
            id,
            width: tex.width,
            height: tex.height,
        }
    }

    pub fn id_of(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// All textures with their ids, in load order
    pub fn iter(&self) -> impl Iterator<Item = (TextureId, &Texture)> {
        self.textures
            .iter()
            .enumerate()
            .map(|(i, t)| (TextureId(i as u32), t))
    }
}
