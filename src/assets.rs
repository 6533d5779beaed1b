//! Player sprite loading
//!
//! The sprite is optional: when it can't be read or decoded the player is
//! drawn as a solid square instead. Failures are logged, never propagated.

use glam::Vec2;
use image::RgbaImage;
use thiserror::Error;

use crate::consts::PLAYER_SPRITE_WIDTH;

/// Why the sprite could not be loaded
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode sprite: {0}")]
    Decode(#[from] image::ImageError),
    #[error("sprite has no pixels")]
    Empty,
    #[error("failed to fetch sprite: {0}")]
    Fetch(String),
}

/// The player's look and on-screen size
#[derive(Debug, Clone)]
pub struct PlayerSprite {
    /// Decoded pixels; `None` for the placeholder square
    pub pixels: Option<RgbaImage>,
    /// Display size after scaling to the sprite width
    pub size: Vec2,
}

impl PlayerSprite {
    /// Side of the placeholder square before scaling
    pub const PLACEHOLDER_SIZE: u32 = 40;
    pub const PLACEHOLDER_COLOR: [u8; 3] = [0, 128, 255];

    /// Solid square used when no sprite is available
    pub fn placeholder() -> Self {
        Self {
            pixels: None,
            size: scaled_size(Self::PLACEHOLDER_SIZE, Self::PLACEHOLDER_SIZE),
        }
    }

    /// Decode an encoded image (PNG)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        if image.width() == 0 || image.height() == 0 {
            return Err(AssetError::Empty);
        }
        Ok(Self {
            size: scaled_size(image.width(), image.height()),
            pixels: Some(image),
        })
    }

    /// Read and decode a sprite file
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Use the loaded sprite, or the placeholder if loading failed
    pub fn or_placeholder(result: Result<Self, AssetError>, name: &str) -> Self {
        match result {
            Ok(sprite) => {
                log::info!("Loaded player sprite {} ({}x{})", name, sprite.size.x, sprite.size.y);
                sprite
            }
            Err(e) => {
                log::warn!("Player sprite {} unavailable, using placeholder: {}", name, e);
                Self::placeholder()
            }
        }
    }

    /// Load a sprite from disk, falling back to the placeholder
    pub fn load_or_placeholder(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        Self::or_placeholder(Self::from_path(path), &path.display().to_string())
    }

    /// Fetch a sprite over HTTP, falling back to the placeholder (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub async fn fetch_or_placeholder(url: &str) -> Self {
        let result = match fetch_bytes(url).await {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(e) => Err(e),
        };
        Self::or_placeholder(result, url)
    }

    pub fn is_placeholder(&self) -> bool {
        self.pixels.is_none()
    }

    /// Color multiplied with the sprite texture when drawing
    pub fn tint(&self) -> [f32; 4] {
        if self.is_placeholder() {
            let [r, g, b] = Self::PLACEHOLDER_COLOR;
            [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
        } else {
            [1.0; 4]
        }
    }
}

/// Scale to the fixed sprite width, keeping aspect ratio (whole pixels)
fn scaled_size(width: u32, height: u32) -> Vec2 {
    let scaled_height = (height as f32 * PLAYER_SPRITE_WIDTH / width as f32).floor();
    Vec2::new(PLAYER_SPRITE_WIDTH, scaled_height)
}

#[cfg(target_arch = "wasm32")]
async fn fetch_bytes(url: &str) -> Result<Vec<u8>, AssetError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let fetch_err = |e: wasm_bindgen::JsValue| AssetError::Fetch(format!("{:?}", e));

    let window = web_sys::window().ok_or_else(|| AssetError::Fetch("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(fetch_err)?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| AssetError::Fetch("not a Response".into()))?;
    if !response.ok() {
        return Err(AssetError::Fetch(format!("{} returned {}", url, response.status())));
    }
    let buffer = JsFuture::from(response.array_buffer().map_err(fetch_err)?)
        .await
        .map_err(fetch_err)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
