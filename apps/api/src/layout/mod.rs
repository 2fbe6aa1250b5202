// Tile layout: sprite cache + 2×7 grid compositing.
// CPU-bound rendering must run inside tokio::task::spawn_blocking.

pub mod sprites;
pub mod tile_image;

use thiserror::Error;

// Re-export the public API consumed by other modules (pipeline, handlers, menu).
pub use sprites::{DirSpriteSource, SpriteCache};
pub use tile_image::{TileImage, TileImageGenerator};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Failed to load sprite {key}: {source}")]
    SpriteLoad {
        key: String,
        #[source]
        source: image::ImageError,
    },

    #[error("No cached sprite for tile {0}")]
    MissingSprite(String),

    #[error("Failed to encode tile image: {0}")]
    Encode(#[from] image::ImageError),
}
