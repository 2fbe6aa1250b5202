//! Sprite cache — one fixed-size bitmap per tile, loaded once at startup.
//!
//! The cache is read-only after `SpriteCache::load` and is shared behind an `Arc`
//! by every render call.

use std::collections::HashMap;
use std::path::PathBuf;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageError, RgbImage};
use tracing::{error, info};

use crate::layout::LayoutError;
use crate::mahjong::{all_tiles, Tile};

pub const SPRITE_WIDTH: u32 = 115;
pub const SPRITE_HEIGHT: u32 = 153;

/// Where raw sprites come from, keyed by `Tile::sprite_key`.
pub trait SpriteSource {
    fn load(&self, key: &str) -> Result<DynamicImage, ImageError>;
}

/// Reads sprites from files in a directory. The format is sniffed from content.
pub struct DirSpriteSource {
    root: PathBuf,
}

impl DirSpriteSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SpriteSource for DirSpriteSource {
    fn load(&self, key: &str) -> Result<DynamicImage, ImageError> {
        let bytes = std::fs::read(self.root.join(key))?;
        image::load_from_memory(&bytes)
    }
}

pub struct SpriteCache {
    sprites: HashMap<Tile, RgbImage>,
}

impl SpriteCache {
    /// Loads and normalizes a sprite for every tile in the vocabulary.
    /// Any single failure aborts the whole load.
    pub fn load(source: &dyn SpriteSource) -> Result<Self, LayoutError> {
        let mut sprites = HashMap::new();

        for tile in all_tiles() {
            let key = tile.sprite_key();
            let image = source.load(&key).map_err(|source| {
                error!("Failed to load sprite {key}: {source}");
                LayoutError::SpriteLoad {
                    key: key.clone(),
                    source,
                }
            })?;
            sprites.insert(tile, normalize(image));
        }

        info!(
            "Sprite cache ready: {} tiles at {}x{}",
            sprites.len(),
            SPRITE_WIDTH,
            SPRITE_HEIGHT
        );
        Ok(Self { sprites })
    }

    pub fn get(&self, tile: &Tile) -> Option<&RgbImage> {
        self.sprites.get(tile)
    }
}

/// Converts to RGB and resizes to the fixed cell size when needed.
fn normalize(image: DynamicImage) -> RgbImage {
    let rgb = image.to_rgb8();
    if rgb.dimensions() == (SPRITE_WIDTH, SPRITE_HEIGHT) {
        rgb
    } else {
        imageops::resize(&rgb, SPRITE_WIDTH, SPRITE_HEIGHT, FilterType::CatmullRom)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat, Rgb};
    use std::io::Cursor;

    /// A distinct solid color per vocabulary index.
    pub(crate) fn tile_color(tile: &Tile) -> Rgb<u8> {
        let index = all_tiles().iter().position(|t| t == tile).unwrap() as u8;
        Rgb([index * 7, 255 - index * 7, index.wrapping_mul(13)])
    }

    /// In-memory source of solid sprites at a configurable size.
    pub(crate) struct SolidSource {
        pub width: u32,
        pub height: u32,
        pub missing: Option<String>,
    }

    impl SolidSource {
        pub(crate) fn full_size() -> Self {
            Self {
                width: SPRITE_WIDTH,
                height: SPRITE_HEIGHT,
                missing: None,
            }
        }
    }

    impl SpriteSource for SolidSource {
        fn load(&self, key: &str) -> Result<DynamicImage, ImageError> {
            if self.missing.as_deref() == Some(key) {
                return Err(ImageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    key.to_string(),
                )));
            }
            let tile = all_tiles()
                .into_iter()
                .find(|t| t.sprite_key() == key)
                .unwrap();
            let sprite = RgbImage::from_pixel(self.width, self.height, tile_color(&tile));
            Ok(DynamicImage::ImageRgb8(sprite))
        }
    }

    #[test]
    fn test_cache_covers_all_34_tiles() {
        let cache = SpriteCache::load(&SolidSource::full_size()).unwrap();
        assert_eq!(cache.sprites.len(), 34);
        for tile in all_tiles() {
            let sprite = cache.get(&tile).unwrap();
            assert_eq!(sprite.dimensions(), (SPRITE_WIDTH, SPRITE_HEIGHT));
            assert_eq!(*sprite.get_pixel(0, 0), tile_color(&tile));
        }
    }

    #[test]
    fn test_off_size_sprites_are_resized() {
        let source = SolidSource {
            width: 40,
            height: 60,
            missing: None,
        };
        let cache = SpriteCache::load(&source).unwrap();
        let sprite = cache.get(&Tile::parse("5z").unwrap()).unwrap();
        assert_eq!(sprite.dimensions(), (SPRITE_WIDTH, SPRITE_HEIGHT));
    }

    #[test]
    fn test_any_missing_sprite_fails_the_load() {
        let source = SolidSource {
            missing: Some("p_7z_1.gif".to_string()),
            ..SolidSource::full_size()
        };
        match SpriteCache::load(&source) {
            Err(LayoutError::SpriteLoad { key, .. }) => assert_eq!(key, "p_7z_1.gif"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("load should fail when a sprite is missing"),
        }
    }

    #[test]
    fn test_dir_source_reads_files_by_sprite_key() {
        let dir = tempfile::tempdir().unwrap();
        for tile in all_tiles() {
            let sprite = RgbImage::from_pixel(SPRITE_WIDTH, SPRITE_HEIGHT, tile_color(&tile));
            let mut bytes = Cursor::new(Vec::new());
            sprite.write_to(&mut bytes, ImageFormat::Png).unwrap();
            // Content is PNG even though the key says .gif; the format is sniffed.
            std::fs::write(dir.path().join(tile.sprite_key()), bytes.into_inner()).unwrap();
        }

        let cache = SpriteCache::load(&DirSpriteSource::new(dir.path())).unwrap();
        let red = Tile::parse("7z").unwrap();
        assert_eq!(*cache.get(&red).unwrap().get_pixel(10, 10), tile_color(&red));
    }

    #[test]
    fn test_dir_source_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSpriteSource::new(dir.path().join("nope"));
        assert!(matches!(
            SpriteCache::load(&source),
            Err(LayoutError::SpriteLoad { .. })
        ));
    }
}
