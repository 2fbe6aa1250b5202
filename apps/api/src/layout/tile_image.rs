//! Tile image — composites a hand onto a fixed 805×306 canvas, 2 rows × 7 columns.
//!
//! Hand index `i` lands in cell `(row = i / 7, col = i % 7)` at pixel origin
//! `(col × 115, row × 153)`. The returned `areas` carry those rectangles in hand
//! order so menu regions line up with the bitmap exactly.

use std::io::Cursor;
use std::sync::Arc;

use bytes::Bytes;
use image::{imageops, ImageFormat, RgbImage};
use serde::Serialize;

use crate::layout::sprites::{SpriteCache, SPRITE_HEIGHT, SPRITE_WIDTH};
use crate::layout::LayoutError;
use crate::mahjong::hand::HAND_LENGTH_TILES;
use crate::mahjong::{Hand, Tile};

pub const GRID_ROWS: u32 = 2;
pub const GRID_COLS: u32 = 7;
pub const CANVAS_WIDTH: u32 = 805;
pub const CANVAS_HEIGHT: u32 = 306;

const _: () = assert!((GRID_ROWS * GRID_COLS) as usize == HAND_LENGTH_TILES);

/// One hand position mapped to its pixel rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileArea {
    pub tile: Tile,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Encoded PNG plus one area per hand position, in hand order.
#[derive(Debug, Clone)]
pub struct TileImage {
    pub bytes: Bytes,
    pub areas: Vec<TileArea>,
}

/// Grid placement of hand index `index`.
pub fn tile_area(index: usize, tile: Tile) -> TileArea {
    let index = index as u32;
    let (row, col) = (index / GRID_COLS, index % GRID_COLS);
    TileArea {
        tile,
        x: col * SPRITE_WIDTH,
        y: row * SPRITE_HEIGHT,
        width: SPRITE_WIDTH,
        height: SPRITE_HEIGHT,
    }
}

/// Renders hands against a shared, read-only sprite cache. Cheap to clone.
#[derive(Clone)]
pub struct TileImageGenerator {
    sprites: Arc<SpriteCache>,
}

impl TileImageGenerator {
    pub fn new(sprites: SpriteCache) -> Self {
        Self {
            sprites: Arc::new(sprites),
        }
    }

    /// Pure function of `(hand, sprite cache)`: equal hands give byte-identical output.
    pub fn generate(&self, hand: &Hand) -> Result<TileImage, LayoutError> {
        let mut canvas = RgbImage::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        let mut areas = Vec::with_capacity(hand.tiles().len());

        for (index, tile) in hand.tiles().iter().enumerate() {
            let sprite = self
                .sprites
                .get(tile)
                .ok_or_else(|| LayoutError::MissingSprite(tile.code()))?;
            let area = tile_area(index, *tile);
            imageops::replace(&mut canvas, sprite, i64::from(area.x), i64::from(area.y));
            areas.push(area);
        }

        let mut buffer = Cursor::new(Vec::new());
        canvas.write_to(&mut buffer, ImageFormat::Png)?;

        Ok(TileImage {
            bytes: Bytes::from(buffer.into_inner()),
            areas,
        })
    }
}
