//! A freshly drawn 14-tile hand, written as its 28-character run of tile codes.

use std::fmt;

use crate::mahjong::tile::{Tile, TILE_TOKEN_LEN};
use crate::mahjong::MahjongError;

/// Number of tiles in a freshly drawn hand.
pub const HAND_LENGTH_TILES: usize = 14;
/// Textual length of a hand: 14 tokens of 2 characters.
pub const HAND_LENGTH_CHARS: usize = HAND_LENGTH_TILES * TILE_TOKEN_LEN;

/// An ordered hand of exactly [`HAND_LENGTH_TILES`] tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand(Vec<Tile>);

impl Hand {
    /// Parses a 28-character hand.
    ///
    /// The length check runs before any token is looked at, so a short or long
    /// hand is always `InvalidHandLength` even when its tokens are garbage.
    /// Token errors are fail-fast.
    pub fn parse(text: &str) -> Result<Self, MahjongError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != HAND_LENGTH_CHARS {
            return Err(MahjongError::InvalidHandLength {
                expected: HAND_LENGTH_CHARS,
                actual: chars.len(),
            });
        }

        chars
            .chunks(TILE_TOKEN_LEN)
            .map(|pair| Tile::parse(&pair.iter().collect::<String>()))
            .collect::<Result<Vec<_>, _>>()
            .map(Hand)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.0
    }

    pub fn contains(&self, tile: &Tile) -> bool {
        self.0.contains(tile)
    }

    /// Concatenated tile codes in hand order. `Hand::parse(&h.serialize()) == Ok(h)`.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tile in &self.0 {
            write!(f, "{tile}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mahjong::tile::{all_tiles, TileCategory};

    const SAMPLE: &str = "1m2m3m4m5m6m7m8m9m1p1p1p2p3p";

    #[test]
    fn test_parse_sample_hand() {
        let hand = Hand::parse(SAMPLE).unwrap();
        assert_eq!(hand.tiles().len(), HAND_LENGTH_TILES);
        assert_eq!(hand.tiles()[0], Tile::suited(1, TileCategory::Man).unwrap());
        assert_eq!(hand.tiles()[1], Tile::suited(2, TileCategory::Man).unwrap());
        assert_eq!(hand.tiles()[13], Tile::suited(3, TileCategory::Pin).unwrap());
    }

    #[test]
    fn test_hand_round_trips_through_serialize() {
        let hand = Hand::parse(SAMPLE).unwrap();
        assert_eq!(hand.serialize(), SAMPLE);

        // Sliding windows over the vocabulary give hands mixing suits and honors.
        let vocabulary = all_tiles();
        for start in 0..=(vocabulary.len() - HAND_LENGTH_TILES) {
            let text: String = vocabulary[start..start + HAND_LENGTH_TILES]
                .iter()
                .map(Tile::code)
                .collect();
            let hand = Hand::parse(&text).unwrap();
            assert_eq!(Hand::parse(&hand.serialize()).unwrap(), hand);
        }
    }

    #[test]
    fn test_wrong_length_is_rejected_before_tokens() {
        let too_long = "1m".repeat(15);
        let one_short = "x".repeat(27);
        for text in [
            "",
            "1m",
            "1m2m3m4m5m",
            "zzzzzzzzzz",
            too_long.as_str(),
            one_short.as_str(),
        ] {
            assert!(
                matches!(
                    Hand::parse(text),
                    Err(MahjongError::InvalidHandLength { expected: 28, actual })
                        if actual == text.chars().count()
                ),
                "{text:?} should fail on length"
            );
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 28 characters but more than 28 bytes: passes the length check, fails on tokens.
        let text = format!("東{}", "1m".repeat(13)) + "x";
        assert_eq!(text.chars().count(), 28);
        assert!(matches!(
            Hand::parse(&text),
            Err(MahjongError::InvalidTileToken(_))
        ));
    }

    #[test]
    fn test_bad_token_fails_fast() {
        let text = "1m2m3m9z5m6m7m8m9m1p1p1p2p0s";
        assert!(matches!(
            Hand::parse(text),
            Err(MahjongError::InvalidTileToken(t)) if t == "9z"
        ));
    }

    #[test]
    fn test_contains() {
        let hand = Hand::parse(SAMPLE).unwrap();
        assert!(hand.contains(&Tile::parse("1p").unwrap()));
        assert!(!hand.contains(&Tile::parse("5z").unwrap()));
    }
}
