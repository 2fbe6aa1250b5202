//! The 34 distinct mahjong tiles and their 2-character codes.
//!
//! Numbered tiles encode as `<digit><suit>` (`1m`, `5p`, `9s`).
//! Honor tiles encode as fixed codes `1z`..`7z` (East, South, West, North, White, Green, Red).

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::mahjong::MahjongError;

/// Length of one tile token in characters.
pub const TILE_TOKEN_LEN: usize = 2;

// ────────────────────────────────────────────────────────────────────────────
// Category
// ────────────────────────────────────────────────────────────────────────────

/// Three suited families plus the seven honors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileCategory {
    Man,
    Pin,
    Sou,
    East,
    South,
    West,
    North,
    White,
    Green,
    Red,
}

impl TileCategory {
    pub const SUITS: [TileCategory; 3] = [TileCategory::Man, TileCategory::Pin, TileCategory::Sou];

    pub const HONORS: [TileCategory; 7] = [
        TileCategory::East,
        TileCategory::South,
        TileCategory::West,
        TileCategory::North,
        TileCategory::White,
        TileCategory::Green,
        TileCategory::Red,
    ];

    pub fn is_suit(self) -> bool {
        matches!(self, TileCategory::Man | TileCategory::Pin | TileCategory::Sou)
    }

    /// Category key: the suit letter for suited families, the full tile code for honors.
    pub fn code(self) -> &'static str {
        match self {
            TileCategory::Man => "m",
            TileCategory::Pin => "p",
            TileCategory::Sou => "s",
            TileCategory::East => "1z",
            TileCategory::South => "2z",
            TileCategory::West => "3z",
            TileCategory::North => "4z",
            TileCategory::White => "5z",
            TileCategory::Green => "6z",
            TileCategory::Red => "7z",
        }
    }

    /// Inverse of [`TileCategory::code`].
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "m" => Some(TileCategory::Man),
            "p" => Some(TileCategory::Pin),
            "s" => Some(TileCategory::Sou),
            "1z" => Some(TileCategory::East),
            "2z" => Some(TileCategory::South),
            "3z" => Some(TileCategory::West),
            "4z" => Some(TileCategory::North),
            "5z" => Some(TileCategory::White),
            "6z" => Some(TileCategory::Green),
            "7z" => Some(TileCategory::Red),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tile
// ────────────────────────────────────────────────────────────────────────────

/// A single tile. `number` is present iff `category` is a suit.
///
/// Fields are private so the invariant holds for every constructed value.
/// Equality and hashing go through the canonical 2-byte code.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    number: Option<u8>,
    category: TileCategory,
}

impl Tile {
    /// Builds a numbered tile. Returns `None` for an honor category or a number outside 1–9.
    pub fn suited(number: u8, category: TileCategory) -> Option<Self> {
        if category.is_suit() && (1..=9).contains(&number) {
            Some(Self {
                number: Some(number),
                category,
            })
        } else {
            None
        }
    }

    /// Builds an honor tile. Returns `None` for a suit category.
    pub fn honor(category: TileCategory) -> Option<Self> {
        if category.is_suit() {
            None
        } else {
            Some(Self {
                number: None,
                category,
            })
        }
    }

    /// Parses a 2-character token.
    ///
    /// The whole token is tried as an honor code first, then the second
    /// character as a suit letter with the first as the number.
    pub fn parse(token: &str) -> Result<Self, MahjongError> {
        let invalid = || MahjongError::InvalidTileToken(token.to_string());

        if let Some(category) = TileCategory::from_code(token) {
            return Tile::honor(category).ok_or_else(invalid);
        }

        let mut chars = token.chars();
        let (Some(digit), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let category = TileCategory::from_code(suit.encode_utf8(&mut [0u8; 4]))
            .filter(|c| c.is_suit())
            .ok_or_else(invalid)?;
        let number = digit
            .to_digit(10)
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(invalid)?;

        Tile::suited(number, category).ok_or_else(invalid)
    }

    /// Canonical code as two ASCII bytes.
    fn code_bytes(&self) -> [u8; TILE_TOKEN_LEN] {
        match self.number {
            Some(n) => [b'0' + n, self.category.code().as_bytes()[0]],
            None => {
                let code = self.category.code().as_bytes();
                [code[0], code[1]]
            }
        }
    }

    /// Canonical 2-character encoding. `Tile::parse(&t.code()) == Ok(t)`.
    pub fn code(&self) -> String {
        self.to_string()
    }

    /// Resource name of this tile's source sprite.
    pub fn sprite_key(&self) -> String {
        format!("p_{}_1.gif", self)
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.code_bytes() == other.code_bytes()
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code_bytes().hash(state);
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b] = self.code_bytes();
        write!(f, "{}{}", a as char, b as char)
    }
}

impl Serialize for Tile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Tile::parse(&token).map_err(de::Error::custom)
    }
}

/// All 34 distinct tiles: Man 1–9, Pin 1–9, Sou 1–9, then the honors in enum order.
pub fn all_tiles() -> Vec<Tile> {
    let suited = TileCategory::SUITS.into_iter().flat_map(|category| {
        (1..=9).map(move |number| Tile {
            number: Some(number),
            category,
        })
    });
    let honors = TileCategory::HONORS.into_iter().map(|category| Tile {
        number: None,
        category,
    });
    suited.chain(honors).collect()
}
