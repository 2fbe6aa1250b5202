//! Rich menu payloads — the data contract with the chat platform's tappable menu.
//!
//! Each `TileArea` becomes a postback region carrying `(question id, tile code)`.
//! Postback data coming back in is parsed with the same tile codec, so the code
//! written here is exactly what `parse_postback` accepts.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::tile_image::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::layout::TileImage;
use crate::mahjong::Tile;

const CHAT_BAR_TEXT: &str = "メニュー";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichMenu {
    pub size: MenuSize,
    pub selected: bool,
    pub name: String,
    pub chat_bar_text: String,
    pub areas: Vec<MenuArea>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuArea {
    pub bounds: MenuBounds,
    pub action: PostbackAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostbackAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub data: String,
}

impl PostbackAction {
    fn new(data: String) -> Self {
        Self {
            action_type: "postback".to_string(),
            data,
        }
    }
}

/// What a tapped region asks the service to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Postback {
    StartQuestion,
    AnswerTile { question_id: i64, tile: Tile },
}

impl Postback {
    pub fn to_data(&self) -> String {
        match self {
            Postback::StartQuestion => "action=start_question".to_string(),
            Postback::AnswerTile { question_id, tile } => {
                format!("action=answer_tile&tile={tile}&id={question_id}")
            }
        }
    }
}

fn full_canvas_size() -> MenuSize {
    MenuSize {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
    }
}

/// Default menu: one region over the whole canvas that starts a new question.
pub fn start_menu() -> RichMenu {
    RichMenu {
        size: full_canvas_size(),
        selected: true,
        name: "Default Rich Menu".to_string(),
        chat_bar_text: CHAT_BAR_TEXT.to_string(),
        areas: vec![MenuArea {
            bounds: MenuBounds {
                x: 0,
                y: 0,
                width: CANVAS_WIDTH,
                height: CANVAS_HEIGHT,
            },
            action: PostbackAction::new(Postback::StartQuestion.to_data()),
        }],
    }
}

/// Answer menu: one region per tile of the rendered hand, in hand order.
pub fn answer_menu(question_id: i64, image: &TileImage) -> RichMenu {
    let areas = image
        .areas
        .iter()
        .map(|area| MenuArea {
            bounds: MenuBounds {
                x: area.x,
                y: area.y,
                width: area.width,
                height: area.height,
            },
            action: PostbackAction::new(
                Postback::AnswerTile {
                    question_id,
                    tile: area.tile,
                }
                .to_data(),
            ),
        })
        .collect();

    RichMenu {
        size: full_canvas_size(),
        selected: true,
        name: "Mahjong Tile".to_string(),
        chat_bar_text: CHAT_BAR_TEXT.to_string(),
        areas,
    }
}

/// Parses `key=value&key=value` postback data.
pub fn parse_postback(data: &str) -> Result<Postback, AppError> {
    let field = |key: &str| {
        data.split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    };
    let require = |key: &str| {
        field(key).ok_or_else(|| AppError::Validation(format!("Postback is missing '{key}'")))
    };

    match require("action")? {
        "start_question" => Ok(Postback::StartQuestion),
        "answer_tile" => {
            let tile = Tile::parse(require("tile")?)?;
            let id = require("id")?;
            let question_id = id
                .parse::<i64>()
                .map_err(|_| AppError::Validation(format!("Invalid question id '{id}'")))?;
            Ok(Postback::AnswerTile { question_id, tile })
        }
        other => Err(AppError::Validation(format!(
            "Unknown postback action '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tile_image::tile_area;
    use crate::mahjong::Hand;
    use bytes::Bytes;

    fn image_for(hand: &str) -> TileImage {
        let hand = Hand::parse(hand).unwrap();
        TileImage {
            bytes: Bytes::new(),
            areas: hand
                .tiles()
                .iter()
                .enumerate()
                .map(|(i, t)| tile_area(i, *t))
                .collect(),
        }
    }

    #[test]
    fn test_answer_menu_has_one_area_per_tile() {
        let image = image_for("1m2m3m4m5m6m7m8m9m1p1p1p2p3p");
        let menu = answer_menu(12, &image);

        assert_eq!(menu.size, MenuSize { width: 805, height: 306 });
        assert_eq!(menu.areas.len(), 14);
        assert_eq!(menu.areas[0].action.data, "action=answer_tile&tile=1m&id=12");
        assert_eq!(menu.areas[13].action.data, "action=answer_tile&tile=3p&id=12");
        assert_eq!(
            menu.areas[7].bounds,
            MenuBounds {
                x: 0,
                y: 153,
                width: 115,
                height: 153
            }
        );
    }

    #[test]
    fn test_every_area_postback_parses_back_to_its_tile() {
        let image = image_for("1z2z3z4z5z6z7z1s9s1p9p1m9m5s");
        let menu = answer_menu(3, &image);

        for (area, menu_area) in image.areas.iter().zip(&menu.areas) {
            let parsed = parse_postback(&menu_area.action.data).unwrap();
            assert_eq!(
                parsed,
                Postback::AnswerTile {
                    question_id: 3,
                    tile: area.tile
                }
            );
        }
    }

    #[test]
    fn test_start_menu_covers_canvas() {
        let menu = start_menu();
        assert_eq!(menu.areas.len(), 1);
        assert_eq!(
            parse_postback(&menu.areas[0].action.data).unwrap(),
            Postback::StartQuestion
        );
    }

    #[test]
    fn test_menu_serializes_with_platform_field_names() {
        let value = serde_json::to_value(start_menu()).unwrap();
        assert_eq!(value["chatBarText"], "メニュー");
        assert_eq!(value["areas"][0]["action"]["type"], "postback");
        assert_eq!(value["size"]["width"], 805);
    }

    #[test]
    fn test_parse_postback_rejects_bad_input() {
        assert!(matches!(
            parse_postback("tile=1m&id=1"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_postback("action=dance"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_postback("action=answer_tile&tile=1m&id=abc"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_postback("action=answer_tile&tile=9z&id=1"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_postback_ignores_key_order() {
        assert_eq!(
            parse_postback("id=5&tile=7z&action=answer_tile").unwrap(),
            Postback::AnswerTile {
                question_id: 5,
                tile: Tile::parse("7z").unwrap()
            }
        );
    }
}
