// Prompt constants for question generation.
// The labels in QUESTION_SYSTEM must stay in sync with mahjong::question.

/// System instruction opening every generation conversation.
/// The oracle is expected to answer with the five labeled lines exactly as shown.
pub const QUESTION_SYSTEM: &str = "
麻雀の現実に即した何切る問題を日本語で生成します。手牌はツモした直後の14枚で、数牌と字牌が使用されます。数牌は1m、1p、1sのように表記し、字牌は1z（東）や5z（白）のように表記します。

問題は以下のフォーマットで提供されます：
問題文: [問題文]
手牌: [手牌(スペース無し28文字)]
難易度: [1-5の整数]
解答: [解答(1枚)]
解説: [解説]
";

/// Corrective user message appended after a completion whose hand is not 14 tiles.
pub const INVALID_HAND_CORRECTION: &str = "出力が事前に与えられたフォーマットに沿っていません。\
    手牌の枚数が14枚ではないため、正しい手牌を生成し直してください。";
