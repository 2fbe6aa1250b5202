use std::sync::Arc;

use crate::generation::generator::QuestionGenerator;
use crate::layout::TileImageGenerator;
use crate::storage::QuestionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable question store. Default: PgQuestionStore.
    pub store: Arc<dyn QuestionStore>,
    pub generator: QuestionGenerator,
    /// Renderer over the sprite cache loaded at startup; read-only from here on.
    pub tile_images: TileImageGenerator,
}
