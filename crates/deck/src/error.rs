//! Error types for the deck crate

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Layout error: {0}")]
    Layout(#[from] equation_layout::LayoutError),

    #[error("Unknown scene: {0}")]
    UnknownScene(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DeckError>;
