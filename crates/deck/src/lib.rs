//! Deck - The chaos-theory slide deck
//!
//! This crate is the presentation script built on `equation_layout`:
//! - Settings for fonts, pacing and the numbering column
//! - A presentation host trait and a recording timeline
//! - Diagram shapes for the pendulum and Lorenz slides
//! - The scenes: title, chaotic systems, double pendulum, Lorenz system

mod error;
pub mod scenes;
pub mod settings;
pub mod shapes;
pub mod timeline;

pub use error::*;
pub use scenes::{build_deck, run_scene, SceneContext, SceneName};
pub use settings::{DeckSettings, SettingsManager};
pub use shapes::{Point3, Shape};
pub use timeline::{Animation, Deck, ObjectId, SceneObject, Slide, SlideHost, Step, Timeline};
