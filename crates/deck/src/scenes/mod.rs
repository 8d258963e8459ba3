//! Scenes of the chaos-theory deck
//!
//! Each scene lays out its text and equations with the shared
//! [`LayoutEngine`] and drives a [`SlideHost`]. Positions are given in frame
//! units scaled by [`UNIT`].

mod lorenz;
mod pendulum;
mod pendulum_diagram;
mod title;

use crate::error::{DeckError, Result};
use crate::settings::DeckSettings;
use crate::shapes::Shape;
use crate::timeline::{Animation, Deck, ObjectId, SceneObject, SlideHost, Timeline};
use equation_layout::{LayoutEngine, NumberLabel, Point, PositionedEquation, Rect, Size, TextBlock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use lorenz::lorenz_system;
pub use pendulum::{equations_of_motion, pendulum_kinematics, pendulum_rewrites};
pub use pendulum_diagram::{pendulum_derivation, pendulum_forces};
pub use title::{chaotic_systems, title};

/// One frame unit in layout units
pub const UNIT: f32 = 30.0;

/// Gap [`SceneContext::next_to`] leaves between neighbours, in frame units
pub const NEXT_TO_BUFF: f32 = 0.25;

/// Placement directions for [`SceneContext::next_to`]
pub const UP: (f32, f32) = (0.0, 1.0);
pub const DOWN: (f32, f32) = (0.0, -1.0);
pub const LEFT: (f32, f32) = (-1.0, 0.0);
pub const RIGHT: (f32, f32) = (1.0, 0.0);
pub const UP_RIGHT: (f32, f32) = (1.0, 1.0);
pub const DOWN_RIGHT: (f32, f32) = (1.0, -1.0);
pub const UP_LEFT: (f32, f32) = (-1.0, 1.0);

/// Scene names, in deck order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneName {
    Title,
    ChaoticSystems,
    PendulumDerivation,
    PendulumForces,
    PendulumRewrites,
    PendulumKinematics,
    EquationsOfMotion,
    LorenzSystem,
}

impl SceneName {
    pub const ALL: [SceneName; 8] = [
        SceneName::Title,
        SceneName::ChaoticSystems,
        SceneName::PendulumDerivation,
        SceneName::PendulumForces,
        SceneName::PendulumRewrites,
        SceneName::PendulumKinematics,
        SceneName::EquationsOfMotion,
        SceneName::LorenzSystem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneName::Title => "title",
            SceneName::ChaoticSystems => "chaotic-systems",
            SceneName::PendulumDerivation => "pendulum-derivation",
            SceneName::PendulumForces => "pendulum-forces",
            SceneName::PendulumKinematics => "pendulum-kinematics",
            SceneName::PendulumRewrites => "pendulum-rewrites",
            SceneName::EquationsOfMotion => "equations-of-motion",
            SceneName::LorenzSystem => "lorenz-system",
        }
    }
}

impl fmt::Display for SceneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneName {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        SceneName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| DeckError::UnknownScene(s.to_string()))
    }
}

/// What every scene needs besides the host
pub struct SceneContext {
    pub engine: LayoutEngine,
    pub settings: DeckSettings,
}

impl SceneContext {
    pub fn new(settings: DeckSettings) -> Result<Self> {
        settings.layout.validate()?;
        Ok(Self {
            engine: LayoutEngine::with_config(settings.layout),
            settings,
        })
    }

    pub fn font_size(&self) -> f32 {
        self.settings.font_size()
    }

    /// Wait the configured pause, then break the slide
    pub fn end_slide<H: SlideHost>(&self, host: &mut H) {
        host.wait(self.settings.wait_duration);
        host.end_slide();
    }

    /// Lay out a batch at a frame position with per-row extra drops in frame units
    pub fn batch<S: AsRef<str>>(
        &self,
        specs: &[S],
        start: Point,
        drops: Option<&[f32]>,
        reference: Option<&PositionedEquation>,
    ) -> Result<Vec<PositionedEquation>> {
        let offsets: Option<Vec<f32>> = drops.map(|d| d.iter().map(|v| v * UNIT).collect());
        Ok(self.engine.layout(
            specs,
            start,
            self.font_size(),
            offsets.as_deref(),
            reference,
        )?)
    }

    /// Measure `text` and place it beside `anchor`, [`NEXT_TO_BUFF`] away in
    /// `direction`
    pub fn next_to(
        &self,
        text: &str,
        anchor: Point,
        direction: (f32, f32),
        font_size: f32,
    ) -> Result<TextBlock> {
        let mut block = self.engine.text_block(text, anchor, font_size)?;
        let size = Size::new(block.bounds.width(), block.bounds.height());
        let buff = NEXT_TO_BUFF * UNIT;
        let center = Point::new(
            anchor.x + direction.0 * (size.width / 2.0 + buff),
            anchor.y + direction.1 * (size.height / 2.0 + buff),
        );
        block.bounds = Rect::centered_at(center, size);
        Ok(block)
    }

    /// Add a text block at the deck font size
    pub fn text<H: SlideHost>(&self, host: &mut H, text: &str, center: Point) -> Result<ObjectId> {
        let block = self.engine.text_block(text, center, self.font_size())?;
        Ok(host.add(SceneObject::Text(block)))
    }

    /// Add a text block beside `anchor` at the deck font size
    pub fn text_next_to<H: SlideHost>(
        &self,
        host: &mut H,
        text: &str,
        anchor: Point,
        direction: (f32, f32),
    ) -> Result<ObjectId> {
        let block = self.next_to(text, anchor, direction, self.font_size())?;
        Ok(host.add(SceneObject::Text(block)))
    }

    pub fn numbers(
        &self,
        rows: &[PositionedEquation],
        start_index: usize,
        edge_reference: Option<&PositionedEquation>,
    ) -> Result<Vec<NumberLabel>> {
        Ok(self.engine.number(
            rows,
            self.font_size(),
            self.settings.numbering_offset,
            start_index,
            edge_reference,
        )?)
    }
}

/// A point `(x, y)` in frame units
pub fn frame(x: f32, y: f32) -> Point {
    Point::new(x * UNIT, y * UNIT)
}

/// Where `MoveTo` should send an equation so it lands on `row`'s anchor
pub fn anchor_point(row: &PositionedEquation) -> Point {
    Point::new(row.anchor_x(), row.anchor_y())
}

pub(crate) fn add_shape<H: SlideHost>(host: &mut H, shape: Shape) -> ObjectId {
    host.add(SceneObject::Shape(shape))
}

pub(crate) fn add_equations<H: SlideHost>(host: &mut H, rows: &[PositionedEquation]) -> Vec<ObjectId> {
    rows.iter()
        .map(|row| host.add(SceneObject::Equation(row.clone())))
        .collect()
}

pub(crate) fn add_labels<H: SlideHost>(host: &mut H, labels: &[NumberLabel]) -> Vec<ObjectId> {
    labels
        .iter()
        .map(|label| host.add(SceneObject::Label(label.clone())))
        .collect()
}

/// Write each equation followed by its number
pub(crate) fn write_numbered<H: SlideHost>(
    host: &mut H,
    equations: &[ObjectId],
    labels: &[ObjectId],
    run_time: f32,
) {
    for (&equation, &label) in equations.iter().zip(labels) {
        host.play(vec![Animation::Write { object: equation }], run_time);
        host.play(vec![Animation::Write { object: label }], run_time);
    }
}

/// Run one scene against `host`
pub fn run_scene<H: SlideHost>(scene: SceneName, host: &mut H, ctx: &SceneContext) -> Result<()> {
    tracing::debug!(scene = %scene, "running scene");
    match scene {
        SceneName::Title => title(host, ctx),
        SceneName::ChaoticSystems => chaotic_systems(host, ctx),
        SceneName::PendulumDerivation => pendulum_derivation(host, ctx),
        SceneName::PendulumForces => pendulum_forces(host, ctx),
        SceneName::PendulumKinematics => pendulum_kinematics(host, ctx),
        SceneName::PendulumRewrites => pendulum_rewrites(host, ctx),
        SceneName::EquationsOfMotion => equations_of_motion(host, ctx),
        SceneName::LorenzSystem => lorenz_system(host, ctx),
    }
}

/// Record the selected scenes, in order, into a deck
pub fn build_deck(settings: &DeckSettings, scenes: &[SceneName]) -> Result<Deck> {
    let ctx = SceneContext::new(settings.clone())?;
    let mut timeline = Timeline::new();
    for &scene in scenes {
        run_scene(scene, &mut timeline, &ctx)?;
    }
    let deck = timeline.finish();
    tracing::debug!(
        slides = deck.slide_count(),
        objects = deck.objects.len(),
        "deck recorded"
    );
    Ok(deck)
}
