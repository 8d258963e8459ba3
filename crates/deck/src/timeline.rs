//! Slide timeline
//!
//! Scenes talk to the presentation host through [`SlideHost`]. [`Timeline`]
//! is the recording host: it keeps every object added to the scene and the
//! animations, waits and slide breaks in order, ready to be handed to a
//! renderer or dumped as JSON.

use crate::shapes::Shape;
use equation_layout::{NumberLabel, Point, PositionedEquation, RenderOutput, Renderer, TextBlock};
use serde::{Deserialize, Serialize};

/// Handle to an object added to the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub usize);

/// Something the renderer draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneObject {
    Equation(PositionedEquation),
    Label(NumberLabel),
    Text(TextBlock),
    Shape(Shape),
}

/// An animation effect applied to scene objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Animation {
    Write { object: ObjectId },
    Create { object: ObjectId },
    Unwrite { object: ObjectId },
    FadeIn { object: ObjectId },
    FadeOut { object: ObjectId },
    Uncreate { object: ObjectId },
    GrowFromCenter { object: ObjectId },
    /// Morph `from` into `to`, which already sits where it should end up
    TransformInPlace { from: ObjectId, to: ObjectId },
    /// Slide an object so its anchor (an equation's `=`, otherwise its
    /// centre) lands on `target`
    MoveTo { object: ObjectId, target: Point },
    /// Frame the camera on `center`, `width` layout units across
    MoveCamera { center: Point, width: f32 },
    /// Return the camera to the full frame
    RestoreCamera,
    /// Turn a 3D camera; angles in degrees
    OrientCamera { phi: f32, theta: f32, zoom: f32 },
}

impl Animation {
    /// Objects this animation touches
    pub fn objects(&self) -> Vec<ObjectId> {
        match self {
            Animation::Write { object }
            | Animation::Create { object }
            | Animation::Unwrite { object }
            | Animation::FadeIn { object }
            | Animation::FadeOut { object }
            | Animation::Uncreate { object }
            | Animation::GrowFromCenter { object }
            | Animation::MoveTo { object, .. } => vec![*object],
            Animation::TransformInPlace { from, to } => vec![*from, *to],
            Animation::MoveCamera { .. }
            | Animation::RestoreCamera
            | Animation::OrientCamera { .. } => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Play {
        animations: Vec<Animation>,
        run_time: f32,
    },
    Wait {
        seconds: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub steps: Vec<Step>,
}

/// The presentation host scenes drive
pub trait SlideHost {
    /// Register an object with the scene without showing it
    fn add(&mut self, object: SceneObject) -> ObjectId;

    /// Play animations together
    fn play(&mut self, animations: Vec<Animation>, run_time: f32);

    /// Hold the current frame
    fn wait(&mut self, seconds: f32);

    /// Close the current slide; the next step starts a new one
    fn end_slide(&mut self);
}

/// A finished deck: every object plus the slides that animate them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub objects: Vec<SceneObject>,
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    /// Draw primitives for one object, or `None` for an unknown id
    pub fn render_object(&self, id: ObjectId, renderer: &Renderer) -> Option<RenderOutput> {
        let output = match self.object(id)? {
            SceneObject::Equation(equation) => renderer.render_equation(equation),
            SceneObject::Label(label) => renderer.render_labels(std::slice::from_ref(label)),
            SceneObject::Text(block) => renderer.render_block(block),
            SceneObject::Shape(shape) => shape.render(),
        };
        Some(output)
    }

    /// Draw primitives for every object, in id order
    pub fn render(&self, renderer: &Renderer) -> Vec<RenderOutput> {
        (0..self.objects.len())
            .filter_map(|i| self.render_object(ObjectId(i), renderer))
            .collect()
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Total play and wait time across all slides, in seconds
    pub fn duration(&self) -> f32 {
        self.slides
            .iter()
            .flat_map(|s| &s.steps)
            .map(|step| match step {
                Step::Play { run_time, .. } => *run_time,
                Step::Wait { seconds } => *seconds,
            })
            .sum()
    }
}

/// Recording [`SlideHost`]
#[derive(Debug, Default)]
pub struct Timeline {
    objects: Vec<SceneObject>,
    slides: Vec<Slide>,
    current: Slide,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    /// Close any open slide and hand back the deck
    pub fn finish(mut self) -> Deck {
        self.end_slide();
        Deck {
            objects: self.objects,
            slides: self.slides,
        }
    }
}

impl SlideHost for Timeline {
    fn add(&mut self, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    fn play(&mut self, animations: Vec<Animation>, run_time: f32) {
        if animations.is_empty() {
            return;
        }
        self.current.steps.push(Step::Play {
            animations,
            run_time,
        });
    }

    fn wait(&mut self, seconds: f32) {
        self.current.steps.push(Step::Wait { seconds });
    }

    fn end_slide(&mut self) {
        if self.current.steps.is_empty() {
            return;
        }
        let slide = std::mem::take(&mut self.current);
        tracing::trace!(index = self.slides.len(), steps = slide.steps.len(), "slide closed");
        self.slides.push(slide);
    }
}
