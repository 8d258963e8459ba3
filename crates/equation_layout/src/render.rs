//! Equation Rendering - Convert positioned equations to render primitives
//!
//! The typesetting backend is external. It receives one text primitive per
//! equation part, centred where layout put that part.

use crate::geometry::{Point, Rect};
use crate::layout::{PositionedEquation, TextBlock};
use crate::numbering::NumberLabel;
use serde::{Deserialize, Serialize};

// =============================================================================
// Render Primitives
// =============================================================================

/// A color in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const DARK_BLUE: Color = Color::rgb(0x29, 0xAB, 0xCA);

    /// Same color with opacity `alpha` in `0.0..=1.0`
    pub fn with_opacity(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Text styling for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f32,
    pub color: Color,
}

/// A render primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderPrimitive {
    /// Typeset marked-up text centred on `position`
    Text {
        text: String,
        position: Point,
        style: TextStyle,
    },
    /// Draw a line (rods, projections, axes)
    Line {
        start: Point,
        end: Point,
        thickness: f32,
        color: Color,
        dashed: bool,
        /// Arrow head at `end`
        tip: bool,
    },
    /// Draw a rectangle (layout boxes, backgrounds)
    Rectangle {
        rect: Rect,
        corner_radius: f32,
        fill: Option<Color>,
        stroke: Option<(Color, f32)>,
    },
    /// Draw a circle (dots, number badges)
    Circle {
        center: Point,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<(Color, f32)>,
    },
    /// Draw a circular arc; angles in radians, counter-clockwise from +x
    Arc {
        center: Point,
        radius: f32,
        start_angle: f32,
        angle: f32,
        thickness: f32,
        color: Color,
        tip: bool,
    },
}

/// The complete render output for a group of positioned items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOutput {
    /// All render primitives
    pub primitives: Vec<RenderPrimitive>,
    /// Total bounding box
    pub bounds: Rect,
}

impl RenderOutput {
    pub fn new(primitives: Vec<RenderPrimitive>, bounds: Rect) -> Self {
        Self { primitives, bounds }
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Configuration for the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Text color
    pub color: Color,
    /// Font family for math
    pub font_family: String,
    /// Emit an outline for every part's layout box
    pub show_bounds: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            font_family: "Latin Modern Math".to_string(),
            show_bounds: false,
        }
    }
}

/// Renderer for converting layout results to primitives
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with default config
    pub fn new() -> Self {
        Self {
            config: RenderConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// One primitive per part, in part order
    pub fn render_equation(&self, equation: &PositionedEquation) -> RenderOutput {
        let mut primitives = Vec::new();
        for part in equation.parts() {
            self.push_text(&part.text, part.bounds, equation.font_size(), &mut primitives);
        }
        RenderOutput::new(primitives, equation.bounds())
    }

    /// Render a batch of rows into one output
    pub fn render_equations(&self, equations: &[PositionedEquation]) -> RenderOutput {
        let outputs: Vec<_> = equations.iter().map(|e| self.render_equation(e)).collect();
        Self::merge(outputs)
    }

    pub fn render_block(&self, block: &TextBlock) -> RenderOutput {
        let mut primitives = Vec::new();
        self.push_text(&block.text, block.bounds, block.font_size, &mut primitives);
        RenderOutput::new(primitives, block.bounds)
    }

    pub fn render_labels(&self, labels: &[NumberLabel]) -> RenderOutput {
        let outputs: Vec<_> = labels.iter().map(|l| self.render_block(&l.block)).collect();
        Self::merge(outputs)
    }

    fn push_text(
        &self,
        text: &str,
        bounds: Rect,
        font_size: f32,
        primitives: &mut Vec<RenderPrimitive>,
    ) {
        primitives.push(RenderPrimitive::Text {
            text: text.to_string(),
            position: bounds.center(),
            style: TextStyle {
                font_family: self.config.font_family.clone(),
                font_size,
                color: self.config.color,
            },
        });
        if self.config.show_bounds {
            primitives.push(RenderPrimitive::Rectangle {
                rect: bounds,
                corner_radius: 0.0,
                fill: None,
                stroke: Some((Color::YELLOW, 1.0)),
            });
        }
    }

    fn merge(outputs: Vec<RenderOutput>) -> RenderOutput {
        let bounds = Rect::union_all(outputs.iter().map(|o| &o.bounds)).unwrap_or_default();
        let primitives = outputs.into_iter().flat_map(|o| o.primitives).collect();
        RenderOutput::new(primitives, bounds)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEngine;

    #[test]
    fn test_color_creation() {
        let c = Color::rgb(255, 128, 64);
        assert_eq!(c.r, 255);
        assert_eq!(c.g, 128);
        assert_eq!(c.b, 64);
        assert_eq!(c.a, 255);
    }

    #[test]
    fn test_color_opacity() {
        let c = Color::DARK_BLUE.with_opacity(0.4);
        assert_eq!(c.a, 102);
        assert_eq!((c.r, c.g, c.b), (0x29, 0xAB, 0xCA));
        assert_eq!(Color::WHITE.with_opacity(2.0).a, 255);
    }

    #[test]
    fn test_render_equation_one_text_per_part() {
        let engine = LayoutEngine::new();
        let eq = engine.build("c=d||e", 30.0).unwrap();
        let output = Renderer::new().render_equation(&eq);

        assert_eq!(output.primitives.len(), 4);
        assert_eq!(output.bounds, eq.bounds());
        match &output.primitives[1] {
            RenderPrimitive::Text { text, position, style } => {
                assert_eq!(text, "=");
                assert_eq!(*position, eq.anchor().bounds.center());
                assert_eq!(style.font_size, 30.0);
            }
            other => panic!("Expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_render_with_bounds() {
        let engine = LayoutEngine::new();
        let eq = engine.build("a=b", 30.0).unwrap();
        let renderer = Renderer::with_config(RenderConfig {
            show_bounds: true,
            ..RenderConfig::default()
        });
        let output = renderer.render_equation(&eq);
        let rects = output
            .primitives
            .iter()
            .filter(|p| matches!(p, RenderPrimitive::Rectangle { .. }))
            .count();
        assert_eq!(rects, 3);
    }

    #[test]
    fn test_render_batch_and_labels() {
        let engine = LayoutEngine::new();
        let rows = engine
            .layout(&["a=b", "c=d"], Point::origin(), 30.0, None, None)
            .unwrap();
        let labels = engine.number(&rows, 30.0, 60.0, 0, None).unwrap();
        let renderer = Renderer::new();

        let eqs = renderer.render_equations(&rows);
        assert_eq!(eqs.primitives.len(), 6);
        assert!(eqs.bounds.height() > 30.0);

        let nums = renderer.render_labels(&labels);
        assert_eq!(nums.primitives.len(), 2);
        assert!(nums.bounds.left() > eqs.bounds.right());
    }

    #[test]
    fn test_render_empty_batch() {
        let output = Renderer::new().render_equations(&[]);
        assert!(output.primitives.is_empty());
        assert_eq!(output.bounds, Rect::default());
    }
}
