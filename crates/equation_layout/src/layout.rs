//! Equation Layout - Position equations around their `=` anchors
//!
//! An equation is built from its split parts, each measured independently.
//! Batches stack rows top to bottom and chain the anchors into one vertical
//! column. Replacement moves a new equation onto an old anchor so a sequence
//! of rewrites stays in place.

use crate::config::{check_font_size, LayoutConfig};
use crate::error::{LayoutError, Result};
use crate::geometry::{Point, Rect};
use crate::measure::{MetricsMeasurer, TextMeasurer};
use crate::split::{split, ANCHOR_INDEX, FIRST_FRAGMENT_INDEX, LHS_INDEX};
use serde::{Deserialize, Serialize};

// =============================================================================
// Layout Types
// =============================================================================

/// What a part of an equation is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartRole {
    /// Left-hand side
    Lhs,
    /// The `=` sign every row aligns on
    Anchor,
    /// Right-hand-side fragment, numbered from 0
    Fragment(usize),
}

impl PartRole {
    /// Role of the part at `index` in `[lhs, anchor, fragment..]`
    pub fn at(index: usize) -> Self {
        match index {
            LHS_INDEX => PartRole::Lhs,
            ANCHOR_INDEX => PartRole::Anchor,
            i => PartRole::Fragment(i - FIRST_FRAGMENT_INDEX),
        }
    }
}

/// One independently positioned piece of an equation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationPart {
    pub role: PartRole,
    pub text: String,
    pub bounds: Rect,
}

/// An equation whose parts have been measured and placed.
///
/// Parts are indexed `[lhs, anchor, fragment..]`. The anchor is the alignment
/// reference: its left edge is the equation's anchor x, its vertical centre
/// the anchor y, and every other part is vertically centred on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredEquation")]
pub struct PositionedEquation {
    source: String,
    font_size: f32,
    parts: Vec<EquationPart>,
}

/// Wire form of [`PositionedEquation`], checked before it is accepted
#[derive(Deserialize)]
struct StoredEquation {
    source: String,
    font_size: f32,
    parts: Vec<EquationPart>,
}

impl TryFrom<StoredEquation> for PositionedEquation {
    type Error = LayoutError;

    fn try_from(stored: StoredEquation) -> Result<Self> {
        check_font_size(stored.font_size)?;
        if stored.parts.len() < FIRST_FRAGMENT_INDEX + 1 {
            return Err(LayoutError::MalformedParts(format!(
                "expected at least {} parts, found {}",
                FIRST_FRAGMENT_INDEX + 1,
                stored.parts.len()
            )));
        }
        for (index, part) in stored.parts.iter().enumerate() {
            let expected = PartRole::at(index);
            if part.role != expected {
                return Err(LayoutError::MalformedParts(format!(
                    "part {} is {:?}, expected {:?}",
                    index, part.role, expected
                )));
            }
        }
        Ok(Self {
            source: stored.source,
            font_size: stored.font_size,
            parts: stored.parts,
        })
    }
}

impl PositionedEquation {
    /// The `LHS = rhs` text this equation was built from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn parts(&self) -> &[EquationPart] {
        &self.parts
    }

    pub fn part(&self, index: usize) -> Option<&EquationPart> {
        self.parts.get(index)
    }

    pub fn lhs(&self) -> &EquationPart {
        &self.parts[LHS_INDEX]
    }

    pub fn anchor(&self) -> &EquationPart {
        &self.parts[ANCHOR_INDEX]
    }

    pub fn fragments(&self) -> &[EquationPart] {
        &self.parts[FIRST_FRAGMENT_INDEX..]
    }

    pub fn part_texts(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }

    /// Left edge of the anchor
    pub fn anchor_x(&self) -> f32 {
        self.anchor().bounds.left()
    }

    /// Vertical centre of the anchor
    pub fn anchor_y(&self) -> f32 {
        self.anchor().bounds.center_y()
    }

    /// Bounding box of all parts
    pub fn bounds(&self) -> Rect {
        Rect::union_all(self.parts.iter().map(|p| &p.bounds)).unwrap_or_default()
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn right_edge(&self) -> f32 {
        self.bounds().right()
    }

    pub fn left_edge(&self) -> f32 {
        self.bounds().left()
    }

    /// Move the whole equation by a delta
    pub fn translate(&mut self, dx: f32, dy: f32) {
        for part in &mut self.parts {
            part.bounds = part.bounds.translated(dx, dy);
        }
    }

    /// Put the anchor's left edge at `x` and its centre at `y`, then re-derive
    /// the other parts around it.
    fn place_anchor(&mut self, x: f32, y: f32, spacing: f32) {
        let anchor = &mut self.parts[ANCHOR_INDEX].bounds;
        anchor.origin.x = x;
        anchor.origin.y = y - anchor.height() / 2.0;
        self.arrange(spacing);
    }

    /// LHS flush left of the anchor, fragments contiguous to its right
    fn arrange(&mut self, spacing: f32) {
        let anchor = self.parts[ANCHOR_INDEX].bounds;
        let center_y = anchor.center_y();

        let lhs = &mut self.parts[LHS_INDEX].bounds;
        lhs.origin.x = anchor.left() - spacing - lhs.width();
        lhs.origin.y = center_y - lhs.height() / 2.0;

        let mut x = anchor.right() + spacing;
        for part in &mut self.parts[FIRST_FRAGMENT_INDEX..] {
            part.bounds.origin.x = x;
            part.bounds.origin.y = center_y - part.bounds.height() / 2.0;
            x += part.bounds.width();
        }
    }
}

/// A single positioned string: number labels and unsplit stacked rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub font_size: f32,
    pub bounds: Rect,
}

impl TextBlock {
    pub fn center(&self) -> Point {
        self.bounds.center()
    }
}

// =============================================================================
// Layout Engine
// =============================================================================

/// Engine for computing equation layout
pub struct LayoutEngine<M = MetricsMeasurer> {
    measurer: M,
    config: LayoutConfig,
}

impl LayoutEngine<MetricsMeasurer> {
    /// Create a new layout engine with the built-in measurer and defaults
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// Create with specific configuration
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            measurer: MetricsMeasurer::new(),
            config,
        }
    }
}

impl Default for LayoutEngine<MetricsMeasurer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TextMeasurer> LayoutEngine<M> {
    /// Create with a renderer-provided measurer
    pub fn with_measurer(measurer: M, config: LayoutConfig) -> Self {
        Self { measurer, config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Vertical gap between consecutive rows at `font_size`
    pub fn row_gap(&self, font_size: f32) -> f32 {
        self.config.row_gap_factor * self.measurer.line_height(font_size)
    }

    /// Build one equation with its anchor at the origin
    pub fn build(&self, spec: &str, font_size: f32) -> Result<PositionedEquation> {
        check_font_size(font_size)?;
        let texts = split(spec)?;

        let parts = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                let role = PartRole::at(index);
                let size = self.measurer.measure(&text, font_size);
                EquationPart {
                    role,
                    text,
                    bounds: Rect::from_origin_size(Point::origin(), size),
                }
            })
            .collect();

        let mut equation = PositionedEquation {
            source: spec.to_string(),
            font_size,
            parts,
        };
        equation.place_anchor(0.0, 0.0, self.config.part_spacing);
        Ok(equation)
    }

    /// Lay out a batch of equations as one anchor-aligned column.
    ///
    /// Row 0's anchor lands on `start`, unless `reference` is given, in which
    /// case row 0 takes the reference's anchor x. Every later row hangs below
    /// the previous one, shifted down by `extra_offsets[i - 1]` when present,
    /// and copies the previous row's anchor x.
    pub fn layout<S: AsRef<str>>(
        &self,
        specs: &[S],
        start: Point,
        font_size: f32,
        extra_offsets: Option<&[f32]>,
        reference: Option<&PositionedEquation>,
    ) -> Result<Vec<PositionedEquation>> {
        if specs.is_empty() {
            return Ok(Vec::new());
        }
        self.config.validate()?;
        check_offsets(extra_offsets, specs.len())?;

        let mut rows = specs
            .iter()
            .map(|spec| self.build(spec.as_ref(), font_size))
            .collect::<Result<Vec<_>>>()?;

        let gap = self.row_gap(font_size);
        let spacing = self.config.part_spacing;

        let mut previous_bottom: Option<f32> = None;
        for (i, row) in rows.iter_mut().enumerate() {
            let y = match previous_bottom {
                None => start.y,
                Some(bottom) => {
                    let extra = extra_offset(extra_offsets, i);
                    let top_above_anchor = row.bounds().top() - row.anchor_y();
                    bottom - gap - extra - top_above_anchor
                }
            };
            row.place_anchor(row.anchor_x(), y, spacing);
            previous_bottom = Some(row.bounds().bottom());
        }

        let first_x = reference.map_or(start.x, PositionedEquation::anchor_x);
        let column_x = rows.iter_mut().fold(first_x, |previous_x, row| {
            row.place_anchor(previous_x, row.anchor_y(), spacing);
            row.anchor_x()
        });

        tracing::debug!(
            rows = rows.len(),
            font_size,
            anchor_x = column_x,
            "laid out equation batch"
        );
        Ok(rows)
    }

    /// Move `new` onto `old`'s anchor and return it. `old` is untouched.
    pub fn replace(&self, old: &PositionedEquation, mut new: PositionedEquation) -> PositionedEquation {
        new.place_anchor(old.anchor_x(), old.anchor_y(), self.config.part_spacing);
        tracing::trace!(from = old.source(), to = new.source(), "replaced equation in place");
        new
    }

    /// Build each spec at `old`'s font size and land it on `old`'s anchor
    pub fn replace_chain<S: AsRef<str>>(
        &self,
        old: &PositionedEquation,
        specs: &[S],
    ) -> Result<Vec<PositionedEquation>> {
        specs
            .iter()
            .map(|spec| {
                let built = self.build(spec.as_ref(), old.font_size())?;
                Ok(self.replace(old, built))
            })
            .collect()
    }

    /// Stack unsplit expressions, each centred under the previous one
    pub fn stack<S: AsRef<str>>(
        &self,
        texts: &[S],
        start: Point,
        font_size: f32,
        extra_offsets: Option<&[f32]>,
    ) -> Result<Vec<TextBlock>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.config.validate()?;
        check_font_size(font_size)?;
        check_offsets(extra_offsets, texts.len())?;

        let gap = self.row_gap(font_size);
        let mut blocks: Vec<TextBlock> = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            let text = text.as_ref();
            let size = self.measurer.measure(text, font_size);
            let center_y = match blocks.last() {
                None => start.y,
                Some(previous) => {
                    previous.bounds.bottom() - gap - extra_offset(extra_offsets, i)
                        - size.height / 2.0
                }
            };
            blocks.push(TextBlock {
                text: text.to_string(),
                font_size,
                bounds: Rect::centered_at(Point::new(start.x, center_y), size),
            });
        }
        Ok(blocks)
    }

    /// Measure a single string centred on `center`
    pub fn text_block(&self, text: &str, center: Point, font_size: f32) -> Result<TextBlock> {
        check_font_size(font_size)?;
        let size = self.measurer.measure(text, font_size);
        Ok(TextBlock {
            text: text.to_string(),
            font_size,
            bounds: Rect::centered_at(center, size),
        })
    }
}

/// Offsets cover rows 1..n, so a list for `rows` rows needs `rows - 1` entries
fn check_offsets(extra_offsets: Option<&[f32]>, rows: usize) -> Result<()> {
    match extra_offsets {
        Some(offsets) if offsets.len() + 1 < rows => Err(LayoutError::IndexMismatch {
            index: offsets.len(),
            len: offsets.len(),
        }),
        _ => Ok(()),
    }
}

fn extra_offset(extra_offsets: Option<&[f32]>, row: usize) -> f32 {
    extra_offsets
        .and_then(|offsets| offsets.get(row - 1))
        .copied()
        .unwrap_or(0.0)
}

// =============================================================================
// Tests
// =============================================================================
