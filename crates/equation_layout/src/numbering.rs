//! Equation Numbering - A column of `(k)` labels right of a batch
//!
//! All labels share one x: the right edge of a reference row plus a fixed
//! offset. Each label sits at its own row's vertical centre, so rows of very
//! different widths still number into a single column.

use crate::config::check_font_size;
use crate::error::Result;
use crate::geometry::Point;
use crate::layout::{LayoutEngine, PositionedEquation, TextBlock};
use crate::measure::TextMeasurer;
use serde::{Deserialize, Serialize};

/// A rendered equation number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberLabel {
    /// The number shown, already including any start offset
    pub number: usize,
    /// Column x and row centre y the label is centred on
    pub position: Point,
    /// The `(k)` text and its bounds
    pub block: TextBlock,
}

impl NumberLabel {
    pub fn text(&self) -> &str {
        &self.block.text
    }

    pub fn center(&self) -> Point {
        self.position
    }
}

/// Display text for equation number `number`
pub fn label_text(number: usize) -> String {
    format!("({})", number)
}

impl<M: TextMeasurer> LayoutEngine<M> {
    /// Number `rows` as `(start_index + 1)`, `(start_index + 2)`, ...
    ///
    /// The column x is `edge_reference` (or `rows[0]`) right edge plus
    /// `horizontal_offset`.
    pub fn number(
        &self,
        rows: &[PositionedEquation],
        font_size: f32,
        horizontal_offset: f32,
        start_index: usize,
        edge_reference: Option<&PositionedEquation>,
    ) -> Result<Vec<NumberLabel>> {
        let Some(edge_row) = edge_reference.or_else(|| rows.first()) else {
            return Ok(Vec::new());
        };
        check_font_size(font_size)?;

        let column_x = edge_row.right_edge() + horizontal_offset;
        tracing::debug!(
            rows = rows.len(),
            column_x,
            start_index,
            "placed numbering column"
        );

        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let number = i + 1 + start_index;
                let position = Point::new(column_x, row.bounds().center_y());
                let block = self.text_block(&label_text(number), position, font_size)?;
                Ok(NumberLabel {
                    number,
                    position,
                    block,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn rows(engine: &LayoutEngine) -> Vec<PositionedEquation> {
        engine
            .layout(
                &["a=b", r"long_{side}=x||+y||+z", r"\frac{dy}{dt}=q"],
                Point::new(0.0, 100.0),
                30.0,
                None,
                None,
            )
            .unwrap()
    }

    #[test]
    fn test_label_text() {
        assert_eq!(label_text(1), "(1)");
        assert_eq!(label_text(12), "(12)");
    }

    #[test]
    fn test_number_with_start_index() {
        let engine = LayoutEngine::new();
        let rows = rows(&engine);
        let labels = engine.number(&rows[..2], 30.0, 4.0, 3, None).unwrap();
        let texts: Vec<_> = labels.iter().map(NumberLabel::text).collect();
        assert_eq!(texts, vec!["(4)", "(5)"]);
        for label in &labels {
            assert_eq!(label.center().x, rows[0].right_edge() + 4.0);
        }
    }

    #[test]
    fn test_labels_follow_row_centres() {
        let engine = LayoutEngine::new();
        let rows = rows(&engine);
        let labels = engine.number(&rows, 30.0, 120.0, 0, None).unwrap();
        assert_eq!(labels.len(), 3);
        for (label, row) in labels.iter().zip(&rows) {
            assert!((label.center().y - row.bounds().center_y()).abs() < EPS);
        }
        assert_eq!(labels[2].number, 3);
    }

    #[test]
    fn test_edge_reference_overrides_first_row() {
        let engine = LayoutEngine::new();
        let rows = rows(&engine);
        let labels = engine.number(&rows, 30.0, 10.0, 0, Some(&rows[1])).unwrap();
        let expected = rows[1].right_edge() + 10.0;
        assert!(labels.iter().all(|l| l.center().x == expected));
    }

    #[test]
    fn test_number_empty_rows() {
        let engine = LayoutEngine::new();
        assert!(engine.number(&[], 30.0, 4.0, 0, None).unwrap().is_empty());
    }
}
