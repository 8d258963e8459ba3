//! Equation Layout - Anchor-aligned equation columns for slide decks
//!
//! This crate lays out batches of marked-up equations so their `=` signs line
//! up in one vertical column:
//! - Splitting specs of the form `lhs = frag_1 || frag_2 ...`
//! - Building equations from independently measured parts
//! - Stacking batches with chained anchor alignment
//! - Replacing an equation in place on the old anchor
//! - Numbering columns flush to a reference row
//! - Rendering to primitives for an external typesetter

pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod measure;
pub mod numbering;
pub mod render;
pub mod split;

pub use config::{LayoutConfig, DEFAULT_FONT_SIZE, DEFAULT_ROW_GAP_FACTOR};
pub use error::*;
pub use geometry::{Point, Rect, Size};
pub use layout::{EquationPart, LayoutEngine, PartRole, PositionedEquation, TextBlock};
pub use measure::{MetricsMeasurer, TextMeasurer, TextMetrics};
pub use numbering::{label_text, NumberLabel};
pub use render::{Color, RenderConfig, RenderOutput, RenderPrimitive, Renderer, TextStyle};
pub use split::{fragment_count, split, ANCHOR, FRAGMENT_SEPARATOR};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // =============================================================================
    // Integration Tests
    // =============================================================================

    #[test]
    fn test_layout_number_render_pipeline() {
        let engine = LayoutEngine::new();
        let rows = engine
            .layout(
                &[
                    r"\frac{dx}{dt} = \sigma(y_1-x_1)",
                    r"\frac{dy}{dt} = x_1(\rho-z_1)-y_1",
                    r"\frac{dz}{dt} = x_1y_1 - \beta z_1",
                ],
                Point::new(105.0, 75.0),
                DEFAULT_FONT_SIZE,
                None,
                None,
            )
            .unwrap();
        let labels = engine.number(&rows, DEFAULT_FONT_SIZE, 120.0, 0, None).unwrap();

        let renderer = Renderer::new();
        let output = renderer.render_equations(&rows);
        assert_eq!(output.primitives.len(), 9);
        assert_eq!(renderer.render_labels(&labels).primitives.len(), 3);
    }

    #[test]
    fn test_custom_measurer() {
        struct Fixed;
        impl TextMeasurer for Fixed {
            fn measure(&self, text: &str, _font_size: f32) -> Size {
                Size::new(text.len() as f32 * 10.0, 20.0)
            }
            fn line_height(&self, _font_size: f32) -> f32 {
                20.0
            }
        }

        let engine = LayoutEngine::with_measurer(Fixed, LayoutConfig::default());
        let rows = engine
            .layout(&["ab=c", "d=ef"], Point::origin(), 12.0, None, None)
            .unwrap();
        assert_eq!(rows[0].lhs().bounds.left(), -20.0);
        assert_eq!(rows[1].lhs().bounds.left(), -10.0);
        assert_eq!(rows[1].anchor_y(), -30.0);
        assert_eq!(rows[1].right_edge(), 30.0);
    }

    // =============================================================================
    // Properties
    // =============================================================================

    fn fragment() -> impl Strategy<Value = String> {
        "[a-z0-9+\\- ]{0,6}"
    }

    fn spec() -> impl Strategy<Value = String> {
        (fragment(), prop::collection::vec(fragment(), 1..4))
            .prop_map(|(lhs, rhs)| format!("{}={}", lhs, rhs.join("||")))
    }

    proptest! {
        #[test]
        fn prop_split_shape(lhs in fragment(), rhs in prop::collection::vec(fragment(), 1..5)) {
            let spec = format!("{}={}", lhs, rhs.join("||"));
            let parts = split(&spec).unwrap();
            prop_assert_eq!(parts[1].as_str(), ANCHOR);
            prop_assert_eq!(parts.len(), 2 + rhs.len());
            prop_assert_eq!(&parts[0], &lhs);
        }

        #[test]
        fn prop_anchor_column_is_exact(
            specs in prop::collection::vec(spec(), 1..8),
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
        ) {
            let rows = LayoutEngine::new()
                .layout(&specs, Point::new(x, y), 30.0, None, None)
                .unwrap();
            for row in &rows {
                prop_assert_eq!(row.anchor_x(), x);
            }
        }

        #[test]
        fn prop_rows_step_down_uniformly(specs in prop::collection::vec(spec(), 2..8)) {
            let engine = LayoutEngine::new();
            let rows = engine.layout(&specs, Point::origin(), 30.0, None, None).unwrap();
            let step = engine.measurer().line_height(30.0) + engine.row_gap(30.0);
            for pair in rows.windows(2) {
                prop_assert!((pair[0].anchor_y() - step - pair[1].anchor_y()).abs() < 1e-2);
            }
        }

        #[test]
        fn prop_parts_ordered_without_overlap(spec in spec()) {
            let eq = LayoutEngine::new().build(&spec, 30.0).unwrap();
            for pair in eq.parts().windows(2) {
                prop_assert!(pair[0].bounds.right() <= pair[1].bounds.left() + 1e-3);
            }
        }

        #[test]
        fn prop_replace_is_idempotent(old in spec(), new in spec(), dx in -100.0f32..100.0, dy in -100.0f32..100.0) {
            let engine = LayoutEngine::new();
            let mut old = engine.build(&old, 30.0).unwrap();
            old.translate(dx, dy);
            let once = engine.replace(&old, engine.build(&new, 30.0).unwrap());
            let twice = engine.replace(&old, once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_numbering_text_and_column(
            specs in prop::collection::vec(spec(), 1..6),
            start in 0usize..20,
            offset in 0.0f32..200.0,
        ) {
            let engine = LayoutEngine::new();
            let rows = engine.layout(&specs, Point::origin(), 30.0, None, None).unwrap();
            let labels = engine.number(&rows, 30.0, offset, start, None).unwrap();
            let column = labels[0].center().x;
            for (i, label) in labels.iter().enumerate() {
                prop_assert_eq!(label.text(), format!("({})", start + i + 1));
                prop_assert_eq!(label.center().x, column);
            }
        }
    }
}
