//! Text measurement
//!
//! The renderer that finally typesets an equation lives outside this crate, so
//! layout asks a [`TextMeasurer`] for extents. [`MetricsMeasurer`] is the
//! built-in estimator: it walks the marked-up string once, counting grapheme
//! clusters and applying a handful of LaTeX-aware rules (control words are one
//! glyph, `\frac` stacks two lines, scripts are scaled down). It is good enough
//! to align columns; it is not a typesetter.

use crate::geometry::Size;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Reports the extent a string will occupy once rendered
pub trait TextMeasurer {
    /// Bounding size of `text` at `font_size`
    fn measure(&self, text: &str, font_size: f32) -> Size;

    /// Height of one line of text at `font_size`
    fn line_height(&self, font_size: f32) -> f32;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font_size: f32) -> Size {
        (**self).measure(text, font_size)
    }

    fn line_height(&self, font_size: f32) -> f32 {
        (**self).line_height(font_size)
    }
}

/// Font metrics used for estimating text extents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextMetrics {
    /// Base font size in points
    pub font_size: f32,
    /// Ascent above baseline
    pub ascent: f32,
    /// Descent below baseline
    pub descent: f32,
    /// Width of a typical character
    pub char_width: f32,
    /// Scale factor for sub/superscript
    pub script_scale: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::for_size(crate::config::DEFAULT_FONT_SIZE)
    }
}

impl TextMetrics {
    /// Create metrics for a given font size
    pub fn for_size(font_size: f32) -> Self {
        // Approximate values for a typical math font
        let em = font_size;
        Self {
            font_size,
            ascent: em * 0.8,
            descent: em * 0.2,
            char_width: em * 0.5,
            script_scale: 0.7,
        }
    }

    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Estimates extents from [`TextMetrics`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsMeasurer;

impl MetricsMeasurer {
    pub fn new() -> Self {
        Self
    }
}

impl TextMeasurer for MetricsMeasurer {
    fn measure(&self, text: &str, font_size: f32) -> Size {
        let metrics = TextMetrics::for_size(font_size);
        let extent = Estimator::new(text, metrics.script_scale).run();
        Size::new(
            extent.width * metrics.char_width,
            extent.lines.max(1.0) * metrics.line_height(),
        )
    }

    fn line_height(&self, font_size: f32) -> f32 {
        TextMetrics::for_size(font_size).line_height()
    }
}

/// Width in character widths, height in lines
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Extent {
    width: f32,
    lines: f32,
}

impl Extent {
    fn glyphs(width: f32) -> Self {
        Self { width, lines: 1.0 }
    }

    fn beside(self, other: Extent) -> Self {
        Self {
            width: self.width + other.width,
            lines: self.lines.max(other.lines),
        }
    }

    fn scaled(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            lines: self.lines,
        }
    }
}

struct Estimator<'a> {
    graphemes: Vec<&'a str>,
    pos: usize,
    script_scale: f32,
}

impl<'a> Estimator<'a> {
    fn new(text: &'a str, script_scale: f32) -> Self {
        Self {
            graphemes: text.graphemes(true).collect(),
            pos: 0,
            script_scale,
        }
    }

    fn run(mut self) -> Extent {
        let mut total = Extent::default();
        // A stray closing brace at top level is just skipped
        while self.pos < self.graphemes.len() {
            total = total.beside(self.sequence());
            if self.peek() == Some("}") {
                self.pos += 1;
            }
        }
        total
    }

    fn peek(&self) -> Option<&'a str> {
        self.graphemes.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<&'a str> {
        let g = self.peek()?;
        self.pos += 1;
        Some(g)
    }

    /// Items up to the end of input or an unmatched `}`
    fn sequence(&mut self) -> Extent {
        let mut total = Extent::default();
        while let Some(g) = self.peek() {
            if g == "}" {
                break;
            }
            total = total.beside(self.item());
        }
        total
    }

    fn item(&mut self) -> Extent {
        match self.next() {
            None => Extent::default(),
            Some("{") => self.group_body(),
            Some("\\") => self.control(),
            Some("_") | Some("^") => self.argument().scaled(self.script_scale),
            Some("&") => Extent::default(),
            Some("'") => Extent::glyphs(0.5),
            Some(g) if g.chars().all(char::is_whitespace) => Extent::default(),
            Some(_) => Extent::glyphs(1.0),
        }
    }

    /// Contents of a `{...}` group whose opening brace was consumed
    fn group_body(&mut self) -> Extent {
        let inner = self.sequence();
        if self.peek() == Some("}") {
            self.pos += 1;
        }
        inner
    }

    /// A macro argument: a group, a control sequence, or one grapheme
    fn argument(&mut self) -> Extent {
        while self
            .peek()
            .is_some_and(|g| g.chars().all(char::is_whitespace))
        {
            self.pos += 1;
        }
        match self.peek() {
            None => Extent::default(),
            Some("}") => Extent::default(),
            Some(_) => self.item(),
        }
    }

    fn control(&mut self) -> Extent {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|g| g.chars().all(|c| c.is_ascii_alphabetic()))
        {
            self.pos += 1;
        }
        if self.pos == start {
            // Control symbol such as `\,` or `\{`
            return match self.next() {
                Some(",") | Some(";") | Some(":") => Extent::glyphs(0.3),
                Some("!") | Some("\\") | None => Extent::default(),
                Some(_) => Extent::glyphs(1.0),
            };
        }
        let word: String = self.graphemes[start..self.pos].concat();
        match word.as_str() {
            "frac" | "dfrac" | "tfrac" => {
                let num = self.argument();
                let den = self.argument();
                Extent {
                    width: num.width.max(den.width),
                    lines: num.lines.max(1.0) + den.lines.max(1.0),
                }
            }
            "left" | "right" | "displaystyle" | "textstyle" => Extent::default(),
            "quad" => Extent::glyphs(2.0),
            "qquad" => Extent::glyphs(4.0),
            "sin" | "cos" | "tan" | "log" | "exp" | "lim" => {
                Extent::glyphs(word.len() as f32)
            }
            _ => Extent::glyphs(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width_in_chars(text: &str) -> f32 {
        let measurer = MetricsMeasurer::new();
        measurer.measure(text, 10.0).width / TextMetrics::for_size(10.0).char_width
    }

    fn lines(text: &str) -> f32 {
        let measurer = MetricsMeasurer::new();
        measurer.measure(text, 10.0).height / measurer.line_height(10.0)
    }

    #[test]
    fn test_plain_text_counts_graphemes() {
        assert_eq!(width_in_chars("abc"), 3.0);
        assert_eq!(width_in_chars("a b"), 2.0);
        assert_eq!(width_in_chars("é"), 1.0);
        assert_eq!(lines("abc"), 1.0);
    }

    #[test]
    fn test_control_word_is_one_glyph() {
        assert_eq!(width_in_chars(r"\theta"), 1.0);
        assert_eq!(width_in_chars(r"\sigma(y-x)"), 6.0);
    }

    #[test]
    fn test_scripts_are_scaled() {
        let w = width_in_chars("x_1");
        assert!((w - 1.7).abs() < 1e-5);
        let w = width_in_chars("x_{12}");
        assert!((w - 2.4).abs() < 1e-5);
    }

    #[test]
    fn test_fraction_stacks() {
        assert_eq!(width_in_chars(r"\frac{dx}{dt}"), 2.0);
        assert_eq!(lines(r"\frac{dx}{dt}"), 2.0);
        assert_eq!(lines(r"\frac{\frac{a}{b}}{c}"), 3.0);
    }

    #[test]
    fn test_empty_text_has_line_height() {
        let measurer = MetricsMeasurer::new();
        let size = measurer.measure("", 30.0);
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, measurer.line_height(30.0));
    }

    #[test]
    fn test_unbalanced_braces_terminate() {
        assert_eq!(width_in_chars("a}b"), 2.0);
        assert_eq!(width_in_chars("{ab"), 2.0);
        assert_eq!(width_in_chars(r"\frac{a}"), 1.0);
    }

    #[test]
    fn test_scales_with_font_size() {
        let measurer = MetricsMeasurer::new();
        let small = measurer.measure("abc", 10.0);
        let large = measurer.measure("abc", 20.0);
        assert_eq!(large.width, small.width * 2.0);
        assert_eq!(large.height, small.height * 2.0);
    }
}
