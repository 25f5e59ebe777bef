//! Pixel-budget line wrapping using measured glyph widths

use tailwatch_core::prelude::warn;
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

/// Prefix of every continuation line (two ideographic spaces)
pub const CONTINUATION_INDENT: &str = "\u{3000}\u{3000}";

/// Horizontal padding subtracted from the budget
pub const WRAP_MARGIN_PX: u32 = 2;

/// Pixels per point at 96 DPI
const PX_PER_PT: f32 = 4.0 / 3.0;

/// Advance of one terminal column relative to the em size
const COLUMN_ASPECT: f32 = 0.55;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    #[error("invalid font size: {0}pt")]
    InvalidFont(f32),

    #[error("measurement failed: {0}")]
    Failed(String),
}

/// Measures rendered text width in pixels for one specific font
#[cfg_attr(test, mockall::automock)]
pub trait TextMeasure {
    fn measure(&self, text: &str) -> Result<u32, MeasureError>;
}

/// Font parameters used for measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub size_pt: f32,
}

/// Monospace metrics: every terminal column has the same pixel advance,
/// wide (CJK) characters take two columns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    font: FontSpec,
    advance_px: u32,
}

impl MonospaceMetrics {
    pub fn for_font(font: FontSpec) -> Self {
        let advance_px = if font.size_pt > 0.0 && font.size_pt.is_finite() {
            ((font.size_pt * PX_PER_PT * COLUMN_ASPECT).round() as u32).max(1)
        } else {
            0
        };
        Self { font, advance_px }
    }

    /// Pixel width of one column, 0 for an unusable font
    pub fn advance_px(&self) -> u32 {
        self.advance_px
    }
}

impl TextMeasure for MonospaceMetrics {
    fn measure(&self, text: &str) -> Result<u32, MeasureError> {
        if self.advance_px == 0 {
            return Err(MeasureError::InvalidFont(self.font.size_pt));
        }
        Ok(text.width() as u32 * self.advance_px)
    }
}

/// Wrapping parameters for one display style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapConfig {
    pub max_width_px: u32,
    pub font: FontSpec,
}

/// Output lines: the first verbatim, the rest indented
#[derive(Default)]
struct WrappedLines {
    lines: Vec<String>,
}

impl WrappedLines {
    fn push(&mut self, text: &str) {
        if self.lines.is_empty() {
            self.lines.push(text.to_string());
        } else {
            self.lines.push(format!("{}{}", CONTINUATION_INDENT, text));
        }
    }
}

/// Greedy word wrapper bound to one font and width budget
pub struct TextWrapper {
    max_width_px: u32,
    measure: Box<dyn TextMeasure + Send>,
}

impl std::fmt::Debug for TextWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextWrapper")
            .field("max_width_px", &self.max_width_px)
            .finish_non_exhaustive()
    }
}

impl TextWrapper {
    pub fn new(config: WrapConfig) -> Self {
        Self::with_measure(
            config.max_width_px,
            Box::new(MonospaceMetrics::for_font(config.font)),
        )
    }

    pub fn with_measure(max_width_px: u32, measure: Box<dyn TextMeasure + Send>) -> Self {
        Self {
            max_width_px,
            measure,
        }
    }

    /// Reflow `line` to the width budget.
    ///
    /// A blank line, or one that already fits, comes back unchanged. If any
    /// measurement fails the original line is returned.
    pub fn wrap(&self, line: &str) -> Vec<String> {
        if line.trim().is_empty() {
            return vec![line.to_string()];
        }
        match self.try_wrap(line) {
            Ok(lines) => lines,
            Err(e) => {
                warn!("Line wrapping failed, showing unwrapped line: {}", e);
                vec![line.to_string()]
            }
        }
    }

    /// Hard-cut `line` to the width budget without wrapping
    pub fn truncate(&self, line: &str) -> String {
        let budget = self.max_width_px.saturating_sub(WRAP_MARGIN_PX);
        let mut out = String::new();
        for ch in line.chars() {
            out.push(ch);
            match self.measure.measure(&out) {
                Ok(width) if width <= budget => {}
                Ok(_) => {
                    out.pop();
                    break;
                }
                Err(e) => {
                    warn!("Line truncation failed, showing full line: {}", e);
                    return line.to_string();
                }
            }
        }
        out
    }

    fn try_wrap(&self, line: &str) -> Result<Vec<String>, MeasureError> {
        let available = self
            .max_width_px
            .saturating_sub(self.measure.measure(CONTINUATION_INDENT)?)
            .saturating_sub(WRAP_MARGIN_PX);

        if self.measure.measure(line)? <= available {
            return Ok(vec![line.to_string()]);
        }

        let mut out = WrappedLines::default();
        let mut current = String::new();

        for word in line.split(' ').filter(|w| !w.is_empty()) {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if self.measure.measure(&candidate)? <= available {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                out.push(&current);
                current.clear();
            }

            if self.measure.measure(word)? > available {
                self.split_long_word(word, available, &mut out)?;
            } else {
                current = word.to_string();
            }
        }

        if !current.is_empty() {
            out.push(&current);
        }

        if out.lines.is_empty() {
            Ok(vec![line.to_string()])
        } else {
            Ok(out.lines)
        }
    }

    /// Character-level fallback for a token wider than the budget
    fn split_long_word(
        &self,
        word: &str,
        available: u32,
        out: &mut WrappedLines,
    ) -> Result<(), MeasureError> {
        let mut chunk = String::new();
        for ch in word.chars() {
            chunk.push(ch);
            if self.measure.measure(&chunk)? > available && chunk.chars().count() > 1 {
                chunk.pop();
                out.push(&chunk);
                chunk.clear();
                chunk.push(ch);
            }
        }
        if !chunk.is_empty() {
            out.push(&chunk);
        }
        Ok(())
    }
}
