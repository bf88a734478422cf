//! Label text for treemap rectangles.
//!
//! Leaves and nodes at the depth cutoff wrap at whitespace; other parents
//! get a single `"name (value)"` line. Anything that still overflows is cut
//! and ends in `"… (value)"`.

use unicode_width::UnicodeWidthStr;

/// Text width oracle.
///
/// Render adapters with real font metrics plug in here; the default is a
/// fixed-advance approximation.
pub trait TextMeasure {
    /// Rendered width of `text` at `font_size`.
    fn width(&self, text: &str, font_size: f64) -> f64;
}

/// Fixed advance per terminal column, scaled by font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    /// Advance per column as a fraction of the font size
    pub advance: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn width(&self, text: &str, font_size: f64) -> f64 {
        text.width() as f64 * font_size * self.advance
    }
}

/// Type metrics for rectangle labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    /// Font size
    pub font_size: f64,
    /// Horizontal inset of the text start
    pub inset_x: f64,
    /// Baseline of the first line, measured from the rectangle top
    pub first_baseline: f64,
    /// Distance between baselines
    pub line_height: f64,
}

impl Default for LabelMetrics {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            inset_x: 3.0,
            first_baseline: 13.0,
            line_height: 11.0,
        }
    }
}

impl LabelMetrics {
    /// Usable text width inside a rectangle.
    #[must_use]
    pub fn available_width(&self, rect_width: f64) -> f64 {
        rect_width - 2.0 * self.inset_x
    }

    /// How many baselines fit inside a rectangle.
    #[must_use]
    pub fn max_lines(&self, rect_height: f64) -> usize {
        if rect_height.is_nan() || rect_height < self.first_baseline || self.line_height <= 0.0 {
            return 0;
        }
        // float casts saturate
        (((rect_height - self.first_baseline) / self.line_height).floor() as usize).saturating_add(1)
    }
}

/// How a label may use its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
    /// Wrap at whitespace onto as many lines as fit
    Wrap,
    /// One line, truncated if needed
    SingleLine,
}

/// Format an aggregate with thousands separators (`1234` → `"1,234"`).
#[must_use]
pub fn format_value(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 && digits != "0" {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fits label text into rectangles using a [`TextMeasure`].
pub struct LabelFitter<'a> {
    measure: &'a dyn TextMeasure,
    metrics: LabelMetrics,
}

impl<'a> LabelFitter<'a> {
    /// Create a fitter.
    #[must_use]
    pub fn new(measure: &'a dyn TextMeasure, metrics: LabelMetrics) -> Self {
        Self { measure, metrics }
    }

    /// Label lines for a node.
    ///
    /// `show_value` adds the `" (value)"` suffix to the untruncated text;
    /// the truncation suffix always carries the value.
    #[must_use]
    pub fn fit(
        &self,
        name: &str,
        value: f64,
        show_value: bool,
        mode: LabelMode,
        rect_width: f64,
        rect_height: f64,
    ) -> Vec<String> {
        let max_lines = self.metrics.max_lines(rect_height);
        let width = self.metrics.available_width(rect_width);
        if max_lines == 0 || width <= 0.0 {
            return Vec::new();
        }
        let formatted = format_value(value);
        let full = if show_value {
            format!("{name} ({formatted})")
        } else {
            name.to_string()
        };
        let suffix = format!("\u{2026} ({formatted})");

        match mode {
            LabelMode::SingleLine if self.fits(&full, width) => vec![full],
            LabelMode::SingleLine => vec![self.ellipsize(name, &suffix, width)],
            LabelMode::Wrap => {
                let lines = self.wrap(&full, width);
                if lines.len() <= max_lines && lines.iter().all(|l| self.fits(l, width)) {
                    lines
                } else {
                    self.wrap_truncated(name, &suffix, width, max_lines)
                }
            }
        }
    }

    fn fits(&self, text: &str, width: f64) -> bool {
        self.measure.width(text, self.metrics.font_size) <= width
    }

    /// Greedy whitespace wrap. A word wider than `width` gets a line of its
    /// own.
    fn wrap(&self, text: &str, width: f64) -> Vec<String> {
        let mut lines = Vec::new();
        let mut line = String::new();
        for word in text.split_whitespace() {
            let candidate = join(&line, word);
            if line.is_empty() || self.fits(&candidate, width) {
                line = candidate;
            } else {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
        lines
    }

    /// Wrap `name` into at most `max_lines` lines, cutting the last one (or
    /// the first line holding an over-wide word) and appending `suffix`.
    fn wrap_truncated(&self, name: &str, suffix: &str, width: f64, max_lines: usize) -> Vec<String> {
        let mut out = Vec::new();
        let mut words = name.split_whitespace().peekable();
        let mut line = String::new();
        while out.len() + 1 < max_lines {
            let Some(word) = words.peek() else { break };
            let candidate = join(&line, word);
            if self.fits(&candidate, width) {
                line = candidate;
                words.next();
            } else if line.is_empty() {
                break;
            } else {
                out.push(std::mem::take(&mut line));
            }
        }
        let rest: Vec<&str> = words.collect();
        let tail = join(&line, &rest.join(" "));
        let last = self.ellipsize(&tail, suffix, width);
        if !last.is_empty() {
            out.push(last);
        }
        out
    }

    /// Longest prefix of `text` that still fits with `suffix` appended.
    fn ellipsize(&self, text: &str, suffix: &str, width: f64) -> String {
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        for &end in boundaries.iter().rev() {
            let candidate = format!("{}{suffix}", text[..end].trim_end());
            if self.fits(&candidate, width) {
                return candidate;
            }
        }
        if self.fits("\u{2026}", width) {
            "\u{2026}".to_string()
        } else {
            String::new()
        }
    }
}

fn join(line: &str, word: &str) -> String {
    match (line.is_empty(), word.is_empty()) {
        (true, _) => word.to_string(),
        (_, true) => line.to_string(),
        _ => format!("{line} {word}"),
    }
}
