use std::ops::Range;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InlineStyle {
    Bold,
    RedLine,
    Underline,
}

impl InlineStyle {
    pub const ALL: [InlineStyle; 3] = [
        InlineStyle::Bold,
        InlineStyle::RedLine,
        InlineStyle::Underline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InlineStyle::Bold => "BOLD",
            InlineStyle::RedLine => "RED_LINE",
            InlineStyle::Underline => "UNDERLINE",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StyleSet {
    pub bold: bool,
    pub red_line: bool,
    pub underline: bool,
}

impl StyleSet {
    pub fn contains(&self, style: InlineStyle) -> bool {
        match style {
            InlineStyle::Bold => self.bold,
            InlineStyle::RedLine => self.red_line,
            InlineStyle::Underline => self.underline,
        }
    }

    pub fn set(&mut self, style: InlineStyle, on: bool) {
        match style {
            InlineStyle::Bold => self.bold = on,
            InlineStyle::RedLine => self.red_line = on,
            InlineStyle::Underline => self.underline = on,
        }
    }

    pub fn with(mut self, style: InlineStyle) -> Self {
        self.set(style, true);
        self
    }

    pub fn without(mut self, style: InlineStyle) -> Self {
        self.set(style, false);
        self
    }

    pub fn toggled(self, style: InlineStyle) -> Self {
        if self.contains(style) {
            self.without(style)
        } else {
            self.with(style)
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = InlineStyle> + '_ {
        InlineStyle::ALL
            .into_iter()
            .filter(move |style| self.contains(*style))
    }
}

impl FromIterator<InlineStyle> for StyleSet {
    fn from_iter<I: IntoIterator<Item = InlineStyle>>(iter: I) -> Self {
        iter.into_iter()
            .fold(StyleSet::default(), |set, style| set.with(style))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDecoration {
    Underline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRule {
    pub color: Option<&'static str>,
    pub text_decoration: Option<TextDecoration>,
}

/// Rendering rules for the styles the host has no built-in look for.
/// `BOLD` and `header-one` use the host's default rendering.
pub const CUSTOM_STYLE_MAP: &[(InlineStyle, StyleRule)] = &[
    (
        InlineStyle::RedLine,
        StyleRule {
            color: Some("red"),
            text_decoration: None,
        },
    ),
    (
        InlineStyle::Underline,
        StyleRule {
            color: None,
            text_decoration: Some(TextDecoration::Underline),
        },
    ),
];

pub fn custom_style(style: InlineStyle) -> Option<&'static StyleRule> {
    CUSTOM_STYLE_MAP
        .iter()
        .find_map(|(key, rule)| (*key == style).then_some(rule))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StyleRun {
    pub(crate) len: usize,
    pub(crate) style: StyleSet,
}

/// Run-length encoded character styles of one block. Lengths are in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRuns {
    runs: Vec<StyleRun>,
}

impl Default for StyleRuns {
    fn default() -> Self {
        Self::new(0)
    }
}

impl StyleRuns {
    pub fn new(total_len: usize) -> Self {
        Self::uniform(total_len, StyleSet::default())
    }

    pub fn uniform(total_len: usize, style: StyleSet) -> Self {
        let mut runs = Self {
            runs: vec![StyleRun {
                len: total_len,
                style,
            }],
        };
        runs.normalize();
        runs
    }

    pub fn total_len(&self) -> usize {
        self.runs.iter().map(|r| r.len).sum()
    }

    pub fn style_at(&self, offset: usize) -> StyleSet {
        let mut cursor = 0;
        for run in &self.runs {
            if offset < cursor + run.len {
                return run.style;
            }
            cursor += run.len;
        }
        StyleSet::default()
    }

    pub fn delete_range(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }

        let start_ix = self.split_at(range.start);
        let end_ix = self.split_at(range.end);
        if start_ix < end_ix {
            self.runs.drain(start_ix..end_ix);
        }
        self.normalize();
    }

    pub fn insert_range(&mut self, offset: usize, len: usize, style: StyleSet) {
        if len == 0 {
            return;
        }
        let ix = self.split_at(offset);
        self.runs.insert(ix, StyleRun { len, style });
        self.normalize();
    }

    pub fn update_range(&mut self, range: Range<usize>, mut update: impl FnMut(&mut StyleSet)) {
        if range.is_empty() {
            return;
        }
        let start_ix = self.split_at(range.start);
        let end_ix = self.split_at(range.end);
        for run in &mut self.runs[start_ix..end_ix] {
            update(&mut run.style);
        }
        self.normalize();
    }

    /// Splits off everything from `offset` onwards, leaving the head in `self`.
    pub fn split_off(&mut self, offset: usize) -> StyleRuns {
        let total_len = self.total_len();
        let offset = offset.min(total_len);
        let ix = self.split_at(offset);
        let tail = self.runs.split_off(ix);
        self.normalize();

        let mut tail = StyleRuns { runs: tail };
        tail.normalize();
        tail
    }

    pub fn append(&mut self, other: StyleRuns) {
        self.runs.extend(other.runs);
        self.normalize();
    }

    pub fn iter_runs(&self) -> impl Iterator<Item = (Range<usize>, StyleSet)> + '_ {
        let mut cursor = 0usize;
        self.runs.iter().filter_map(move |run| {
            let start = cursor;
            cursor += run.len;
            (run.len > 0).then_some((start..cursor, run.style))
        })
    }

    /// Maximal contiguous ranges carrying `style`.
    pub fn ranges_for(&self, style: InlineStyle) -> Vec<Range<usize>> {
        let mut out: Vec<Range<usize>> = Vec::new();
        for (range, set) in self.iter_runs() {
            if !set.contains(style) {
                continue;
            }
            match out.last_mut() {
                Some(prev) if prev.end == range.start => prev.end = range.end,
                _ => out.push(range),
            }
        }
        out
    }

    fn split_at(&mut self, offset: usize) -> usize {
        let total_len = self.total_len();
        let offset = offset.min(total_len);

        let mut cursor = 0usize;
        for ix in 0..self.runs.len() {
            let run_len = self.runs[ix].len;
            if offset == cursor {
                return ix;
            }
            if offset < cursor + run_len {
                let left_len = offset - cursor;
                let right_len = run_len - left_len;
                let style = self.runs[ix].style;
                self.runs[ix].len = left_len;
                self.runs.insert(
                    ix + 1,
                    StyleRun {
                        len: right_len,
                        style,
                    },
                );
                return ix + 1;
            }
            cursor += run_len;
        }
        self.runs.len()
    }

    fn normalize(&mut self) {
        self.runs.retain(|r| r.len > 0);

        let mut merged: Vec<StyleRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if let Some(prev) = merged.last_mut() {
                if prev.style == run.style {
                    prev.len += run.len;
                    continue;
                }
            }
            merged.push(run);
        }

        // An empty block still carries one (default) zero-length run.
        if merged.is_empty() {
            merged.push(StyleRun {
                len: 0,
                style: StyleSet::default(),
            });
        }
        self.runs = merged;
    }
}
