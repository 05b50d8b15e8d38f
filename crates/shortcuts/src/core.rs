use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, EditError};
use crate::style::{InlineStyle, StyleRuns, StyleSet};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Five lowercase base-36 digits, e.g. `00000`, `0000a`.
    pub fn from_index(mut index: usize) -> Self {
        const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let mut out: Vec<u8> = Vec::with_capacity(5);
        loop {
            out.push(DIGITS[index % 36]);
            index /= 36;
            if index == 0 {
                break;
            }
        }
        while out.len() < 5 {
            out.push(b'0');
        }
        out.reverse();
        Self(out.into_iter().map(char::from).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    #[default]
    Unstyled,
    HeaderOne,
}

impl BlockType {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Unstyled => "unstyled",
            BlockType::HeaderOne => "header-one",
        }
    }
}

pub fn block_style_class(block: &ContentBlock) -> Option<&'static str> {
    match block.block_type() {
        BlockType::HeaderOne => Some("header-one"),
        BlockType::Unstyled => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    key: BlockKey,
    block_type: BlockType,
    text: String,
    styles: StyleRuns,
}

impl ContentBlock {
    pub fn new(key: BlockKey, block_type: BlockType, text: impl Into<String>) -> Self {
        let text = text.into();
        let styles = StyleRuns::new(text.chars().count());
        Self {
            key,
            block_type,
            text,
            styles,
        }
    }

    /// Applies `style` to `range` (in chars). Out-of-range spans are clipped.
    pub fn with_style_range(mut self, range: std::ops::Range<usize>, style: InlineStyle) -> Self {
        let len = self.char_len();
        let range = range.start.min(len)..range.end.min(len);
        self.styles.update_range(range, |set| set.set(style, true));
        self
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn styles(&self) -> &StyleRuns {
        &self.styles
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn style_at(&self, offset: usize) -> StyleSet {
        self.styles.style_at(offset)
    }

    fn remove_chars(&mut self, range: std::ops::Range<usize>) {
        let start = byte_offset(&self.text, range.start);
        let end = byte_offset(&self.text, range.end);
        self.text.replace_range(start..end, "");
        self.styles.delete_range(range);
    }

    fn insert_chars(&mut self, offset: usize, text: &str, style: StyleSet) {
        let at = byte_offset(&self.text, offset);
        self.text.insert_str(at, text);
        self.styles.insert_range(offset, text.chars().count(), style);
    }

    fn split_off(&mut self, offset: usize) -> (String, StyleRuns) {
        let at = byte_offset(&self.text, offset);
        let tail_text = self.text.split_off(at);
        let tail_styles = self.styles.split_off(offset);
        (tail_text, tail_styles)
    }

    fn append(&mut self, text: String, styles: StyleRuns) {
        self.text.push_str(&text);
        self.styles.append(styles);
    }
}

fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(ix, _)| ix)
        .unwrap_or(text.len())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub key: BlockKey,
    pub offset: usize,
}

impl Point {
    pub fn new(key: BlockKey, offset: usize) -> Self {
        Self { key, offset }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn caret(key: BlockKey, offset: usize) -> Self {
        Self::collapsed(Point::new(key, offset))
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentState {
    blocks: Vec<ContentBlock>,
    selection_before: Selection,
    selection_after: Selection,
}

impl ContentState {
    pub fn create_empty() -> Self {
        let block = ContentBlock::new(BlockKey::from_index(0), BlockType::Unstyled, "");
        let caret = Selection::caret(block.key.clone(), 0);
        Self {
            blocks: vec![block],
            selection_before: caret.clone(),
            selection_after: caret,
        }
    }

    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Result<Self, DecodeError> {
        let Some(first) = blocks.first() else {
            return Err(DecodeError::EmptyDocument);
        };
        let caret = Selection::caret(first.key.clone(), 0);

        let mut seen = std::collections::HashSet::new();
        for block in &blocks {
            if !seen.insert(block.key.clone()) {
                return Err(DecodeError::DuplicateKey(block.key.to_string()));
            }
        }

        Ok(Self {
            blocks,
            selection_before: caret.clone(),
            selection_after: caret,
        })
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn first_block(&self) -> &ContentBlock {
        // Never empty: every constructor and edit keeps at least one block.
        &self.blocks[0]
    }

    pub fn block_for_key(&self, key: &BlockKey) -> Option<&ContentBlock> {
        self.blocks.iter().find(|block| &block.key == key)
    }

    pub fn key_after(&self, key: &BlockKey) -> Option<&BlockKey> {
        let ix = self.blocks.iter().position(|block| &block.key == key)?;
        self.blocks.get(ix + 1).map(|block| &block.key)
    }

    /// Blocks strictly before `key`, nearest first.
    pub fn blocks_before<'a>(&'a self, key: &BlockKey) -> impl Iterator<Item = &'a ContentBlock> {
        let ix = self
            .blocks
            .iter()
            .position(|block| &block.key == key)
            .unwrap_or(0);
        self.blocks[..ix].iter().rev()
    }

    pub fn selection_before(&self) -> &Selection {
        &self.selection_before
    }

    pub fn selection_after(&self) -> &Selection {
        &self.selection_after
    }

    pub(crate) fn with_selection_before(mut self, selection: Selection) -> Self {
        self.selection_before = selection;
        self
    }

    pub fn fresh_key(&self) -> BlockKey {
        let mut index = self.blocks.len();
        loop {
            let key = BlockKey::from_index(index);
            if self.block_for_key(&key).is_none() {
                return key;
            }
            index += 1;
        }
    }

    pub fn block_index(&self, key: &BlockKey) -> Result<usize, EditError> {
        self.blocks
            .iter()
            .position(|block| &block.key == key)
            .ok_or_else(|| EditError::UnknownBlock(key.clone()))
    }

    pub fn validate_point(&self, point: &Point) -> Result<usize, EditError> {
        let ix = self.block_index(&point.key)?;
        let len = self.blocks[ix].char_len();
        if point.offset > len {
            return Err(EditError::OffsetOutOfBounds {
                key: point.key.clone(),
                offset: point.offset,
                len,
            });
        }
        Ok(ix)
    }

    /// Selection endpoints in document order, with their block indices.
    pub fn ordered_points(
        &self,
        selection: &Selection,
    ) -> Result<((usize, Point), (usize, Point)), EditError> {
        let anchor_ix = self.validate_point(&selection.anchor)?;
        let focus_ix = self.validate_point(&selection.focus)?;
        let anchor = (anchor_ix, selection.anchor.clone());
        let focus = (focus_ix, selection.focus.clone());

        if (anchor_ix, selection.anchor.offset) <= (focus_ix, selection.focus.offset) {
            Ok((anchor, focus))
        } else {
            Ok((focus, anchor))
        }
    }

    pub fn remove_range(&self, selection: &Selection) -> Result<Self, EditError> {
        let ((start_ix, start), (end_ix, end)) = self.ordered_points(selection)?;
        let mut next = self.clone();

        if start_ix == end_ix {
            next.blocks[start_ix].remove_chars(start.offset..end.offset);
        } else {
            let (tail_text, tail_styles) = next.blocks[end_ix].split_off(end.offset);
            let head = &mut next.blocks[start_ix];
            let head_len = head.char_len();
            head.remove_chars(start.offset..head_len);
            head.append(tail_text, tail_styles);
            next.blocks.drain(start_ix + 1..=end_ix);
        }

        next.selection_before = selection.clone();
        next.selection_after = Selection::collapsed(start);
        Ok(next)
    }

    pub fn insert_text(&self, at: &Point, text: &str, style: StyleSet) -> Result<Self, EditError> {
        let ix = self.validate_point(at)?;
        let mut next = self.clone();
        next.blocks[ix].insert_chars(at.offset, text, style);

        next.selection_before = Selection::collapsed(at.clone());
        next.selection_after = Selection::caret(at.key.clone(), at.offset + text.chars().count());
        Ok(next)
    }

    pub fn replace_text(
        &self,
        selection: &Selection,
        text: &str,
        style: StyleSet,
    ) -> Result<Self, EditError> {
        let removed = self.remove_range(selection)?;
        let at = removed.selection_after.focus.clone();
        let inserted = removed.insert_text(&at, text, style)?;
        Ok(inserted.with_selection_before(selection.clone()))
    }

    /// Splits the block at the caret. The head keeps the key and type, the
    /// new tail block copies the type and gets a fresh key.
    pub fn split_block(&self, selection: &Selection) -> Result<Self, EditError> {
        let mut next = self.remove_range(selection)?;
        let at = next.selection_after.anchor.clone();
        let ix = next.block_index(&at.key)?;
        let new_key = next.fresh_key();

        let block_type = next.blocks[ix].block_type;
        let (text, styles) = next.blocks[ix].split_off(at.offset);
        next.blocks.insert(
            ix + 1,
            ContentBlock {
                key: new_key.clone(),
                block_type,
                text,
                styles,
            },
        );

        next.selection_before = selection.clone();
        next.selection_after = Selection::caret(new_key, 0);
        Ok(next)
    }

    pub fn set_block_type(
        &self,
        selection: &Selection,
        block_type: BlockType,
    ) -> Result<Self, EditError> {
        let ((start_ix, _), (end_ix, _)) = self.ordered_points(selection)?;
        let mut next = self.clone();
        for block in &mut next.blocks[start_ix..=end_ix] {
            block.block_type = block_type;
        }
        next.selection_before = selection.clone();
        next.selection_after = selection.clone();
        Ok(next)
    }

    pub fn apply_inline_style(
        &self,
        selection: &Selection,
        style: InlineStyle,
    ) -> Result<Self, EditError> {
        self.modify_inline_style(selection, |set| set.set(style, true))
    }

    pub fn remove_inline_style(
        &self,
        selection: &Selection,
        style: InlineStyle,
    ) -> Result<Self, EditError> {
        self.modify_inline_style(selection, |set| set.set(style, false))
    }

    fn modify_inline_style(
        &self,
        selection: &Selection,
        mut update: impl FnMut(&mut StyleSet),
    ) -> Result<Self, EditError> {
        let ((start_ix, start), (end_ix, end)) = self.ordered_points(selection)?;
        let mut next = self.clone();
        for ix in start_ix..=end_ix {
            let block = &mut next.blocks[ix];
            let from = if ix == start_ix { start.offset } else { 0 };
            let to = if ix == end_ix {
                end.offset
            } else {
                block.char_len()
            };
            block.styles.update_range(from..to, &mut update);
        }
        next.selection_before = selection.clone();
        next.selection_after = selection.clone();
        Ok(next)
    }
}

impl Default for ContentState {
    fn default() -> Self {
        Self::create_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(texts: &[&str]) -> ContentState {
        let blocks = texts
            .iter()
            .enumerate()
            .map(|(ix, text)| {
                ContentBlock::new(BlockKey::from_index(ix), BlockType::Unstyled, *text)
            })
            .collect();
        ContentState::from_blocks(blocks).unwrap()
    }

    fn key(ix: usize) -> BlockKey {
        BlockKey::from_index(ix)
    }

    #[test]
    fn keys_are_five_base36_digits() {
        assert_eq!(BlockKey::from_index(0).as_str(), "00000");
        assert_eq!(BlockKey::from_index(35).as_str(), "0000z");
        assert_eq!(BlockKey::from_index(36).as_str(), "00010");
    }

    #[test]
    fn remove_range_across_blocks_merges_head_and_tail() {
        let content = content(&["hello", "middle", "world"]);
        let selection = Selection::new(Point::new(key(0), 2), Point::new(key(2), 3));

        let next = content.remove_range(&selection).unwrap();
        assert_eq!(next.blocks().len(), 1);
        assert_eq!(next.first_block().text(), "held");
        assert_eq!(next.selection_after(), &Selection::caret(key(0), 2));
    }

    #[test]
    fn backward_selection_is_ordered() {
        let content = content(&["abcdef"]);
        let selection = Selection::new(Point::new(key(0), 4), Point::new(key(0), 1));
        let next = content.remove_range(&selection).unwrap();
        assert_eq!(next.first_block().text(), "aef");
    }

    #[test]
    fn split_block_allocates_an_unused_key() {
        let content = content(&["ab", "cd"]);
        let next = content.split_block(&Selection::caret(key(0), 1)).unwrap();

        let texts: Vec<_> = next.blocks().iter().map(|b| b.text()).collect();
        assert_eq!(texts, vec!["a", "b", "cd"]);
        assert_eq!(next.blocks()[1].key(), &key(2));
        assert_eq!(next.selection_after(), &Selection::caret(key(2), 0));
        assert_eq!(next.key_after(&key(0)), Some(&key(2)));
        assert_eq!(next.key_after(&key(1)), None);
    }

    #[test]
    fn offsets_count_chars_not_bytes() {
        let content = content(&["héllo"]);
        let next = content
            .insert_text(&Point::new(key(0), 2), "X", StyleSet::default())
            .unwrap();
        assert_eq!(next.first_block().text(), "héXllo");
        assert_eq!(next.selection_after(), &Selection::caret(key(0), 3));
    }

    #[test]
    fn unknown_block_is_a_precondition_error() {
        let content = content(&["x"]);
        let missing = BlockKey::new("nope");
        let err = content
            .split_block(&Selection::caret(missing.clone(), 0))
            .unwrap_err();
        assert_eq!(err, EditError::UnknownBlock(missing));
    }

    #[test]
    fn offset_past_block_end_is_rejected() {
        let content = content(&["x"]);
        let err = content
            .insert_text(&Point::new(key(0), 5), "y", StyleSet::default())
            .unwrap_err();
        let EditError::OffsetOutOfBounds { offset, len, .. } = err else {
            panic!("unexpected error {err:?}");
        };
        assert_eq!((offset, len), (5, 1));
    }
}
