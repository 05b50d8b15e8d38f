use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{BlockType, ContentState, Selection};
use crate::error::EditError;
use crate::style::{InlineStyle, StyleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeType {
    InsertCharacters,
    BackspaceCharacter,
    DeleteCharacter,
    RemoveRange,
    SplitBlock,
    ChangeBlockType,
    ChangeInlineStyle,
    Undo,
    Redo,
}

impl ChangeType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeType::InsertCharacters => "insert-characters",
            ChangeType::BackspaceCharacter => "backspace-character",
            ChangeType::DeleteCharacter => "delete-character",
            ChangeType::RemoveRange => "remove-range",
            ChangeType::SplitBlock => "split-block",
            ChangeType::ChangeBlockType => "change-block-type",
            ChangeType::ChangeInlineStyle => "change-inline-style",
            ChangeType::Undo => "undo",
            ChangeType::Redo => "redo",
        }
    }

    fn coalesces(self) -> bool {
        matches!(
            self,
            ChangeType::InsertCharacters
                | ChangeType::BackspaceCharacter
                | ChangeType::DeleteCharacter
        )
    }

    fn keeps_style_override(self) -> bool {
        matches!(self, ChangeType::SplitBlock | ChangeType::ChangeBlockType)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorConfig {
    pub max_undo: usize,
}

impl EditorConfig {
    pub fn with_defaults(mut self) -> Self {
        if self.max_undo == 0 {
            self.max_undo = 200;
        }
        self
    }
}

/// One immutable editor state: content, caret and history.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    content: Arc<ContentState>,
    selection: Selection,
    last_change_type: Option<ChangeType>,
    inline_style_override: Option<StyleSet>,
    undo_stack: Vec<Arc<ContentState>>,
    redo_stack: Vec<Arc<ContentState>>,
    config: EditorConfig,
}

impl EditorState {
    pub fn create_empty(config: EditorConfig) -> Self {
        Self::create_with_content(ContentState::create_empty(), config)
    }

    pub fn create_with_content(content: ContentState, config: EditorConfig) -> Self {
        let selection = Selection::caret(content.first_block().key().clone(), 0);
        Self {
            content: Arc::new(content),
            selection,
            last_change_type: None,
            inline_style_override: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            config: config.with_defaults(),
        }
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn last_change_type(&self) -> Option<ChangeType> {
        self.last_change_type
    }

    pub fn inline_style_override(&self) -> Option<StyleSet> {
        self.inline_style_override
    }

    pub fn config(&self) -> EditorConfig {
        self.config
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Moves the caret. Like any explicit selection change this drops a
    /// pending inline style override.
    pub fn with_selection(&self, selection: Selection) -> Result<Self, EditError> {
        self.content.ordered_points(&selection)?;
        let mut next = self.clone();
        next.selection = selection;
        next.inline_style_override = None;
        Ok(next)
    }

    pub fn with_inline_style_override(&self, style: StyleSet) -> Self {
        let mut next = self.clone();
        next.inline_style_override = Some(style);
        next
    }

    pub fn push(&self, content: ContentState, change_type: ChangeType) -> Self {
        let mut next = self.clone();
        let mut content = content;

        let boundary = self.selection != *self.content.selection_after()
            || self.last_change_type != Some(change_type)
            || !change_type.coalesces();

        if boundary {
            next.undo_stack.push(Arc::clone(&self.content));
            if next.undo_stack.len() > self.config.max_undo {
                next.undo_stack.remove(0);
            }
            content = content.with_selection_before(self.selection.clone());
        } else {
            content = content.with_selection_before(self.content.selection_before().clone());
        }

        if !change_type.keeps_style_override() {
            next.inline_style_override = None;
        }

        tracing::trace!(change = change_type.as_str(), boundary, "push");

        next.selection = content.selection_after().clone();
        next.content = Arc::new(content);
        next.redo_stack.clear();
        next.last_change_type = Some(change_type);
        next
    }

    pub fn undo(&self) -> Self {
        let Some(previous) = self.undo_stack.last() else {
            return self.clone();
        };

        let mut next = self.clone();
        next.undo_stack.pop();
        next.redo_stack.push(Arc::clone(&self.content));
        next.selection = self.content.selection_before().clone();
        next.content = Arc::clone(previous);
        next.inline_style_override = None;
        next.last_change_type = Some(ChangeType::Undo);
        next
    }

    pub fn redo(&self) -> Self {
        let Some(following) = self.redo_stack.last() else {
            return self.clone();
        };

        let mut next = self.clone();
        next.redo_stack.pop();
        next.undo_stack.push(Arc::clone(&self.content));
        next.selection = following.selection_after().clone();
        next.content = Arc::clone(following);
        next.inline_style_override = None;
        next.last_change_type = Some(ChangeType::Redo);
        next
    }

    pub fn current_block_type(&self) -> Result<BlockType, EditError> {
        let ((start_ix, _), _) = self.content.ordered_points(&self.selection)?;
        Ok(self.content.blocks()[start_ix].block_type())
    }

    /// The styles the next typed character would carry.
    pub fn current_inline_style(&self) -> Result<StyleSet, EditError> {
        if let Some(style) = self.inline_style_override {
            return Ok(style);
        }

        let ((start_ix, start), _) = self.content.ordered_points(&self.selection)?;
        let block = &self.content.blocks()[start_ix];

        if self.selection.is_collapsed() {
            if start.offset > 0 {
                return Ok(block.style_at(start.offset - 1));
            }
            if !block.is_empty() {
                return Ok(block.style_at(0));
            }
        } else {
            if start.offset < block.char_len() {
                return Ok(block.style_at(start.offset));
            }
            if start.offset > 0 {
                return Ok(block.style_at(start.offset - 1));
            }
        }

        Ok(self.look_upward_for_inline_style(&start.key))
    }

    fn look_upward_for_inline_style(&self, key: &crate::core::BlockKey) -> StyleSet {
        self.content
            .blocks_before(key)
            .find(|block| !block.is_empty())
            .map(|block| block.style_at(block.char_len() - 1))
            .unwrap_or_default()
    }

    /// Sets `block_type` on the selected blocks, or resets them to
    /// `unstyled` when the current block already has it.
    pub fn toggle_block_type(&self, block_type: BlockType) -> Result<Self, EditError> {
        let type_to_set = if self.current_block_type()? == block_type {
            BlockType::Unstyled
        } else {
            block_type
        };
        let content = self.content.set_block_type(&self.selection, type_to_set)?;
        Ok(self.push(content, ChangeType::ChangeBlockType))
    }

    /// At a collapsed caret this only changes the pending override; over a
    /// range it edits the content.
    pub fn toggle_inline_style(&self, style: InlineStyle) -> Result<Self, EditError> {
        let current = self.current_inline_style()?;

        if self.selection.is_collapsed() {
            return Ok(self.with_inline_style_override(current.toggled(style)));
        }

        let content = if current.contains(style) {
            self.content.remove_inline_style(&self.selection, style)?
        } else {
            self.content.apply_inline_style(&self.selection, style)?
        };
        Ok(self.push(content, ChangeType::ChangeInlineStyle))
    }

    pub fn insert_characters(&self, text: &str) -> Result<Self, EditError> {
        let style = self.current_inline_style()?;
        let content = self.content.replace_text(&self.selection, text, style)?;
        Ok(self.push(content, ChangeType::InsertCharacters))
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::create_empty(EditorConfig::default())
    }
}
