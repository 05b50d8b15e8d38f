use tracing::debug;

use crate::core::{BlockType, Point, Selection};
use crate::error::EditError;
use crate::shortcut::{Effect, Transformation};
use crate::state::{ChangeType, EditorState};
use crate::style::StyleSet;

/// Deletes the first `count` chars of the block at the selection start,
/// wherever the caret actually is. `count` is clamped to the block length.
pub fn remove_leading_characters(
    state: &EditorState,
    count: usize,
) -> Result<EditorState, EditError> {
    let content = state.content();
    let ((start_ix, start), _) = content.ordered_points(state.selection())?;
    let len = content.blocks()[start_ix].char_len();

    let range = Selection::new(
        Point::new(start.key.clone(), 0),
        Point::new(start.key, count.min(len)),
    );
    let next = content.replace_text(&range, "", StyleSet::default())?;
    Ok(state.push(next, ChangeType::RemoveRange))
}

pub fn apply_effect(state: &EditorState, effect: Effect) -> Result<EditorState, EditError> {
    match effect {
        Effect::SetBlockType(block_type) => state.toggle_block_type(block_type),
        Effect::ToggleInlineStyle(style) => state.toggle_inline_style(style),
    }
}

pub fn apply_transformation(
    state: &EditorState,
    transformation: &Transformation,
) -> Result<EditorState, EditError> {
    debug!(
        remove = transformation.remove_count,
        effect = ?transformation.effect,
        "applying shortcut"
    );
    let removed = remove_leading_characters(state, transformation.remove_count)?;
    apply_effect(&removed, transformation.effect)
}

/// Splits the block at `selection` and forces the new block to `unstyled`.
/// Records two edits: `split-block`, then `change-block-type`.
pub fn handle_line_break(
    state: &EditorState,
    selection: &Selection,
) -> Result<EditorState, EditError> {
    let ((_, start), _) = state.content().ordered_points(selection)?;
    let split = state.content().split_block(selection)?;
    let new_key = split
        .key_after(&start.key)
        .cloned()
        .ok_or(EditError::UnknownBlock(start.key))?;
    let after_split = state.push(split, ChangeType::SplitBlock);

    let caret = Selection::caret(new_key, 0);
    let retyped = after_split
        .content()
        .set_block_type(&caret, BlockType::Unstyled)?;
    debug!(block = %caret.focus.key, "line break");
    Ok(after_split.push(retyped, ChangeType::ChangeBlockType))
}

#[cfg(test)]
mod tests {
    use crate::core::{BlockKey, ContentBlock, ContentState};
    use crate::state::EditorConfig;

    use super::*;

    fn state_with(text: &str, caret: usize) -> EditorState {
        let key = BlockKey::from_index(0);
        let block = ContentBlock::new(key.clone(), BlockType::Unstyled, text);
        let content = ContentState::from_blocks(vec![block]).unwrap();
        EditorState::create_with_content(content, EditorConfig::default())
            .with_selection(Selection::caret(key, caret))
            .unwrap()
    }

    #[test]
    fn removal_ignores_caret_position() {
        let state = state_with("**abc", 4);
        let next = remove_leading_characters(&state, 2).unwrap();

        assert_eq!(next.content().first_block().text(), "abc");
        let caret = Selection::caret(BlockKey::from_index(0), 0);
        assert_eq!(next.selection(), &caret);
        assert_eq!(next.last_change_type(), Some(ChangeType::RemoveRange));
    }

    #[test]
    fn removal_count_is_clamped() {
        let state = state_with("ab", 2);
        let next = remove_leading_characters(&state, 10).unwrap();
        assert_eq!(next.content().first_block().text(), "");
    }

    #[test]
    fn set_block_type_effect_toggles_back_to_unstyled() {
        let state = state_with("", 0);
        let effect = Effect::SetBlockType(BlockType::HeaderOne);
        let heading = apply_effect(&state, effect).unwrap();
        assert_eq!(heading.current_block_type().unwrap(), BlockType::HeaderOne);

        let plain = apply_effect(&heading, effect).unwrap();
        assert_eq!(plain.current_block_type().unwrap(), BlockType::Unstyled);
    }

    #[test]
    fn line_break_retypes_the_block_after_the_split_point() {
        let key = BlockKey::from_index(0);
        let content = ContentState::from_blocks(vec![
            ContentBlock::new(key.clone(), BlockType::HeaderOne, "ab"),
            ContentBlock::new(BlockKey::from_index(1), BlockType::HeaderOne, "cd"),
        ])
        .unwrap();
        let state = EditorState::create_with_content(content, EditorConfig::default())
            .with_selection(Selection::caret(key, 1))
            .unwrap();

        let next = handle_line_break(&state, state.selection()).unwrap();
        let blocks = next.content().blocks();
        assert_eq!(blocks[0].block_type(), BlockType::HeaderOne);
        assert_eq!(blocks[1].block_type(), BlockType::Unstyled);
        assert_eq!(blocks[2].block_type(), BlockType::HeaderOne);
        assert_eq!(next.selection().focus.key, BlockKey::from_index(2));
    }
}
