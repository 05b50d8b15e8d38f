use manos_shortcuts::{
    BlockKey, BlockType, ChangeType, ContentBlock, ContentState, EditError, EditorConfig,
    EditorState, HookOutcome, Input, Selection, StyleSet, handle_before_input, update,
};

fn state_with_text(text: &str) -> EditorState {
    let key = BlockKey::from_index(0);
    let block = ContentBlock::new(key.clone(), BlockType::Unstyled, text);
    let content = ContentState::from_blocks(vec![block]).unwrap();
    EditorState::create_with_content(content, EditorConfig::default())
        .with_selection(Selection::caret(key, text.chars().count()))
        .unwrap()
}

fn type_chars(state: EditorState, text: &str) -> EditorState {
    text.chars()
        .fold(state, |state, ch| update(&state, &Input::Char(ch)).unwrap())
}

fn handled(outcome: HookOutcome) -> EditorState {
    match outcome {
        HookOutcome::Handled(state) => state,
        HookOutcome::NotHandled => panic!("expected the shortcut to be handled"),
    }
}

#[test]
fn hash_space_turns_the_line_into_a_heading() {
    let state = state_with_text("#");
    let outcome = handle_before_input(' ', &state).unwrap();
    assert_eq!(outcome.as_str(), "handled");

    let next = handled(outcome);
    let block = next.content().first_block();
    assert_eq!(block.block_type(), BlockType::HeaderOne);
    assert_eq!(block.text(), "");
    let caret = Selection::caret(BlockKey::from_index(0), 0);
    assert_eq!(next.selection(), &caret);
    assert_eq!(next.last_change_type(), Some(ChangeType::ChangeBlockType));
}

#[test]
fn single_star_space_arms_bold_for_the_next_characters() {
    let next = handled(handle_before_input(' ', &state_with_text("*")).unwrap());
    assert_eq!(next.content().first_block().text(), "");
    assert_eq!(
        next.inline_style_override(),
        Some(StyleSet {
            bold: true,
            ..StyleSet::default()
        })
    );

    let typed = type_chars(next, "hi");
    let block = typed.content().first_block();
    assert_eq!(block.text(), "hi");
    assert!(block.style_at(0).bold);
    assert!(block.style_at(1).bold);
}

#[test]
fn double_star_space_is_red_line_and_never_bold() {
    let next = handled(handle_before_input(' ', &state_with_text("**")).unwrap());
    assert_eq!(next.content().first_block().text(), "");

    let style = next.current_inline_style().unwrap();
    assert!(style.red_line);
    assert!(!style.bold);
    assert!(!style.underline);
}

#[test]
fn triple_star_space_is_underline() {
    let next = handled(handle_before_input(' ', &state_with_text("***")).unwrap());
    assert_eq!(next.content().first_block().text(), "");

    let style = next.current_inline_style().unwrap();
    assert!(style.underline);
    assert!(!style.red_line);
    assert!(!style.bold);
}

#[test]
fn typing_sigils_from_an_empty_line() {
    let heading = type_chars(EditorState::default(), "# Title");
    let block = heading.content().first_block();
    assert_eq!(block.block_type(), BlockType::HeaderOne);
    assert_eq!(block.text(), "Title");

    let red = type_chars(EditorState::default(), "** red");
    let block = red.content().first_block();
    assert_eq!(block.text(), "red");
    assert!(block.style_at(0).red_line);
    assert!(!block.style_at(0).bold);
}

#[test]
fn star_prefix_matches_against_the_whole_block() {
    let next = handled(handle_before_input(' ', &state_with_text("*abc")).unwrap());
    assert_eq!(next.content().first_block().text(), "abc");

    let typed = type_chars(next, "X");
    let block = typed.content().first_block();
    assert_eq!(block.text(), "Xabc");
    assert!(block.style_at(0).bold);
    assert!(!block.style_at(1).bold);
}

#[test]
fn non_matching_line_is_left_to_the_host() {
    let state = state_with_text("hello");
    let outcome = handle_before_input(' ', &state).unwrap();
    assert_eq!(outcome, HookOutcome::NotHandled);
    assert_eq!(outcome.as_str(), "not-handled");

    let next = update(&state, &Input::Char(' ')).unwrap();
    let block = next.content().first_block();
    assert_eq!(block.text(), "hello ");
    assert_eq!(block.block_type(), BlockType::Unstyled);
    assert_eq!(next.last_change_type(), Some(ChangeType::InsertCharacters));
}

#[test]
fn non_space_after_a_sigil_is_not_a_shortcut() {
    let state = state_with_text("*");
    assert!(!handle_before_input('x', &state).unwrap().is_handled());

    let next = update(&state, &Input::Char('x')).unwrap();
    assert_eq!(next.content().first_block().text(), "*x");
}

#[test]
fn only_the_block_at_the_caret_is_transformed() {
    let first = BlockKey::from_index(0);
    let second = BlockKey::from_index(1);
    let content = ContentState::from_blocks(vec![
        ContentBlock::new(first, BlockType::Unstyled, "intro"),
        ContentBlock::new(second.clone(), BlockType::Unstyled, "#"),
    ])
    .unwrap();
    let state = EditorState::create_with_content(content, EditorConfig::default())
        .with_selection(Selection::caret(second, 1))
        .unwrap();

    let next = handled(handle_before_input(' ', &state).unwrap());
    let blocks = next.content().blocks();
    assert_eq!(blocks[0].block_type(), BlockType::Unstyled);
    assert_eq!(blocks[0].text(), "intro");
    assert_eq!(blocks[1].block_type(), BlockType::HeaderOne);
    assert_eq!(blocks[1].text(), "");
}

#[test]
fn star_shortcut_turns_off_bold_inherited_from_the_line_above() {
    let state = type_chars(EditorState::default(), "* a");
    let state = update(&state, &Input::Return).unwrap();
    let state = type_chars(state, "* b");

    let blocks = state.content().blocks();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].style_at(0).bold);
    assert_eq!(blocks[1].text(), "b");
    assert!(!blocks[1].style_at(0).bold);
}

#[test]
fn heading_shortcut_on_a_heading_reverts_it() {
    let state = type_chars(EditorState::default(), "# ");
    assert_eq!(state.current_block_type().unwrap(), BlockType::HeaderOne);

    let state = type_chars(state, "# ");
    assert_eq!(state.current_block_type().unwrap(), BlockType::Unstyled);
    assert_eq!(state.content().first_block().text(), "");
}

#[test]
fn selections_must_reference_existing_blocks() {
    let missing = BlockKey::new("zzzzz");
    let err = EditorState::default()
        .with_selection(Selection::caret(missing.clone(), 0))
        .unwrap_err();
    assert_eq!(err, EditError::UnknownBlock(missing));
}
