use manos_shortcuts::{BlockType, ChangeType, EditorState, Input, update};

fn run(state: EditorState, text: &str) -> EditorState {
    text.chars()
        .fold(state, |state, ch| update(&state, &Input::Char(ch)).unwrap())
}

#[test]
fn undo_steps_back_through_a_shortcut() {
    let state = run(EditorState::default(), "# ");
    assert_eq!(state.current_block_type().unwrap(), BlockType::HeaderOne);

    let undone = update(&state, &Input::Undo).unwrap();
    assert_eq!(undone.last_change_type(), Some(ChangeType::Undo));
    assert_eq!(undone.current_block_type().unwrap(), BlockType::Unstyled);
    assert_eq!(undone.content().first_block().text(), "");

    let undone = update(&undone, &Input::Undo).unwrap();
    assert_eq!(undone.content().first_block().text(), "#");

    let redone = update(&update(&undone, &Input::Redo).unwrap(), &Input::Redo).unwrap();
    assert_eq!(redone.last_change_type(), Some(ChangeType::Redo));
    assert_eq!(redone.content(), state.content());
}

#[test]
fn consecutive_typing_is_one_undo_step() {
    let state = run(EditorState::default(), "abc");
    assert_eq!(state.undo_depth(), 1);

    let undone = state.undo();
    assert_eq!(undone.content().first_block().text(), "");
    assert!(!undone.can_undo());
    assert!(undone.can_redo());
}

#[test]
fn new_edits_clear_the_redo_stack() {
    let state = run(EditorState::default(), "a").undo();
    assert!(state.can_redo());

    let state = run(state, "b");
    assert!(!state.can_redo());
    assert_eq!(state.content().first_block().text(), "b");
}

#[test]
fn undo_without_history_changes_nothing() {
    let state = EditorState::default();
    assert_eq!(state.undo(), state);
    assert_eq!(state.redo(), state);
}

#[test]
fn undo_restores_the_selection_before_the_edit() {
    let state = run(EditorState::default(), "ab");
    let before = state.selection().clone();

    let state = update(&state, &Input::Return).unwrap();
    assert_ne!(state.selection(), &before);

    let state = state.undo().undo();
    assert_eq!(state.selection(), &before);
    assert_eq!(state.content().blocks().len(), 1);
}
