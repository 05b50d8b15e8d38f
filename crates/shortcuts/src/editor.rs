use crate::core::Selection;
use crate::error::{EditError, StoreError};
use crate::hooks::{self, HookOutcome};
use crate::state::{EditorConfig, EditorState};
use crate::store::{self, KeyValueStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Char(char),
    Return,
    Select(Selection),
    Undo,
    Redo,
}

/// Computes the state that follows `input`, the way the host surface would:
/// hooks first, default behavior when they decline.
pub fn update(state: &EditorState, input: &Input) -> Result<EditorState, EditError> {
    match input {
        Input::Char(ch) => match hooks::handle_before_input(*ch, state)? {
            HookOutcome::Handled(next) => Ok(next),
            HookOutcome::NotHandled => state.insert_characters(ch.encode_utf8(&mut [0; 4])),
        },
        Input::Return => match hooks::handle_return(state)? {
            HookOutcome::Handled(next) => Ok(next),
            HookOutcome::NotHandled => Ok(state.clone()),
        },
        Input::Select(selection) => state.with_selection(selection.clone()),
        Input::Undo => Ok(state.undo()),
        Input::Redo => Ok(state.redo()),
    }
}

pub struct ShortcutEditor<S: KeyValueStore> {
    state: EditorState,
    store: S,
}

impl<S: KeyValueStore> ShortcutEditor<S> {
    pub fn open(store: S, config: EditorConfig) -> Self {
        let state = store::load_editor_state(&store, config);
        Self { state, store }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Applies `input`. On error the current state is left untouched.
    pub fn dispatch(&mut self, input: Input) -> Result<(), EditError> {
        self.state = update(&self.state, &input)?;
        Ok(())
    }

    /// Types `text` one char at a time; `'\n'` presses return.
    pub fn type_text(&mut self, text: &str) -> Result<(), EditError> {
        for ch in text.chars() {
            let input = match ch {
                '\n' => Input::Return,
                ch => Input::Char(ch),
            };
            self.dispatch(input)?;
        }
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), StoreError> {
        store::save_editor_state(&mut self.store, &self.state)
    }
}
