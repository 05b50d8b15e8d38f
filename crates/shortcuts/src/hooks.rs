use crate::error::EditError;
use crate::mutator;
use crate::shortcut;
use crate::state::EditorState;

#[derive(Debug, Clone, PartialEq)]
pub enum HookOutcome {
    Handled(EditorState),
    NotHandled,
}

impl HookOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookOutcome::Handled(_) => "handled",
            HookOutcome::NotHandled => "not-handled",
        }
    }

    pub fn is_handled(&self) -> bool {
        matches!(self, HookOutcome::Handled(_))
    }
}

/// Runs before `ch` is inserted. A completed shortcut consumes `ch`.
pub fn handle_before_input(ch: char, state: &EditorState) -> Result<HookOutcome, EditError> {
    let content = state.content();
    let ((start_ix, _), _) = content.ordered_points(state.selection())?;
    let line_text = content.blocks()[start_ix].text();

    let Some(transformation) = shortcut::recognize(line_text, ch) else {
        return Ok(HookOutcome::NotHandled);
    };
    mutator::apply_transformation(state, &transformation).map(HookOutcome::Handled)
}

/// Line breaks are always intercepted.
pub fn handle_return(state: &EditorState) -> Result<HookOutcome, EditError> {
    mutator::handle_line_break(state, state.selection()).map(HookOutcome::Handled)
}
