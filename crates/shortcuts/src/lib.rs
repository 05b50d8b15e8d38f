mod core;
mod editor;
mod error;
mod hooks;
mod mutator;
mod serde_value;
mod shortcut;
mod state;
mod store;
mod style;

pub use crate::core::*;
pub use crate::editor::*;
pub use crate::error::*;
pub use crate::hooks::*;
pub use crate::mutator::*;
pub use crate::serde_value::*;
pub use crate::shortcut::*;
pub use crate::state::*;
pub use crate::store::*;
pub use crate::style::*;
