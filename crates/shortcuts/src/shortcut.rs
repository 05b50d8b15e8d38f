use crate::core::BlockType;
use crate::style::InlineStyle;

pub const TRIGGER: char = ' ';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    SetBlockType(BlockType),
    ToggleInlineStyle(InlineStyle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigilMatch {
    /// The block text is exactly the sigil.
    WholeLine,
    /// The block text starts with the sigil and the next char (if any) is
    /// not the given one.
    PrefixNotFollowedBy(char),
    /// The block text starts with the sigil.
    Prefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutRule {
    pub sigil: &'static str,
    pub matcher: SigilMatch,
    pub effect: Effect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub remove_count: usize,
    pub effect: Effect,
}

// First match wins.
pub const SHORTCUTS: &[ShortcutRule] = &[
    ShortcutRule {
        sigil: "#",
        matcher: SigilMatch::WholeLine,
        effect: Effect::SetBlockType(BlockType::HeaderOne),
    },
    ShortcutRule {
        sigil: "*",
        matcher: SigilMatch::PrefixNotFollowedBy('*'),
        effect: Effect::ToggleInlineStyle(InlineStyle::Bold),
    },
    ShortcutRule {
        sigil: "**",
        matcher: SigilMatch::PrefixNotFollowedBy('*'),
        effect: Effect::ToggleInlineStyle(InlineStyle::RedLine),
    },
    ShortcutRule {
        sigil: "***",
        matcher: SigilMatch::Prefix,
        effect: Effect::ToggleInlineStyle(InlineStyle::Underline),
    },
];

impl ShortcutRule {
    pub fn matches(&self, line_text: &str) -> bool {
        match self.matcher {
            SigilMatch::WholeLine => line_text == self.sigil,
            SigilMatch::Prefix => line_text.starts_with(self.sigil),
            SigilMatch::PrefixNotFollowedBy(ch) => line_text
                .strip_prefix(self.sigil)
                .is_some_and(|rest| !rest.starts_with(ch)),
        }
    }

    pub fn transformation(&self) -> Transformation {
        Transformation {
            remove_count: self.sigil.chars().count(),
            effect: self.effect,
        }
    }
}

/// Decides whether typing `inserted` into a block whose full text is
/// `line_text` completes a shortcut.
pub fn recognize(line_text: &str, inserted: char) -> Option<Transformation> {
    if inserted != TRIGGER {
        return None;
    }
    SHORTCUTS
        .iter()
        .find(|rule| rule.matches(line_text))
        .map(ShortcutRule::transformation)
}
