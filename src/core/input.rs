//! Progressive `MM/YYYY` entry for a single month field.
//!
//! The field re-renders the raw text on every edit and only commits a value
//! upstream once the token is empty or complete and valid. Partial input is
//! never reported as an error; it is cleared when the field loses focus.

use crate::domain::month::{display_value_for, MonthYear, ENCODED_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Empty,
    InProgress,
    CompleteValid,
    CompleteInvalid,
}

/// What the field hands to its owner after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// Leave the upstream value as it is.
    Unchanged,
    /// Replace the upstream value (storage encoding, or empty).
    Set(String),
}

/// Strips non-digits and renders the rest as `MM`, `MM/Y..` or `MM/YYYY`.
pub fn format_digits(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        0..=2 => digits,
        3..=6 => format!("{}/{}", &digits[..2], &digits[2..]),
        _ => format!("{}/{}", &digits[..2], &digits[2..6]),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthYearInput {
    display: String,
    state: InputState,
    // only an edit raises the error; priming and blur never do
    error_shown: bool,
}

impl Default for MonthYearInput {
    fn default() -> Self {
        Self {
            display: String::new(),
            state: InputState::Empty,
            error_shown: false,
        }
    }
}

impl MonthYearInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primes the field from an upstream value in either encoding.
    pub fn with_value(upstream: &str) -> Self {
        let display = display_value_for(upstream);
        let (state, _) = classify(&display);
        Self {
            display,
            state,
            error_shown: false,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn show_error(&self) -> bool {
        self.error_shown
    }

    /// `(typed, needed)` while the token is incomplete.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self.state {
            InputState::InProgress => Some((self.display.len(), ENCODED_LEN)),
            _ => None,
        }
    }

    /// Applies the full text of the field after a keystroke or paste.
    pub fn edit(&mut self, raw: &str) -> Commit {
        self.display = format_digits(raw);
        let (state, parsed) = classify(&self.display);
        self.state = state;
        self.error_shown = state == InputState::CompleteInvalid;

        match (state, parsed) {
            (InputState::Empty, _) => Commit::Set(String::new()),
            (InputState::CompleteValid, Some(month)) => Commit::Set(month.to_storage()),
            _ => Commit::Unchanged,
        }
    }

    pub fn type_char(&mut self, c: char) -> Commit {
        let raw = format!("{}{}", self.display, c);
        self.edit(&raw)
    }

    pub fn backspace(&mut self) -> Commit {
        let mut raw = self.display.clone();
        raw.pop();
        self.edit(&raw)
    }

    /// Routes a physical key press, dropping keys the field does not accept.
    pub fn press_key(&mut self, key: Key, modifiers: Modifiers) -> Commit {
        if !accepts_key(key, modifiers) {
            return Commit::Unchanged;
        }
        match key {
            Key::Char(c) if c.is_ascii_digit() => self.type_char(c),
            Key::Backspace => self.backspace(),
            _ => Commit::Unchanged,
        }
    }

    /// Focus loss: anything that is not a valid complete token is discarded.
    pub fn blur(&mut self) -> Commit {
        match self.state {
            InputState::InProgress | InputState::CompleteInvalid => {
                tracing::debug!("Discarding unfinished month input '{}'", self.display);
                self.display.clear();
                self.state = InputState::Empty;
                self.error_shown = false;
                Commit::Set(String::new())
            }
            InputState::Empty | InputState::CompleteValid => Commit::Unchanged,
        }
    }
}

fn classify(display: &str) -> (InputState, Option<MonthYear>) {
    if display.is_empty() {
        return (InputState::Empty, None);
    }
    if display.len() < ENCODED_LEN {
        return (InputState::InProgress, None);
    }
    match MonthYear::parse(display) {
        Some(month) if display.len() == ENCODED_LEN => (InputState::CompleteValid, Some(month)),
        _ => (InputState::CompleteInvalid, None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    Tab,
    Escape,
    Enter,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

/// Keyboard filter for a month field.
///
/// Editing and navigation keys and the clipboard/select-all shortcuts always
/// pass; otherwise only unshifted digits do.
pub fn accepts_key(key: Key, modifiers: Modifiers) -> bool {
    match key {
        Key::Char(c) => {
            let shortcut = modifiers.ctrl || modifiers.meta;
            if shortcut && matches!(c.to_ascii_lowercase(), 'a' | 'c' | 'v' | 'x') {
                return true;
            }
            c.is_ascii_digit() && !modifiers.shift
        }
        _ => true,
    }
}
