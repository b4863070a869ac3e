use period_guard::core::input::{Commit, InputState, Key, Modifiers, MonthYearInput};
use period_guard::domain::month::{display_to_storage, storage_to_display, MAX_YEAR, MIN_YEAR};
use period_guard::MonthYear;

/// Mirrors a form field: the upstream value only changes on `Commit::Set`.
struct Field {
    input: MonthYearInput,
    upstream: String,
}

impl Field {
    fn new(upstream: &str) -> Self {
        Self {
            input: MonthYearInput::with_value(upstream),
            upstream: upstream.to_string(),
        }
    }

    fn apply(&mut self, commit: Commit) {
        if let Commit::Set(value) = commit {
            self.upstream = value;
        }
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            let commit = self.input.press_key(Key::Char(c), Modifiers::default());
            self.apply(commit);
        }
    }

    fn blur(&mut self) {
        let commit = self.input.blur();
        self.apply(commit);
    }
}

#[test]
fn test_typing_a_month_commits_on_completion() {
    let mut field = Field::new("");
    let mut seen = Vec::new();
    for c in "012021".chars() {
        field.type_text(&c.to_string());
        seen.push((field.input.display().to_string(), field.upstream.clone()));
    }

    assert_eq!(
        seen,
        vec![
            ("0".to_string(), String::new()),
            ("01".to_string(), String::new()),
            ("01/2".to_string(), String::new()),
            ("01/20".to_string(), String::new()),
            ("01/202".to_string(), String::new()),
            ("01/2021".to_string(), "2021-01".to_string()),
        ]
    );
}

#[test]
fn test_abandoned_entry_clears_on_blur() {
    let mut field = Field::new("");
    field.type_text("0120");
    assert_eq!(field.input.display(), "01/20");
    assert_eq!(field.input.state(), InputState::InProgress);

    field.blur();
    assert_eq!(field.input.display(), "");
    assert_eq!(field.upstream, "");
}

#[test]
fn test_invalid_month_keeps_previous_upstream_until_blur() {
    let mut field = Field::new("2019-05");
    assert_eq!(field.input.display(), "05/2019");

    let commit = field.input.edit("132019");
    field.apply(commit);
    assert!(field.input.show_error());
    assert_eq!(field.upstream, "2019-05");

    field.blur();
    assert_eq!(field.upstream, "");
    assert!(!field.input.show_error());
}

#[test]
fn test_paste_with_separators_is_reformatted() {
    let mut field = Field::new("");
    let commit = field.input.edit("  12-2022 ");
    field.apply(commit);

    assert_eq!(field.input.display(), "12/2022");
    assert_eq!(field.upstream, "2022-12");
}

#[test]
fn test_letters_and_shifted_digits_are_ignored() {
    let mut field = Field::new("");
    field.type_text("0a3");
    let shifted = field.input.press_key(
        Key::Char('2'),
        Modifiers {
            shift: true,
            ..Modifiers::default()
        },
    );
    field.apply(shifted);

    assert_eq!(field.input.display(), "03");
}

#[test]
fn test_out_of_range_year_is_rejected() {
    let mut field = Field::new("");
    field.type_text("011899");
    assert_eq!(field.input.state(), InputState::CompleteInvalid);
    assert_eq!(field.upstream, "");
}

#[test]
fn test_encodings_round_trip() {
    for year in [MIN_YEAR, 1990, 2000, 2024, MAX_YEAR] {
        for month in 1..=12 {
            let value = MonthYear::new(year, month).unwrap();
            let storage = value.to_storage();
            let display = value.to_display();

            assert_eq!(storage_to_display(&storage).as_deref(), Some(display.as_str()));
            assert_eq!(display_to_storage(&display).as_deref(), Some(storage.as_str()));
            assert_eq!(MonthYear::parse(&storage), Some(value));
            assert_eq!(MonthYear::parse(&display), Some(value));
        }
    }
}
