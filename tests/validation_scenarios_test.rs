use chrono::NaiveDate;
use period_guard::domain::ports::FixedClock;
use period_guard::{ErrorKind, Period, PeriodField, PeriodValidator, ValidationRules};

fn validator() -> PeriodValidator<FixedClock> {
    PeriodValidator::with_clock(
        ValidationRules::default(),
        FixedClock(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()),
    )
}

#[test]
fn test_empty_list_only_sets_global_error() {
    let result = validator().validate(&[]);

    assert!(!result.is_valid);
    assert!(result.errors.is_empty());
    assert!(result
        .global_error
        .as_deref()
        .is_some_and(|msg| msg.contains("at least one")));
}

#[test]
fn test_well_formed_list_is_valid() {
    let result = validator().validate(&[
        Period::new("2010-01", "2013-12", 5_000_000.0),
        Period::new("01/2014", "12/2023", 10_000_000.0),
        Period::new("2024-01-01", "2024-12-31", 12_000_000.0),
    ]);

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert!(result.global_error.is_none());
}

#[test]
fn test_shared_month_yields_symmetric_overlap_pair() {
    let first = Period::new("2020-01", "2020-03", 5_000_000.0).with_id("first");
    let second = Period::new("2020-03", "2020-06", 6_000_000.0).with_id("second");
    let result = validator().validate(&[first.clone(), second.clone()]);

    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.count_of(ErrorKind::Overlap), 2);

    let on_first: Vec<_> = result.errors_for(&first.id).collect();
    let on_second: Vec<_> = result.errors_for(&second.id).collect();
    assert_eq!(on_first.len(), 1);
    assert_eq!(on_second.len(), 1);
    assert!(on_first[0].message.contains("period 2"));
    assert!(on_second[0].message.contains("period 1"));
    assert_eq!(on_first[0].field, Some(PeriodField::EndDate));
    assert_eq!(on_second[0].field, Some(PeriodField::StartDate));
}

#[test]
fn test_adjacent_periods_do_not_overlap() {
    let result = validator().validate(&[
        Period::new("2020-01", "2020-02", 5_000_000.0),
        Period::new("2020-03", "2020-04", 5_000_000.0),
    ]);

    assert_eq!(result.count_of(ErrorKind::Overlap), 0);
    assert!(result.is_valid);
}

#[test]
fn test_end_before_start_is_one_range_error() {
    let period = Period::new("2020-05", "2020-01", 5_000_000.0);
    let result = validator().validate(std::slice::from_ref(&period));

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, ErrorKind::Range);
    assert_eq!(
        result.field_error(&period.id, PeriodField::EndDate),
        Some(result.errors[0].message.as_str())
    );
}

#[test]
fn test_salary_bounds() {
    let rules = ValidationRules::default();
    let salary_errors = |salary: f64| {
        validator()
            .validate(&[Period::new("2020-01", "2020-02", salary)])
            .errors
            .iter()
            .filter(|e| e.kind == ErrorKind::Invalid && e.field == Some(PeriodField::MonthlySalary))
            .count()
    };

    assert_eq!(salary_errors(rules.min_salary), 0);
    assert_eq!(salary_errors(rules.max_salary), 0);
    assert_eq!(salary_errors(rules.min_salary - 1.0), 1);
    assert_eq!(salary_errors(rules.max_salary + 1.0), 1);
}

#[test]
fn test_fail_slow_collects_everything() {
    let broken = Period {
        monthly_salary: None,
        ..Period::new("1985-01", "2031-01", 0.0)
    };
    let overlapping = Period::new("2000-01", "2000-02", 5_000_000.0);
    let result = validator().validate(&[broken, overlapping]);

    let kinds: Vec<ErrorKind> = result.errors.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ErrorKind::Required, // salary
            ErrorKind::Invalid,  // start year before 1990
            ErrorKind::Invalid,  // end beyond horizon
            ErrorKind::Overlap,
            ErrorKind::Overlap,
        ]
    );
}

#[test]
fn test_validation_is_idempotent() {
    let periods = vec![
        Period::new("2019-01", "2019-12", 5_000_000.0),
        Period::new("2019-06", "13/2019", 5_000_000.0),
        Period::new("2019-11", "2020-02", 999.0),
        Period::new("", "", 0.0),
    ];
    let v = validator();

    assert_eq!(v.validate(&periods), v.validate(&periods));
}

#[test]
fn test_result_json_matches_ui_contract() -> anyhow::Result<()> {
    let result = validator().validate(&[Period::new("2020-05", "2020-01", 5_000_000.0).with_id("p1")]);
    let json = serde_json::to_value(&result)?;

    assert_eq!(
        json,
        serde_json::json!({
            "isValid": false,
            "errors": [{
                "periodId": "p1",
                "field": "end_date",
                "message": "Period 1: end month must be on or after the start month (05/2020 - 01/2020)",
                "type": "range"
            }]
        })
    );
    Ok(())
}
