use super::common::*;
use crate::intake::domain::{
    AssessmentForm, CompanyForm, NewAssessment, NewCompany, CORPORATE_PAGE_AFFILIATION,
};
use crate::intake::scoring::{answer_value, parse_count, total_score};

#[test]
fn answer_value_accepts_only_plain_digits() {
    assert_eq!(answer_value(Some("7")), 7);
    assert_eq!(answer_value(Some("007")), 7);
    assert_eq!(answer_value(Some("42")), 42);
    assert_eq!(answer_value(None), 0);
    assert_eq!(answer_value(Some("")), 0);
    assert_eq!(answer_value(Some("abc")), 0);
    assert_eq!(answer_value(Some("-3")), 0);
    assert_eq!(answer_value(Some("+3")), 0);
    assert_eq!(answer_value(Some(" 3")), 0);
    assert_eq!(answer_value(Some("3.5")), 0);
    assert_eq!(answer_value(Some("٣")), 0, "non-ascii digits are not counted");
}

#[test]
fn answer_value_treats_unrepresentable_numbers_as_zero() {
    assert_eq!(answer_value(Some("99999999999999999999999")), 0);
}

#[test]
fn total_score_sums_all_digit_answers() {
    let form = sample_form();
    assert_eq!(total_score(form.answers()), 51);
}

#[test]
fn total_score_ignores_non_numeric_and_missing_answers() {
    let mut form = form_with_answers(["abc", "", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0"]);
    assert_eq!(total_score(form.answers()), 0);

    form.q3 = Some("4".to_string());
    form.q7 = None;
    form.q12 = Some("five".to_string());
    assert_eq!(total_score(form.answers()), 4);
}

#[test]
fn total_score_has_no_per_answer_cap() {
    let form = form_with_answers(["100", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0", "250"]);
    assert_eq!(total_score(form.answers()), 350);
}

#[test]
fn total_score_saturates_instead_of_overflowing() {
    let huge = "18446744073709551615";
    let answers = [Some(huge), Some(huge), Some("1")];
    assert_eq!(total_score(answers), i64::MAX);
}

#[test]
fn new_assessment_carries_affiliation_and_score() {
    let assessment = NewAssessment::from_form("ABC123", sample_form());
    assert_eq!(assessment.company_code, "ABC123");
    assert_eq!(assessment.total_score, 51);
    assert_eq!(assessment.answers[8].as_deref(), Some("9"));
    assert_eq!(assessment.name.as_deref(), Some("Jane Doe"));
}

#[test]
fn corporate_affiliation_falls_back_when_missing_or_blank() {
    let mut form = sample_form();
    assert_eq!(form.corporate_affiliation(), CORPORATE_PAGE_AFFILIATION);

    form.company_code = Some(String::new());
    assert_eq!(form.corporate_affiliation(), CORPORATE_PAGE_AFFILIATION);

    form.company_code = Some("ACME1".to_string());
    assert_eq!(form.corporate_affiliation(), "ACME1");
}

#[test]
fn employee_count_parses_leniently() {
    assert_eq!(parse_count(Some("250")), Some(250));
    assert_eq!(parse_count(Some("about 40")), None);
    assert_eq!(parse_count(Some("")), None);
    assert_eq!(parse_count(None), None);

    let mut form = company_form("ACME1", "hr@acme.test");
    form.employee_count = Some("50-100".to_string());
    let company = NewCompany::from(form);
    assert_eq!(company.employee_count, None);
    assert_eq!(company.company_code.as_deref(), Some("ACME1"));
}

fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn forms_from_pairs_keep_first_value_and_skip_unknown_names() {
    let form = AssessmentForm::from_pairs(&pairs(&[
        ("q1", "3"),
        ("q1", "4"),
        ("q12", "2"),
        ("newsletter", "yes"),
        ("company_code", "ACME1"),
    ]));
    assert_eq!(form.q1.as_deref(), Some("3"));
    assert_eq!(form.q12.as_deref(), Some("2"));
    assert_eq!(form.q2, None);
    assert_eq!(form.corporate_affiliation(), "ACME1");
    assert_eq!(total_score(form.answers()), 5);

    let company = CompanyForm::from_pairs(&pairs(&[
        ("employee_count", "40"),
        ("employee_count", "many"),
        ("company_code", "ACME1"),
    ]));
    assert_eq!(company.employee_count.as_deref(), Some("40"));
    assert_eq!(company.company_name, None);
    assert_eq!(CompanyForm::from_pairs(&[]), CompanyForm::default());
}
