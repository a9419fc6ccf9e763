use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::scoring;

/// Number of questions on the wellness questionnaire.
pub const ANSWER_COUNT: usize = 12;

/// Affiliation recorded when the corporate page form omits its `company_code` field.
pub const CORPORATE_PAGE_AFFILIATION: &str = "corporate_page";

/// Identifier wrapper for stored assessment submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub i64);

/// Identifier wrapper for stored company registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub i64);

/// URL-encoded body of the wellness questionnaire. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentForm {
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
    pub q4: Option<String>,
    pub q5: Option<String>,
    pub q6: Option<String>,
    pub q7: Option<String>,
    pub q8: Option<String>,
    pub q9: Option<String>,
    pub q10: Option<String>,
    pub q11: Option<String>,
    pub q12: Option<String>,
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub designation: Option<String>,
    /// Only read by the corporate page endpoint; the path segment wins elsewhere.
    pub company_code: Option<String>,
}

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

impl AssessmentForm {
    /// Builds the form from raw body pairs. A repeated name keeps its first value.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let field = |key: &str| first_value(pairs, key);
        Self {
            q1: field("q1"),
            q2: field("q2"),
            q3: field("q3"),
            q4: field("q4"),
            q5: field("q5"),
            q6: field("q6"),
            q7: field("q7"),
            q8: field("q8"),
            q9: field("q9"),
            q10: field("q10"),
            q11: field("q11"),
            q12: field("q12"),
            name: field("name"),
            mobile: field("mobile"),
            email: field("email"),
            designation: field("designation"),
            company_code: field("company_code"),
        }
    }

    /// Answers in question order, `q1` first.
    pub fn answers(&self) -> [Option<&str>; ANSWER_COUNT] {
        [
            self.q1.as_deref(),
            self.q2.as_deref(),
            self.q3.as_deref(),
            self.q4.as_deref(),
            self.q5.as_deref(),
            self.q6.as_deref(),
            self.q7.as_deref(),
            self.q8.as_deref(),
            self.q9.as_deref(),
            self.q10.as_deref(),
            self.q11.as_deref(),
            self.q12.as_deref(),
        ]
    }

    /// Affiliation supplied in the body, falling back to [`CORPORATE_PAGE_AFFILIATION`].
    pub fn corporate_affiliation(&self) -> String {
        match self.company_code.as_deref() {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => CORPORATE_PAGE_AFFILIATION.to_string(),
        }
    }
}

/// Scored assessment ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssessment {
    pub company_code: String,
    pub answers: [Option<String>; ANSWER_COUNT],
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub designation: Option<String>,
    pub total_score: i64,
}

impl NewAssessment {
    pub fn from_form(company_code: impl Into<String>, form: AssessmentForm) -> Self {
        let total_score = scoring::total_score(form.answers());
        let AssessmentForm {
            q1,
            q2,
            q3,
            q4,
            q5,
            q6,
            q7,
            q8,
            q9,
            q10,
            q11,
            q12,
            name,
            mobile,
            email,
            designation,
            company_code: _,
        } = form;

        Self {
            company_code: company_code.into(),
            answers: [q1, q2, q3, q4, q5, q6, q7, q8, q9, q10, q11, q12],
            name,
            mobile,
            email,
            designation,
            total_score,
        }
    }
}

/// Stored assessment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub company_code: Option<String>,
    pub answers: [Option<String>; ANSWER_COUNT],
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub designation: Option<String>,
    pub total_score: Option<i64>,
    pub submission_date: Option<NaiveDateTime>,
}

impl AssessmentRecord {
    pub fn sample(&self) -> SubmissionSample {
        SubmissionSample {
            id: self.id,
            company_code: self.company_code.clone(),
            name: self.name.clone(),
            total_score: self.total_score,
            submission_date: self.submission_date,
        }
    }
}

/// Trimmed view of an assessment exposed by the diagnostics endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionSample {
    pub id: AssessmentId,
    pub company_code: Option<String>,
    pub name: Option<String>,
    pub total_score: Option<i64>,
    pub submission_date: Option<NaiveDateTime>,
}

/// URL-encoded body of the corporate registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyForm {
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub employee_count: Option<String>,
    pub industry: Option<String>,
    pub company_code: Option<String>,
}

impl CompanyForm {
    /// Builds the form from raw body pairs. A repeated name keeps its first value.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let field = |key: &str| first_value(pairs, key);
        Self {
            company_name: field("company_name"),
            contact_person: field("contact_person"),
            email: field("email"),
            phone: field("phone"),
            employee_count: field("employee_count"),
            industry: field("industry"),
            company_code: field("company_code"),
        }
    }
}

/// Registration ready to be inserted. Required columns stay optional here so the
/// store, not the handler, decides what it rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub employee_count: Option<i64>,
    pub industry: Option<String>,
    pub company_code: Option<String>,
}

impl From<CompanyForm> for NewCompany {
    fn from(form: CompanyForm) -> Self {
        Self {
            employee_count: scoring::parse_count(form.employee_count.as_deref()),
            company_name: form.company_name,
            contact_person: form.contact_person,
            email: form.email,
            phone: form.phone,
            industry: form.industry,
            company_code: form.company_code,
        }
    }
}

/// Stored company registration row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyRecord {
    pub id: CompanyId,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub employee_count: Option<i64>,
    pub industry: Option<String>,
    pub company_code: String,
    pub created_date: Option<NaiveDateTime>,
}
