use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::intake::domain::{
    AssessmentForm, AssessmentId, AssessmentRecord, CompanyForm, CompanyId, CompanyRecord,
    NewAssessment, NewCompany, SubmissionSample,
};
use crate::intake::repository::{IntakeRepository, RepositoryError};
use crate::intake::router::intake_router;
use crate::intake::service::IntakeService;
use crate::intake::store::SqliteIntakeStore;

pub(super) fn form_with_answers(answers: [&str; 12]) -> AssessmentForm {
    let [q1, q2, q3, q4, q5, q6, q7, q8, q9, q10, q11, q12] = answers.map(|a| Some(a.to_string()));
    AssessmentForm {
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
        name: Some("Jane Doe".to_string()),
        mobile: Some("9840012345".to_string()),
        email: Some("jane.doe@example.com".to_string()),
        designation: Some("Analyst".to_string()),
        company_code: None,
    }
}

pub(super) fn sample_form() -> AssessmentForm {
    form_with_answers(["1", "2", "3", "4", "5", "6", "7", "8", "9", "1", "2", "3"])
}

pub(super) fn company_form(code: &str, email: &str) -> CompanyForm {
    CompanyForm {
        company_name: Some("Acme Corp".to_string()),
        contact_person: Some("Priya Raman".to_string()),
        email: Some(email.to_string()),
        phone: Some("04412345678".to_string()),
        employee_count: Some("250".to_string()),
        industry: Some("Manufacturing".to_string()),
        company_code: Some(code.to_string()),
    }
}

pub(super) fn build_service() -> (IntakeService<SqliteIntakeStore>, Arc<SqliteIntakeStore>) {
    let store = Arc::new(SqliteIntakeStore::open_in_memory().expect("in-memory store opens"));
    (IntakeService::new(store.clone()), store)
}

pub(super) fn router_with_service<R: IntakeRepository + 'static>(
    service: IntakeService<R>,
) -> axum::Router {
    intake_router(Arc::new(service))
}

/// Repository standing in for a database that cannot be reached.
pub(super) struct UnavailableRepository;

impl UnavailableRepository {
    fn failure() -> RepositoryError {
        RepositoryError::Storage("unable to open database file".to_string())
    }
}

impl IntakeRepository for UnavailableRepository {
    fn insert_assessment(
        &self,
        _assessment: NewAssessment,
    ) -> Result<AssessmentRecord, RepositoryError> {
        Err(Self::failure())
    }

    fn insert_company(&self, _company: NewCompany) -> Result<CompanyRecord, RepositoryError> {
        Err(Self::failure())
    }

    fn fetch_assessment(
        &self,
        _id: AssessmentId,
    ) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(Self::failure())
    }

    fn fetch_company(&self, _id: CompanyId) -> Result<Option<CompanyRecord>, RepositoryError> {
        Err(Self::failure())
    }

    fn find_company_by_code(&self, _code: &str) -> Result<Option<CompanyRecord>, RepositoryError> {
        Err(Self::failure())
    }

    fn assessments_for_affiliation(
        &self,
        _company_code: &str,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(Self::failure())
    }

    fn recent_assessments(&self, _limit: usize) -> Result<Vec<SubmissionSample>, RepositoryError> {
        Err(Self::failure())
    }

    fn all_assessments(&self) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(Self::failure())
    }

    fn count_assessments(&self) -> Result<u64, RepositoryError> {
        Err(Self::failure())
    }

    fn count_companies(&self) -> Result<u64, RepositoryError> {
        Err(Self::failure())
    }
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    String::from_utf8(read_body(response).await).expect("utf8 body")
}
