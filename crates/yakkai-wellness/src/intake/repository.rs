use super::domain::{
    AssessmentId, AssessmentRecord, CompanyId, CompanyRecord, NewAssessment, NewCompany,
    SubmissionSample,
};

/// Storage abstraction so the intake service can be exercised without a database.
///
/// Inserts are all-or-nothing: an `Err` means no row became visible.
pub trait IntakeRepository: Send + Sync {
    fn insert_assessment(
        &self,
        assessment: NewAssessment,
    ) -> Result<AssessmentRecord, RepositoryError>;
    fn insert_company(&self, company: NewCompany) -> Result<CompanyRecord, RepositoryError>;
    fn fetch_assessment(
        &self,
        id: AssessmentId,
    ) -> Result<Option<AssessmentRecord>, RepositoryError>;
    fn fetch_company(&self, id: CompanyId) -> Result<Option<CompanyRecord>, RepositoryError>;
    fn find_company_by_code(&self, code: &str) -> Result<Option<CompanyRecord>, RepositoryError>;
    fn assessments_for_affiliation(
        &self,
        company_code: &str,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError>;
    /// Newest first, by descending id.
    fn recent_assessments(&self, limit: usize) -> Result<Vec<SubmissionSample>, RepositoryError>;
    /// Oldest first, by ascending id.
    fn all_assessments(&self) -> Result<Vec<AssessmentRecord>, RepositoryError>;
    fn count_assessments(&self) -> Result<u64, RepositoryError>;
    fn count_companies(&self) -> Result<u64, RepositoryError>;
}

/// Every persistence problem is reported as one kind of failure carrying the
/// underlying message.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Storage(String),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(value.to_string())
    }
}
