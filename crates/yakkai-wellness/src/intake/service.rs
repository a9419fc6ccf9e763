use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use super::domain::{
    AssessmentForm, AssessmentRecord, CompanyForm, CompanyRecord, NewAssessment, NewCompany,
    SubmissionSample,
};
use super::repository::{IntakeRepository, RepositoryError};

/// Number of rows returned by the diagnostics endpoint.
pub const DIAGNOSTIC_SAMPLE_LIMIT: usize = 10;

/// Service turning submitted forms into stored records.
pub struct IntakeService<R> {
    repository: Arc<R>,
}

impl<R> IntakeService<R>
where
    R: IntakeRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Score and persist a questionnaire for the given affiliation token.
    pub fn submit_assessment(
        &self,
        company_code: &str,
        form: AssessmentForm,
    ) -> Result<AssessmentRecord, IntakeError> {
        let assessment = NewAssessment::from_form(company_code, form);
        let total_score = assessment.total_score;

        match self.repository.insert_assessment(assessment) {
            Ok(record) => {
                info!(
                    id = record.id.0,
                    company_code,
                    total_score,
                    "wellness submission saved"
                );
                Ok(record)
            }
            Err(err) => {
                error!(company_code, error = %err, "wellness submission rolled back");
                Err(err.into())
            }
        }
    }

    /// Persist a corporate registration.
    pub fn register_company(&self, form: CompanyForm) -> Result<CompanyRecord, IntakeError> {
        let company = NewCompany::from(form);

        match self.repository.insert_company(company) {
            Ok(record) => {
                info!(
                    id = record.id.0,
                    company_code = %record.company_code,
                    "company registration saved"
                );
                Ok(record)
            }
            Err(err) => {
                error!(error = %err, "company registration rolled back");
                Err(err.into())
            }
        }
    }

    /// Total assessment count plus the newest few rows.
    pub fn digest(&self, limit: usize) -> Result<SubmissionDigest, IntakeError> {
        let samples = self.repository.recent_assessments(limit)?;
        let count = self.repository.count_assessments()?;
        Ok(SubmissionDigest { count, samples })
    }
}

/// Diagnostics payload summarizing stored assessments.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionDigest {
    pub count: u64,
    pub samples: Vec<SubmissionSample>,
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}
