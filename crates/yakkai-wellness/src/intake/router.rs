use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use tracing::debug;

use super::domain::{AssessmentForm, CompanyForm};
use super::repository::IntakeRepository;
use super::service::{IntakeService, DIAGNOSTIC_SAMPLE_LIMIT};

/// Where every successful submission is redirected.
pub const CONFIRMATION_PATH: &str = "/submission_success";

const CONFIRMATION_PAGE: &str = "<!DOCTYPE html>
<html lang=\"en\">
<head><meta charset=\"utf-8\"><title>Thank you | Yakkai Neri</title></head>
<body>
<h1>Thank you!</h1>
<p>Your response has been recorded. Our team will be in touch soon.</p>
<p><a href=\"/\">Back to home</a></p>
</body>
</html>
";

/// Router exposing the form intake endpoints and the submissions digest.
pub fn intake_router<R>(service: Arc<IntakeService<R>>) -> Router
where
    R: IntakeRepository + 'static,
{
    Router::new()
        .route(
            "/submit_wellness/:company_code",
            post(submit_wellness_handler::<R>),
        )
        .route(
            "/submit_corporate_wellness",
            post(submit_corporate_wellness_handler::<R>),
        )
        .route("/submit_company", post(submit_company_handler::<R>))
        .route("/debug_submissions", get(debug_submissions_handler::<R>))
        .route(CONFIRMATION_PATH, get(confirmation_handler))
        .with_state(service)
}

pub(crate) async fn submit_wellness_handler<R>(
    State(service): State<Arc<IntakeService<R>>>,
    Path(company_code): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response
where
    R: IntakeRepository + 'static,
{
    let form = AssessmentForm::from_pairs(&pairs);
    debug!(%company_code, ?form, "wellness form received");
    assessment_response(service.submit_assessment(&company_code, form).map(|_| ()))
}

pub(crate) async fn submit_corporate_wellness_handler<R>(
    State(service): State<Arc<IntakeService<R>>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response
where
    R: IntakeRepository + 'static,
{
    let form = AssessmentForm::from_pairs(&pairs);
    let company_code = form.corporate_affiliation();
    debug!(%company_code, ?form, "corporate page wellness form received");
    assessment_response(service.submit_assessment(&company_code, form).map(|_| ()))
}

pub(crate) async fn submit_company_handler<R>(
    State(service): State<Arc<IntakeService<R>>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response
where
    R: IntakeRepository + 'static,
{
    let form = CompanyForm::from_pairs(&pairs);
    debug!(?form, "company registration form received");
    match service.register_company(form) {
        Ok(_) => Redirect::to(CONFIRMATION_PATH).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("An error occurred while saving company data. Error: {err}"),
        )
            .into_response(),
    }
}

pub(crate) async fn debug_submissions_handler<R>(
    State(service): State<Arc<IntakeService<R>>>,
) -> Response
where
    R: IntakeRepository + 'static,
{
    match service.digest(DIAGNOSTIC_SAMPLE_LIMIT) {
        Ok(digest) => (StatusCode::OK, Json(digest)).into_response(),
        Err(err) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn confirmation_handler() -> Html<&'static str> {
    Html(CONFIRMATION_PAGE)
}

fn assessment_response<E: std::fmt::Display>(outcome: Result<(), E>) -> Response {
    match outcome {
        Ok(()) => Redirect::to(CONFIRMATION_PATH).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error submitting form. Please check the console for details. Error: {err}"),
        )
            .into_response(),
    }
}
