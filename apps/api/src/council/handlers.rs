//! Axum route handlers for the Review API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::council::catalog::SectorProfile;
use crate::council::orchestrator::TracingProgress;
use crate::council::pipeline::{run_review, ReviewOutcome, ReviewStage, ReviewSubmission};
use crate::council::report::{REPORT_FILE_NAME, REPORT_MIME};
use crate::documents::extract_upload;
use crate::errors::AppError;
use crate::llm_client::StepOutcome;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Raw multipart fields before extraction.
#[derive(Debug, Default)]
struct ReviewForm {
    sector: String,
    cv: Option<Bytes>,
    cv_text: String,
    job_posting: Option<Bytes>,
    company_info: Option<Bytes>,
    linkedin_text: String,
}

#[derive(Debug, Serialize)]
pub struct SectorListResponse {
    pub sectors: Vec<SectorProfile>,
    pub questions: Vec<String>,
}

/// One rendered text block, exactly as the report shows it.
#[derive(Debug, Serialize)]
pub struct RenderedBlock {
    pub heading: String,
    pub text: String,
    pub failed: bool,
}

impl RenderedBlock {
    fn new(heading: &str, outcome: &StepOutcome) -> Self {
        Self {
            heading: heading.to_string(),
            text: outcome.render(),
            failed: outcome.is_failed(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub review_id: Uuid,
    pub sector: String,
    pub feedback: Vec<RenderedBlock>,
    pub final_recommendation: RenderedBlock,
    pub linkedin_analysis: Option<RenderedBlock>,
    pub career_path: String,
    pub questions: Vec<RenderedBlock>,
    pub mental_health_tips: String,
    pub report: String,
    pub report_file_name: &'static str,
    pub model_calls: usize,
    pub stages: Vec<ReviewStage>,
    pub generated_at: DateTime<Utc>,
}

impl From<ReviewOutcome> for ReviewResponse {
    fn from(outcome: ReviewOutcome) -> Self {
        ReviewResponse {
            review_id: outcome.review_id,
            feedback: outcome
                .feedback
                .iter()
                .map(|f| RenderedBlock::new(&f.role, &f.outcome))
                .collect(),
            final_recommendation: RenderedBlock::new("Final Recommendation", &outcome.synthesis),
            linkedin_analysis: outcome
                .linkedin_analysis
                .as_ref()
                .map(|o| RenderedBlock::new("LinkedIn Analysis", o)),
            questions: outcome
                .answers
                .iter()
                .map(|a| RenderedBlock::new(&a.question, &a.outcome))
                .collect(),
            report: outcome.report.render(),
            report_file_name: REPORT_FILE_NAME,
            model_calls: outcome.model_calls,
            stages: outcome.stages.stages().to_vec(),
            sector: outcome.sector,
            career_path: outcome.career_path,
            mental_health_tips: outcome.mental_health_tips,
            generated_at: Utc::now(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sectors
///
/// Sectors in declared order with their councils, for the sector picker.
pub async fn handle_list_sectors(State(state): State<AppState>) -> Json<SectorListResponse> {
    Json(SectorListResponse {
        sectors: state.catalog.sectors.clone(),
        questions: state.catalog.questions.clone(),
    })
}

/// POST /api/v1/review
///
/// Multipart form: `cv`, `job_posting`, `company_info` (PDF files),
/// `cv_text`, `linkedin_text`, `sector` (text). Runs the full council review.
pub async fn handle_review(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ReviewResponse>, AppError> {
    let outcome = review_from_form(&state, multipart).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/review/report
///
/// Same form as `/api/v1/review`; answers with the report as a text download.
pub async fn handle_report_download(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let outcome = review_from_form(&state, multipart).await?;
    let headers = [
        (header::CONTENT_TYPE, format!("{REPORT_MIME}; charset=utf-8")),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
        ),
    ];
    Ok((headers, outcome.report.render()))
}

async fn review_from_form(state: &AppState, multipart: Multipart) -> Result<ReviewOutcome, AppError> {
    let form = read_form(multipart).await?;

    // Extraction runs before the pre-flight checks, like the upload form.
    let uploaded_cv = extract_upload(form.cv).await;
    let cv_text = if uploaded_cv.is_empty() {
        form.cv_text
    } else {
        uploaded_cv
    };
    let job_text = extract_upload(form.job_posting).await;
    let company_text = extract_upload(form.company_info).await;

    let submission = ReviewSubmission {
        sector: form.sector.trim().to_string(),
        cv_text,
        job_text,
        company_text,
        linkedin_text: form.linkedin_text,
    };

    run_review(
        state.llm.as_deref(),
        &state.catalog,
        submission,
        &mut TracingProgress,
    )
    .await
}

async fn read_form(mut multipart: Multipart) -> Result<ReviewForm, AppError> {
    let mut form = ReviewForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let invalid = |e: axum::extract::multipart::MultipartError| {
            AppError::Validation(format!("Could not read form field '{name}': {e}"))
        };

        match name.as_str() {
            "sector" => form.sector = field.text().await.map_err(invalid)?,
            "cv_text" => form.cv_text = field.text().await.map_err(invalid)?,
            "linkedin_text" => form.linkedin_text = field.text().await.map_err(invalid)?,
            "cv" => form.cv = non_empty(field.bytes().await.map_err(invalid)?),
            "job_posting" => form.job_posting = non_empty(field.bytes().await.map_err(invalid)?),
            "company_info" => form.company_info = non_empty(field.bytes().await.map_err(invalid)?),
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(form)
}

/// Browsers send an empty part when no file was chosen.
fn non_empty(bytes: Bytes) -> Option<Bytes> {
    (!bytes.is_empty()).then_some(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_drops_empty_upload() {
        assert!(non_empty(Bytes::new()).is_none());
        assert_eq!(non_empty(Bytes::from_static(b"%PDF")).as_deref(), Some(&b"%PDF"[..]));
    }

    #[test]
    fn test_rendered_block_marks_failures() {
        let block = RenderedBlock::new("CTO", &StepOutcome::Failed("boom".to_string()));
        assert_eq!(block.text, "Error: boom");
        assert!(block.failed);
    }
}
