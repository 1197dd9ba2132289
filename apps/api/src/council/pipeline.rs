//! Review pipeline: the single linear flow behind one form submission.
//!
//! Flow: pre-flight checks → council → synthesis → LinkedIn + questions →
//!       report assembly.
//!
//! The only hard stops are the pre-flight checks (no CV text, no model
//! credential). Both run before any model call. Nothing after them can fail
//! the review; failed calls are rendered inline.

use serde::Serialize;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::council::auxiliary::{analyze_linkedin, answer_questions, QuestionAnswer};
use crate::council::builder::ApplicationContext;
use crate::council::catalog::Catalog;
use crate::council::orchestrator::{run_council_feedback, run_synthesis, FeedbackItem, ProgressSink};
use crate::council::report::{Report, ReportInputs};
use crate::errors::AppError;
use crate::llm_client::{CompletionClient, StepOutcome};

/// States of one review. Declared in the only order they can be visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStage {
    Idle,
    AwaitingSubmission,
    RunningCouncil,
    RunningSynthesis,
    RunningAuxiliary,
    Assembled,
    Terminal,
}

/// Visited stages, in order. Stages are only ever appended.
#[derive(Debug, Clone)]
pub struct StageTrail(Vec<ReviewStage>);

impl StageTrail {
    fn new() -> Self {
        StageTrail(vec![ReviewStage::Idle])
    }

    fn enter(&mut self, stage: ReviewStage) {
        debug!("Review stage: {stage:?}");
        self.0.push(stage);
    }

    pub fn stages(&self) -> &[ReviewStage] {
        &self.0
    }
}

/// Extracted text for one submission. Documents are already plain text here.
#[derive(Debug, Clone, Default)]
pub struct ReviewSubmission {
    pub sector: String,
    pub cv_text: String,
    pub job_text: String,
    pub company_text: String,
    pub linkedin_text: String,
}

#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub review_id: Uuid,
    pub sector: String,
    pub feedback: Vec<FeedbackItem>,
    pub synthesis: StepOutcome,
    pub linkedin_analysis: Option<StepOutcome>,
    pub answers: Vec<QuestionAnswer>,
    pub career_path: String,
    pub mental_health_tips: String,
    pub report: Report,
    pub stages: StageTrail,
    pub model_calls: usize,
}

/// Runs one review end to end.
///
/// `llm` is `None` when no credential was configured at startup.
pub async fn run_review(
    llm: Option<&dyn CompletionClient>,
    catalog: &Catalog,
    submission: ReviewSubmission,
    progress: &mut dyn ProgressSink,
) -> Result<ReviewOutcome, AppError> {
    let review_id = Uuid::new_v4();
    let span = info_span!("review", %review_id, sector = %submission.sector);
    execute(review_id, llm, catalog, submission, progress)
        .instrument(span)
        .await
}

async fn execute(
    review_id: Uuid,
    llm: Option<&dyn CompletionClient>,
    catalog: &Catalog,
    submission: ReviewSubmission,
    progress: &mut dyn ProgressSink,
) -> Result<ReviewOutcome, AppError> {
    let mut trail = StageTrail::new();
    trail.enter(ReviewStage::AwaitingSubmission);

    // Pre-flight: nothing below this block runs unless all checks pass.
    if submission.cv_text.trim().is_empty() {
        trail.enter(ReviewStage::Terminal);
        return Err(AppError::MissingInput);
    }
    let Some(llm) = llm else {
        trail.enter(ReviewStage::Terminal);
        return Err(AppError::MissingCredential);
    };
    let Some(sector) = catalog.sector(&submission.sector) else {
        trail.enter(ReviewStage::Terminal);
        return Err(AppError::Validation(format!(
            "Unknown sector '{}'. Expected one of: {}",
            submission.sector,
            catalog.sector_names().join(", ")
        )));
    };

    let context = ApplicationContext {
        sector: sector.name.clone(),
        cv_text: submission.cv_text,
        job_text: submission.job_text,
        company_text: submission.company_text,
        linkedin_text: submission.linkedin_text,
    };
    let rendered_context = context.render();

    info!(
        "Starting review: {} council members, {} questions",
        sector.council.len(),
        catalog.questions.len()
    );

    trail.enter(ReviewStage::RunningCouncil);
    let feedback = run_council_feedback(llm, catalog, sector, &rendered_context, progress).await;

    trail.enter(ReviewStage::RunningSynthesis);
    let synthesis = run_synthesis(llm, &feedback).await;

    trail.enter(ReviewStage::RunningAuxiliary);
    let linkedin_analysis = analyze_linkedin(llm, &sector.name, &context.linkedin_text).await;
    let answers = answer_questions(llm, &catalog.questions, &rendered_context).await;

    let report = Report::assemble(ReportInputs {
        feedback: &feedback,
        synthesis: &synthesis,
        linkedin: linkedin_analysis.as_ref(),
        answers: &answers,
        career_path: &sector.career_path,
        mental_health_tips: &catalog.mental_health_tips,
    });
    trail.enter(ReviewStage::Assembled);

    let model_calls = feedback.len() + 1 + usize::from(linkedin_analysis.is_some()) + answers.len();
    let failed_calls = feedback.iter().filter(|f| f.outcome.is_failed()).count()
        + usize::from(synthesis.is_failed())
        + usize::from(linkedin_analysis.as_ref().is_some_and(StepOutcome::is_failed))
        + answers.iter().filter(|a| a.outcome.is_failed()).count();
    info!("Review assembled: {model_calls} model calls, {failed_calls} failed");

    trail.enter(ReviewStage::Terminal);

    Ok(ReviewOutcome {
        review_id,
        sector: sector.name.clone(),
        feedback,
        synthesis,
        linkedin_analysis,
        answers,
        career_path: sector.career_path.clone(),
        mental_health_tips: catalog.mental_health_tips.clone(),
        report,
        stages: trail,
        model_calls,
    })
}
