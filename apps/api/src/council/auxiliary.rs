//! Auxiliary Analyzers: the optional LinkedIn pass and the targeted
//! coaching questions. Same failure rule as the council: inline, never fatal.

use tracing::{debug, info};

use crate::council::builder::{build_linkedin_prompt, build_question_prompt};
use crate::llm_client::{ask, CompletionClient, StepOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionAnswer {
    pub question: String,
    pub outcome: StepOutcome,
}

/// One call when `linkedin_text` has content, none otherwise.
pub async fn analyze_linkedin(
    llm: &dyn CompletionClient,
    sector: &str,
    linkedin_text: &str,
) -> Option<StepOutcome> {
    if linkedin_text.trim().is_empty() {
        debug!("No LinkedIn text supplied, skipping profile analysis");
        return None;
    }
    info!("Analyzing LinkedIn profile text");
    let prompt = build_linkedin_prompt(sector, linkedin_text);
    Some(ask(llm, &prompt).await)
}

/// Asks every question in declared order. All of them run, whatever fails.
pub async fn answer_questions(
    llm: &dyn CompletionClient,
    questions: &[String],
    context: &str,
) -> Vec<QuestionAnswer> {
    let mut answers = Vec::with_capacity(questions.len());
    for question in questions {
        let prompt = build_question_prompt(context, question);
        let outcome = ask(llm, &prompt).await;
        answers.push(QuestionAnswer {
            question: question.clone(),
            outcome,
        });
    }
    answers
}
