//! Feedback Orchestrator: one model call per council role, then one synthesis.
//!
//! Calls are strictly sequential: each `.await` completes before the next
//! prompt is built. A failed call is recorded inline and the loop carries on.

use tracing::{debug, info};

use crate::council::builder::{build_role_prompt, build_synthesis_prompt};
use crate::council::catalog::{Catalog, SectorProfile, SYNTHESIS_ROLE};
use crate::llm_client::{ask, CompletionClient, StepOutcome};

/// One council member's review, in council order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackItem {
    pub role: String,
    pub outcome: StepOutcome,
}

/// Emitted once per completed role.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub role: String,
    /// Position of the role in the full council, 1-based.
    pub completed: usize,
    pub total: usize,
    pub fraction: f32,
}

/// Receives council progress. The orchestrator never reads anything back.
pub trait ProgressSink: Send {
    fn advance(&mut self, event: ProgressEvent);
}

/// Logs progress through `tracing`; the default sink for HTTP reviews.
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn advance(&mut self, event: ProgressEvent) {
        info!(
            "Council progress: {} done ({}/{}, {:.0}%)",
            event.role,
            event.completed,
            event.total,
            event.fraction * 100.0
        );
    }
}

impl ProgressSink for Vec<ProgressEvent> {
    fn advance(&mut self, event: ProgressEvent) {
        self.push(event);
    }
}

/// Runs every non-synthesis role of the sector's council in declared order.
pub async fn run_council_feedback(
    llm: &dyn CompletionClient,
    catalog: &Catalog,
    sector: &SectorProfile,
    context: &str,
    progress: &mut dyn ProgressSink,
) -> Vec<FeedbackItem> {
    let total = sector.council.len();
    let mut feedback = Vec::with_capacity(total.saturating_sub(1));

    for (i, role) in sector.council.iter().enumerate() {
        if role == SYNTHESIS_ROLE {
            continue;
        }

        debug!("Consulting council role '{role}'");
        let prompt = build_role_prompt(catalog, role, context);
        let outcome = ask(llm, &prompt).await;

        feedback.push(FeedbackItem {
            role: role.clone(),
            outcome,
        });
        progress.advance(ProgressEvent {
            role: role.clone(),
            completed: i + 1,
            total,
            fraction: (i + 1) as f32 / total as f32,
        });
    }

    feedback
}

/// Exactly one call over the full transcript.
pub async fn run_synthesis(llm: &dyn CompletionClient, feedback: &[FeedbackItem]) -> StepOutcome {
    let prompt = build_synthesis_prompt(feedback);
    ask(llm, &prompt).await
}
