//! Prompt Builder: pure string composition, no I/O.

use crate::council::catalog::Catalog;
use crate::council::orchestrator::FeedbackItem;
use crate::council::prompts::{
    CONTEXT_TEMPLATE, LINKEDIN_PROMPT_TEMPLATE, QUESTION_PROMPT_TEMPLATE, ROLE_PROMPT_TEMPLATE,
    SYNTHESIS_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{ANSWER_INSTRUCTION, FEEDBACK_INSTRUCTION};

/// Everything the council sees about one application.
#[derive(Debug, Clone, Default)]
pub struct ApplicationContext {
    pub sector: String,
    pub cv_text: String,
    pub job_text: String,
    pub company_text: String,
    pub linkedin_text: String,
}

impl ApplicationContext {
    /// Serializes the context in its fixed field order.
    pub fn render(&self) -> String {
        fill(
            CONTEXT_TEMPLATE,
            &[
                ("sector", self.sector.as_str()),
                ("cv_text", self.cv_text.as_str()),
                ("job_text", self.job_text.as_str()),
                ("company_text", self.company_text.as_str()),
                ("linkedin_text", self.linkedin_text.as_str()),
            ],
        )
    }
}

/// Persona for `role` (or the fallback) + serialized context + feedback brief.
pub fn build_role_prompt(catalog: &Catalog, role: &str, context: &str) -> String {
    fill(
        ROLE_PROMPT_TEMPLATE,
        &[
            ("persona", catalog.persona(role)),
            ("context", context),
            ("instruction", FEEDBACK_INSTRUCTION),
        ],
    )
}

/// Synthesis instruction followed by every `role: response` pair in council order.
pub fn build_synthesis_prompt(items: &[FeedbackItem]) -> String {
    let debate: String = items
        .iter()
        .map(|item| format!("{}: {}\n\n", item.role, item.outcome.render()))
        .collect();
    fill(SYNTHESIS_PROMPT_TEMPLATE, &[("debate", debate.as_str())])
}

pub fn build_linkedin_prompt(sector: &str, linkedin_text: &str) -> String {
    fill(
        LINKEDIN_PROMPT_TEMPLATE,
        &[("sector", sector), ("linkedin_text", linkedin_text)],
    )
}

pub fn build_question_prompt(context: &str, question: &str) -> String {
    fill(
        QUESTION_PROMPT_TEMPLATE,
        &[
            ("context", context),
            ("question", question),
            ("instruction", ANSWER_INSTRUCTION),
        ],
    )
}

/// Substitutes `{key}` placeholders in a single pass, so braces inside
/// uploaded text are never treated as placeholders.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values
            .iter()
            .find(|(key, _)| tail.starts_with(key) && tail[key.len()..].starts_with('}'));
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::prompts::FALLBACK_PERSONA;
    use crate::llm_client::StepOutcome;

    fn context() -> ApplicationContext {
        ApplicationContext {
            sector: "Technology".to_string(),
            cv_text: "Experienced backend engineer...".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_context_renders_in_fixed_order() {
        let rendered = ApplicationContext {
            sector: "Finance".to_string(),
            cv_text: "cv".to_string(),
            job_text: "job".to_string(),
            company_text: "co".to_string(),
            linkedin_text: "li".to_string(),
        }
        .render();
        assert_eq!(
            rendered,
            "Sector: Finance\nCV:\ncv\nJob Posting:\njob\nCompany:\nco\nLinkedIn: li"
        );
    }

    #[test]
    fn test_role_prompt_uses_persona_and_brief() {
        let catalog = Catalog::builtin();
        let ctx = context().render();
        let prompt = build_role_prompt(&catalog, "CEO", &ctx);
        assert!(prompt.starts_with("You are a visionary CEO"));
        assert!(prompt.contains(&format!("Context: {ctx}")));
        assert!(prompt.ends_with("(150–300 words)."));
    }

    #[test]
    fn test_unknown_role_gets_fallback_persona() {
        let catalog = Catalog::builtin();
        let prompt = build_role_prompt(&catalog, "Chief Vibes Officer", "ctx");
        assert!(!prompt.is_empty());
        assert!(prompt.starts_with(FALLBACK_PERSONA));
    }

    #[test]
    fn test_synthesis_prompt_keeps_council_order_and_inline_errors() {
        let items = vec![
            FeedbackItem {
                role: "CEO".to_string(),
                outcome: StepOutcome::Completed("Great leader.".to_string()),
            },
            FeedbackItem {
                role: "CTO".to_string(),
                outcome: StepOutcome::Failed("timeout".to_string()),
            },
        ];
        let prompt = build_synthesis_prompt(&items);
        assert_eq!(
            prompt,
            "You are the Synthesizer. Provide a balanced, final recommendation based on this debate:\n\n\
             CEO: Great leader.\n\nCTO: Error: timeout\n\n"
        );
    }

    #[test]
    fn test_linkedin_prompt_names_sector() {
        let prompt = build_linkedin_prompt("Sales", "Top closer 2025");
        assert!(prompt.contains("job applications in Sales:\n\nTop closer 2025"));
    }

    #[test]
    fn test_question_prompt_layout() {
        let prompt = build_question_prompt("CTX", "Why?");
        assert_eq!(prompt, "CTX\n\nQuestion: Why?\nAnswer directly and actionably.");
    }

    #[test]
    fn test_fill_does_not_expand_placeholders_inside_values() {
        let ctx = ApplicationContext {
            sector: "Technology".to_string(),
            cv_text: "I write {job_text} templates".to_string(),
            job_text: "JOB".to_string(),
            ..Default::default()
        };
        let rendered = ctx.render();
        assert!(rendered.contains("CV:\nI write {job_text} templates\n"));
    }

    #[test]
    fn test_fill_leaves_unknown_braces_alone() {
        assert_eq!(fill("a {x} {y} {", &[("x", "1")]), "a 1 {y} {");
    }
}
