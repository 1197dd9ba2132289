// All LLM prompt templates for the council review.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Per-role review prompt.
/// Replace: {persona}, {context}, {instruction}
pub const ROLE_PROMPT_TEMPLATE: &str = "{persona}\n\nContext: {context}\n\n{instruction}";

/// Second-pass synthesis prompt. Replace `{debate}` with the council transcript.
pub const SYNTHESIS_PROMPT_TEMPLATE: &str =
    "You are the Synthesizer. Provide a balanced, final recommendation based on this debate:\n\n{debate}";

/// LinkedIn profile analysis prompt. Replace: {sector}, {linkedin_text}
pub const LINKEDIN_PROMPT_TEMPLATE: &str = "Analyze this pasted LinkedIn text for career strengths, gaps, improvements, and suggestions to make it more impactful for job applications in {sector}:\n\n{linkedin_text}";

/// Targeted coaching question prompt. Replace: {context}, {question}, {instruction}
pub const QUESTION_PROMPT_TEMPLATE: &str = "{context}\n\nQuestion: {question}\n{instruction}";

/// Aggregated application context fed into every review prompt.
/// Replace: {sector}, {cv_text}, {job_text}, {company_text}, {linkedin_text}
pub const CONTEXT_TEMPLATE: &str = "Sector: {sector}\nCV:\n{cv_text}\nJob Posting:\n{job_text}\nCompany:\n{company_text}\nLinkedIn: {linkedin_text}";
