// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Persona used for any council role without a catalog entry.
pub const FALLBACK_PERSONA: &str = "You are an expert reviewer.";

/// Instruction appended to every per-role review prompt.
pub const FEEDBACK_INSTRUCTION: &str =
    "Give specific, constructive feedback on this application (150–300 words).";

/// Instruction appended to every targeted coaching question.
pub const ANSWER_INSTRUCTION: &str = "Answer directly and actionably.";
