// Career review council.
// Implements: catalog, prompt building, council orchestration, auxiliary
// passes, report assembly and the review pipeline.
// All LLM calls go through llm_client; nothing here talks HTTP to the model.

pub mod auxiliary;
pub mod builder;
pub mod catalog;
pub mod handlers;
pub mod orchestrator;
pub mod pipeline;
pub mod prompts;
pub mod report;
