// Deck analysis: prompt construction, provider call, response normalization,
// readiness classification, persistence.
// All LLM calls go through llm_client — no direct OpenAI calls here.

pub mod extract;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod readiness;
pub mod store;
