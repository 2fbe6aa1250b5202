// Question generation: oracle protocol, creation/answer pipeline, HTTP handlers.
// All oracle calls go through llm_client — nothing here talks HTTP to the model directly.

pub mod generator;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
