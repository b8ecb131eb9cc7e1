// Resume analysis: prompt templates, model-output post-processing, and the
// session workflows behind each user action.
// All LLM calls go through the llm_client::TextGenerator seam.

pub mod handlers;
pub mod postprocess;
pub mod prompts;
pub mod workflow;
