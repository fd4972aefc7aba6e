// Resume side of the pipeline: PDF text extraction and structuring.
// All LLM calls go through llm_client.

pub mod extractor;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod structurer;
