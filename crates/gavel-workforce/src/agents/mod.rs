//! Worker implementations.
//!
//! - `ChatAgent`: a persona-configured conversational worker.
//! - `ResearchAgent`: a tool-augmented worker that can run web searches.

pub mod chat;
pub mod research;

pub use chat::ChatAgent;
pub use research::ResearchAgent;
