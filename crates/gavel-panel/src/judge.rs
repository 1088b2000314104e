//! Judge and researcher construction.

use crate::personas::{JudgeProfile, RESEARCHER_ID, RESEARCHER_INSTRUCTION, RESEARCHER_LABEL};
use gavel_abstraction::Model;
use gavel_workforce::{ChatAgent, ResearchAgent, Tool, ToolCallProvider};
use std::sync::Arc;
use tracing::debug;

/// Builds the system instruction for a judge.
///
/// The instruction is a deterministic concatenation: hackathon-judge
/// preamble, persona, example feedback, criteria, then the 1-4 scoring
/// instruction. Empty strings are accepted and simply produce a degenerate
/// instruction.
#[must_use]
pub fn judge_instruction(persona: &str, example_feedback: &str, criteria: &str) -> String {
    format!(
        "You are a judge in a hackathon.\n\
         This is your persona that you MUST act with: {persona}\n\
         Here is an example feedback that you might give with your persona, \
         you MUST try your best to align with this:\n\
         {example_feedback}\n\
         When evaluating projects, you must use the following criteria:\n\
         {criteria}\n\
         You also need to give scores based on these criteria, from 1-4. \
         The score given should be like 3/4, 2/4, etc."
    )
}

/// Builds one judge agent from its profile, bound to the given model.
#[must_use]
pub fn make_judge(profile: &JudgeProfile, model: Arc<dyn Model>) -> ChatAgent {
    debug!(judge_id = %profile.id, "Creating judge agent");
    let instruction =
        judge_instruction(profile.persona, profile.example_feedback, profile.criteria);
    ChatAgent::new(profile.id, profile.label, instruction, model)
}

/// Builds the research helper agent with its search tool bindings.
#[must_use]
pub fn build_researcher(provider: Arc<dyn ToolCallProvider>, tools: Vec<Tool>) -> ResearchAgent {
    debug!(tool_count = tools.len(), "Creating researcher agent");
    ResearchAgent::new(RESEARCHER_ID, RESEARCHER_LABEL, RESEARCHER_INSTRUCTION, provider, tools)
}
