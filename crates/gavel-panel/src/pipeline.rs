//! The judge_agent evaluation pipeline.
//!
//! Assembles the workforce (four judges plus the researcher), creates the
//! evaluation task owned by the researcher, and processes it into the final
//! report.

use crate::config::PanelConfig;
use crate::dispatch::DispatchError;
use crate::judge::{build_researcher, make_judge};
use crate::personas::{EXPECTED_OUTPUT, JUDGE_PROFILES, RESEARCHER_ID, RESEARCHER_LABEL, SAMPLE_PROJECT};
use gavel_workforce::{DuckDuckGoTool, GoogleSearchTool, Task, Workforce};
use std::sync::Arc;
use tracing::info;

/// Builds the evaluation task content for a project description.
#[must_use]
pub fn evaluation_task_content(project: &str) -> String {
    format!(
        "Evaluate the hackathon project. First, do some research on the information related \
         to the project, then each judge should give a score accordingly. Finally, list the \
         opinions from each judge while preserving the judge's unique identity, along with \
         the score and judge name, and also give a final summary of the opinions.\n\n\
         Project under evaluation:\n{project}"
    )
}

/// Assembles the judging workforce: four judges, then the researcher.
///
/// # Errors
/// Returns a `DispatchError` if any agent cannot be constructed.
pub fn assemble_workforce(config: &PanelConfig) -> Result<Workforce, DispatchError> {
    let mut workforce = Workforce::new("Hackathon Judges");

    for profile in &JUDGE_PROFILES {
        let model = config.create_model()?;
        let judge = make_judge(profile, model);
        workforce = workforce.add_single_agent_worker(profile.label, Arc::new(judge));
    }

    let provider = config.create_tool_provider()?;
    let tools = vec![GoogleSearchTool::new().into_tool(), DuckDuckGoTool::new().into_tool()];
    let researcher = build_researcher(provider, tools);
    workforce = workforce.add_single_agent_worker(RESEARCHER_LABEL, Arc::new(researcher));

    Ok(workforce)
}

/// Runs the full evaluation pipeline and returns the aggregated report.
///
/// # Errors
/// Returns a `DispatchError` if assembly or task processing fails. There is
/// no partial-result recovery: the caller gets a complete report or an error.
pub async fn judge_panel(config: &PanelConfig) -> Result<String, DispatchError> {
    info!(model_id = %config.model_id, "Running judge panel");

    let workforce = assemble_workforce(config)?;
    let task = Task::new(
        evaluation_task_content(SAMPLE_PROJECT),
        EXPECTED_OUTPUT,
        RESEARCHER_ID,
    );

    let task = workforce.process_task(task).await?;
    Ok(task.result.unwrap_or_default())
}
