//! End-to-end pipeline tests with stubbed workers and the mock model.

use async_trait::async_trait;
use gavel_models::ModelType;
use gavel_panel::{
    evaluation_task_content, run, PanelConfig, PipelineRegistry, EXPECTED_OUTPUT, JUDGE_PROFILES,
    RESEARCHER_ID, RESEARCHER_LABEL,
};
use gavel_workforce::{Task, Worker, Workforce, WorkforceError};
use serde_json::json;
use std::sync::Arc;

struct StubWorker {
    id: String,
    reply: String,
}

impl StubWorker {
    fn new(id: &str, reply: &str) -> Arc<Self> {
        Arc::new(Self { id: id.to_string(), reply: reply.to_string() })
    }
}

#[async_trait]
impl Worker for StubWorker {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "stub"
    }

    async fn process(&self, _input: &str) -> Result<String, WorkforceError> {
        Ok(self.reply.clone())
    }
}

/// Four stub judges plus a stub researcher produce a report that preserves
/// every judge's identity and score.
#[tokio::test]
async fn stubbed_panel_report_contains_all_judges_and_scores() {
    let mut workforce = Workforce::new("Hackathon Judges");
    for profile in &JUDGE_PROFILES {
        workforce = workforce.add_single_agent_worker(
            profile.label,
            StubWorker::new(profile.id, "Score: 3/4, looks good."),
        );
    }
    workforce = workforce
        .add_single_agent_worker(RESEARCHER_LABEL, StubWorker::new(RESEARCHER_ID, "Background notes."));

    assert_eq!(workforce.worker_count(), 5);

    let task = Task::new(
        evaluation_task_content("Project name: Widget"),
        EXPECTED_OUTPUT,
        RESEARCHER_ID,
    );
    let task = workforce.process_task(task).await.unwrap();
    let report = task.result.unwrap();

    for profile in &JUDGE_PROFILES {
        assert!(report.contains(profile.label), "missing judge {}", profile.id);
    }
    assert!(report.matches("3/4").count() >= 4);
}

/// The dispatcher returns exactly what the registered pipeline returns,
/// ignoring unrelated payload fields on the zero-argument path.
#[tokio::test]
async fn dispatcher_returns_pipeline_result_verbatim() {
    let mut registry = PipelineRegistry::new();
    registry.register_no_args("judge_agent", || async { Ok("FIXED RESULT".to_string()) });

    let payload = json!({
        "inputs": {
            "func_name": "judge_agent",
            "func_input_data": {"description": "anything"}
        },
        "deployment": {"node": "local"},
        "consumer_id": "consumer-1",
        "signature": "sig"
    });

    let result = run(&registry, payload).await.unwrap();
    assert_eq!(result, "FIXED RESULT");
}

/// The full shipped pipeline runs against the mock model with no network.
#[tokio::test]
async fn judge_agent_pipeline_runs_with_mock_model() {
    let config = PanelConfig::new(ModelType::Mock, "mock-model");
    let registry = PipelineRegistry::with_default_pipelines(config);

    let payload = json!({
        "inputs": {"func_name": "judge_agent"},
        "consumer_id": "consumer-1"
    });

    let report = run(&registry, payload).await.unwrap();

    for profile in &JUDGE_PROFILES {
        assert!(report.contains(profile.label), "missing section for {}", profile.id);
    }
    assert!(report.contains("### Summary"));
}

/// Unknown function names surface in the error message.
#[tokio::test]
async fn unknown_function_is_reported_by_name() {
    let config = PanelConfig::new(ModelType::Mock, "mock-model");
    let registry = PipelineRegistry::with_default_pipelines(config);

    let payload = json!({"inputs": {"func_name": "nonexistent_fn"}});
    let err = run(&registry, payload).await.unwrap_err();
    assert!(err.to_string().contains("nonexistent_fn"));
}
