//! Hackathon judge panel for Gavel.
//!
//! This crate wires persona-configured judge agents and a research helper
//! into a workforce, runs a single evaluation task through it, and exposes
//! the entry dispatcher that maps incoming run requests onto registered
//! pipelines.

pub mod config;
pub mod dispatch;
pub mod judge;
pub mod personas;
pub mod pipeline;

pub use config::PanelConfig;
pub use dispatch::{
    run, DispatchError, EvaluationInput, InputSchema, PipelineHandler, PipelineInput,
    PipelineRegistry, RunRequest, SchemaTag,
};
pub use judge::{build_researcher, judge_instruction, make_judge};
pub use personas::{
    JudgeProfile, CONTRIBUTOR_JUDGE, ENGINEER_JUDGE, EXPECTED_OUTPUT, FOUNDER_JUDGE,
    JUDGE_PROFILES, RESEARCHER_ID, RESEARCHER_INSTRUCTION, RESEARCHER_LABEL, SAMPLE_PROJECT,
    VC_JUDGE,
};
pub use pipeline::{assemble_workforce, evaluation_task_content, judge_panel};
