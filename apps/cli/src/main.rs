//! Gavel CLI - run the hackathon judge panel from the command line.
//!
//! Builds the panel configuration from flags and environment, synthesizes a
//! run-request payload, and dispatches it through the pipeline registry.

use anyhow::Context;
use clap::Parser;
use gavel_models::ModelType;
use gavel_panel::{run, PanelConfig, PipelineRegistry};
use serde_json::json;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Gavel - multi-agent evaluation panel
///
/// Gavel assembles a panel of persona-driven judge agents plus a research
/// helper, dispatches one evaluation task to them, and prints the aggregated
/// report.
#[derive(Parser, Debug)]
#[command(
    name = "gavel",
    author,
    version,
    about = "Gavel - multi-agent evaluation panel"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Model provider (mock, openai); overrides GAVEL_MODEL_TYPE
    #[arg(long)]
    model_type: Option<String>,

    /// Model ID (e.g., gpt-4o); overrides GAVEL_MODEL_ID
    #[arg(long)]
    model_id: Option<String>,

    /// Pipeline to invoke
    #[arg(long, default_value = "judge_agent")]
    func_name: String,

    /// Schema tag for the generic dispatch path
    #[arg(long)]
    input_type: Option<String>,

    /// JSON arguments for the generic dispatch path
    #[arg(long)]
    input: Option<String>,

    /// Consumer identity forwarded with the request
    #[arg(long)]
    consumer_id: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = args
        .log_level
        .parse::<Level>()
        .with_context(|| format!("invalid log level '{}'", args.log_level))?;
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to initialize logging")?;

    let mut config = PanelConfig::from_env();
    if let Some(model_type) = args.model_type {
        config.model_type = model_type
            .parse::<ModelType>()
            .map_err(|()| anyhow::anyhow!("unrecognized model type '{model_type}'"))?;
    }
    if let Some(model_id) = args.model_id {
        config.model_id = model_id;
    }

    let registry = PipelineRegistry::with_default_pipelines(config);

    let func_input_data = args
        .input
        .as_deref()
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .context("--input must be valid JSON")?;

    let payload = json!({
        "inputs": {
            "func_name": args.func_name,
            "input_type": args.input_type,
            "func_input_data": func_input_data,
        },
        "consumer_id": args.consumer_id,
    });

    let report = run(&registry, payload).await?;
    println!("{report}");

    Ok(())
}
