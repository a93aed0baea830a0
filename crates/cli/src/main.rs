mod cli;
mod config;
mod document;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::Path;
use tracing::{debug, info};

use vizkit_core::RuleId;
use vizkit_reporting::{add_force_now_query_string, ExecuteJobContext, ReportingJob};
use vizkit_rules::collection::CollectionAction;
use vizkit_rules::{evaluator, model, view, EditorOptions};

use crate::cli::{CliArgs, Command, ModelArgs, OutputArgs, ReportCommand, RulesCommand};
use crate::config::CliConfig;
use crate::document::{read_document, render_json, write_document};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    vizkit_core::config::load_dotenv();
    let args = CliArgs::parse();

    let env_config = vizkit_core::Config::from_env();
    env_config.log_summary();

    let config = CliConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;

    match args.command {
        Command::Rules(cmd) => run_rules(cmd, &config, &env_config),
        Command::Report(cmd) => run_report(cmd, &config, &env_config).await,
        Command::Config => {
            println!("{}", render_json(&env_config.redacted_summary(), config.pretty)?);
            Ok(())
        }
    }
}

fn editor_options(
    config: &CliConfig,
    env_config: &vizkit_core::Config,
    model: &ModelArgs,
    hide_secondary: bool,
) -> EditorOptions {
    config.resolve_editor(model.name.as_deref(), &env_config.editor.rules_field, hide_secondary)
}

fn run_rules(cmd: RulesCommand, config: &CliConfig, env_config: &vizkit_core::Config) -> Result<()> {
    match cmd {
        RulesCommand::Render { model: args, hide_secondary } => {
            let options = editor_options(config, env_config, &args, hide_secondary);
            let panel: serde_json::Value = read_document(Path::new(&args.model))?;
            let rows = view::render_rows(&panel, &options)?;
            println!("{}", render_json(&rows, config.pretty)?);
            Ok(())
        }
        RulesCommand::Colors { model: args, metric, hide_secondary } => {
            let options = editor_options(config, env_config, &args, hide_secondary);
            let panel: serde_json::Value = read_document(Path::new(&args.model))?;
            let rules = model::read_rules(&panel, &options.name)?.unwrap_or_default();
            let resolved = evaluator::resolve_colors(&rules, metric, &options);
            println!("{}", render_json(&resolved, config.pretty)?);
            Ok(())
        }
        RulesCommand::Add { model: args, after, output } => {
            let action = CollectionAction::Add { after: RuleId::from(after) };
            edit_model(config, env_config, &args, &output, &action, false)
        }
        RulesCommand::Delete { model: args, id, force, output } => {
            let action = CollectionAction::Delete { id: RuleId::from(id) };
            edit_model(config, env_config, &args, &output, &action, !force)
        }
        RulesCommand::Update { model: args, id, field, value, coercer, output } => {
            let action = CollectionAction::Update {
                id: RuleId::from(id),
                field,
                raw: value,
                coercer,
            };
            edit_model(config, env_config, &args, &output, &action, false)
        }
    }
}

/// Load the model, apply one action and emit (or write back) the result.
/// With `guard_last`, deleting the only remaining rule is refused the way the
/// console disables its delete button.
fn edit_model(
    config: &CliConfig,
    env_config: &vizkit_core::Config,
    args: &ModelArgs,
    output: &OutputArgs,
    action: &CollectionAction,
    guard_last: bool,
) -> Result<()> {
    let options = editor_options(config, env_config, args, false);
    let path = Path::new(&args.model);
    let panel: serde_json::Value = read_document(path)?;

    if guard_last {
        let current = model::read_rules(&panel, &options.name)?.unwrap_or_default();
        if current.len() < 2 {
            bail!("refusing to delete the last rule of '{}' (use --force)", options.name);
        }
    }

    let patch = model::propose(&panel, &options.name, action)?;
    let next = patch.apply_to(&panel)?;
    debug!(field = %patch.name, rules = patch.rules.len(), "model edited");

    if output.write {
        write_document(path, &next)?;
        info!(path = %path.display(), "model written");
    } else {
        println!("{}", render_json(&next, config.pretty)?);
    }
    Ok(())
}

async fn run_report(cmd: ReportCommand, config: &CliConfig, env_config: &vizkit_core::Config) -> Result<()> {
    match cmd {
        ReportCommand::ForceNow { job, force_now, now } => {
            let mut job: ReportingJob = read_document(Path::new(&job))?;
            if let Some(ts) = force_now {
                job.force_now = Some(ts);
            } else if now {
                job.set_force_now(chrono::Utc::now());
            }

            let out = add_force_now_query_string(ExecuteJobContext::new(job, &env_config.server))
                .await
                .context("failed to prepare report urls")?;

            let rendered = serde_json::json!({
                "job": out.job,
                "urls": out.urls,
            });
            println!("{}", render_json(&rendered, config.pretty)?);
            Ok(())
        }
    }
}
