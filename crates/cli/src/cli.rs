use clap::{Args, Parser, Subcommand};

use vizkit_rules::FieldCoercer;

/// Edit color rule lists and prepare report URLs.
#[derive(Parser, Debug)]
#[command(name = "vizkit", version, about = "Color rule editing and report URL preparation")]
pub struct CliArgs {
    /// Path to config file (default: ~/.config/vizkit/config.toml)
    #[arg(long, global = true, env = "VIZKIT_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Operate on the rule collection of a panel model
    #[command(subcommand)]
    Rules(RulesCommand),

    /// Report job helpers
    #[command(subcommand)]
    Report(ReportCommand),

    /// Print the resolved configuration
    Config,
}

/// Selects the model file and the collection inside it.
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Panel model file (JSON, or YAML for .yml/.yaml)
    #[arg(long)]
    pub model: String,

    /// Model field holding the rules (default from config / RULES_FIELD)
    #[arg(long)]
    pub name: Option<String>,
}

/// Where an edited model goes.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Write the edited model back to the model file instead of stdout
    #[arg(long)]
    pub write: bool,
}

#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    /// Print the row view of every rule
    Render {
        #[command(flatten)]
        model: ModelArgs,

        /// Leave the secondary color out of the rows
        #[arg(long)]
        hide_secondary: bool,
    },

    /// Insert a default rule after another
    Add {
        #[command(flatten)]
        model: ModelArgs,

        /// Id of the rule to insert after (appends when not found)
        #[arg(long)]
        after: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Remove a rule
    Delete {
        #[command(flatten)]
        model: ModelArgs,

        /// Id of the rule to remove
        #[arg(long)]
        id: String,

        /// Allow removing the only remaining rule
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Set one field of a rule from raw input
    Update {
        #[command(flatten)]
        model: ModelArgs,

        /// Id of the rule to change
        #[arg(long)]
        id: String,

        /// Field to set (value, operator, or a color field)
        #[arg(long)]
        field: String,

        /// Raw input; omit to clear the field
        #[arg(long)]
        value: Option<String>,

        /// Coercer to run the input through (default chosen by field)
        #[arg(long, value_parser = parse_coercer)]
        coercer: Option<FieldCoercer>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Resolve the colors a metric value gets
    Colors {
        #[command(flatten)]
        model: ModelArgs,

        /// Metric value to test the rules against
        #[arg(long, allow_hyphen_values = true)]
        metric: f64,

        #[arg(long)]
        hide_secondary: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Resolve a job's URLs and pin "now" in them
    ForceNow {
        /// Job descriptor file (JSON, or YAML for .yml/.yaml)
        #[arg(long)]
        job: String,

        /// Timestamp to pin, overriding the job's forceNow
        #[arg(long, conflicts_with = "now")]
        force_now: Option<String>,

        /// Pin the current time
        #[arg(long)]
        now: bool,
    },
}

fn parse_coercer(s: &str) -> Result<FieldCoercer, String> {
    match s {
        "numeric" | "number" => Ok(FieldCoercer::Numeric),
        "text" | "string" => Ok(FieldCoercer::Text),
        "operator" => Ok(FieldCoercer::Operator),
        other => Err(format!("unknown coercer '{}' (numeric, text, operator)", other)),
    }
}
