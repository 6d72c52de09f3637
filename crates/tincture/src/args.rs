use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use tincture_core::SortKey;
use tincture_core::format::Preset;
use tincture_core::logging::LogFormat;

/// Parse, convert, sort and render colors.
#[derive(Debug, Clone, Parser)]
#[command(name = "tinct", version, author)]
pub struct CliArguments {
    /// The command to run
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Settings shared by every command. Flags win over the config file.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true, env = "TINCT_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Decimal digits kept when bytes become floats
    #[arg(long, global = true, value_name = "DIGITS")]
    pub precision: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Read every input as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Seed for the random notations
    #[arg(long, global = true, value_name = "N")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render colors through a template
    #[command(visible_alias = "r")]
    Render(RenderCommand),

    /// Show every representation of a color as JSON
    #[command(visible_alias = "i")]
    Inspect(InspectCommand),

    /// Sort colors and render them one per line
    Sort(SortCommand),

    /// Render the componentwise mean of the inputs
    Average(AverageCommand),

    /// Render a color that reads well on top of the input
    Contrast(ContrastCommand),
}

/// Where rendered output takes its template from.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Template of format codes, e.g. "rgb(RR, GR, BR)"
    #[arg(long, short, conflicts_with = "preset")]
    pub template: Option<String>,

    /// Named template
    #[arg(long, short)]
    pub preset: Option<Preset>,
}

#[derive(Debug, Clone, Parser)]
pub struct RenderCommand {
    /// Color notations, or JSON maps and lists
    #[arg(required = true, action = ArgAction::Append)]
    pub inputs: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Parser)]
pub struct InspectCommand {
    pub input: String,
}

#[derive(Debug, Clone, Parser)]
pub struct SortCommand {
    #[arg(required = true, action = ArgAction::Append)]
    pub inputs: Vec<String>,

    /// Ordering key
    #[arg(long, default_value_t = SortKey::Hue)]
    pub by: SortKey,

    /// Largest first
    #[arg(long)]
    pub reverse: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Parser)]
pub struct AverageCommand {
    #[arg(required = true, action = ArgAction::Append)]
    pub inputs: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Parser)]
pub struct ContrastCommand {
    pub input: String,

    /// Saturation of the result
    #[arg(long, default_value_t = 0.0)]
    pub saturation: f64,

    /// Brightness used on light backgrounds
    #[arg(long, default_value_t = 0.0)]
    pub min_brightness: f64,

    /// Turn added to the input hue
    #[arg(long, default_value_t = 0.0)]
    pub hue_offset: f64,

    /// Brightness difference below which the result is black or white
    #[arg(long, default_value_t = 140.0)]
    pub limit: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}
