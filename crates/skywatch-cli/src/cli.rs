use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use skywatch_store::StorageFormat;

#[derive(Parser)]
#[command(
    name = "skywatch",
    about = "Skywatch: live aircraft over a country, stored as JSON or CSV",
    version
)]
pub struct Cli {
    /// Run one command and exit; without one the interactive menu starts.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage format, overriding the configuration file.
    #[arg(long, global = true)]
    pub format: Option<FormatArg>,

    /// Directory holding the data files, overriding the configuration file.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for StorageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => StorageFormat::Json,
            FormatArg::Csv => StorageFormat::Csv,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch aircraft over a country and store them
    Fetch(FetchArgs),
    /// Show the highest stored aircraft
    Top(TopArgs),
    /// Show stored aircraft registered in the given countries
    Country(CountryArgs),
    /// Show every stored aircraft
    List,
    /// Delete the stored aircraft with a callsign
    Delete(DeleteArgs),
    /// Remove every stored aircraft
    Clear,
}

#[derive(Args)]
pub struct FetchArgs {
    pub country: String,
}

#[derive(Args)]
pub struct TopArgs {
    /// How many aircraft to show [default: display.default_top_n]
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

#[derive(Args)]
pub struct CountryArgs {
    #[arg(required = true)]
    pub countries: Vec<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub callsign: String,
}
