mod cmd;
mod logging;
mod mcp;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "nvault", version, about = "Sandboxed markdown note vault")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options that select the configuration and vault, shared by every command.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Path to config file (defaults to $XDG_CONFIG_HOME/notevault/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use from the config file
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Vault directory, overriding the profile's vault_root
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved paths
    Doctor,

    /// List notes in the vault
    List(ListArgs),

    /// Search notes by content and tags
    Search(SearchArgs),

    /// Print the content of a note
    Read(ReadArgs),

    /// Create a new note (fails if it already exists)
    Create(WriteArgs),

    /// Overwrite an existing note
    Update(WriteArgs),

    /// Run the MCP server on stdio
    Serve,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Quiet,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Directory to list, relative to the vault root
    #[arg(default_value = "")]
    pub path: String,

    /// Only list notes directly inside the directory
    #[arg(long)]
    pub flat: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value_t)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,

    /// Only print note paths
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Case-insensitive regular expression matched against note content
    #[arg(default_value = "")]
    pub query: String,

    /// Restrict the search to a directory, relative to the vault root
    #[arg(long, default_value = "")]
    pub path: String,

    /// Only return notes carrying this tag (repeatable, any match)
    #[arg(long = "tag", short = 't')]
    pub tags: Vec<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,

    /// Only print note paths
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Note path, relative to the vault root
    pub path: String,
}

#[derive(Debug, Args)]
pub struct WriteArgs {
    /// Note path, relative to the vault root
    pub path: String,

    /// Note content (read from stdin when omitted)
    #[arg(long, short)]
    pub content: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    let cfg = &cli.config;

    match cli.command {
        Commands::Doctor => cmd::doctor::run(cfg),
        Commands::List(args) => cmd::list::run(cfg, args),
        Commands::Search(args) => cmd::search::run(cfg, args),
        Commands::Read(args) => cmd::read::run(cfg, args),
        Commands::Create(args) => cmd::write::run_create(cfg, args),
        Commands::Update(args) => cmd::write::run_update(cfg, args),
        Commands::Serve => cmd::serve::run(cfg),
    }

    logging::flush();
}
