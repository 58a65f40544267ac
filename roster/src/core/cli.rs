use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{
    DEFAULT_SEARCH_LIMIT, ENV_CONFIG, ENV_DB_MAX_CONNECTIONS, ENV_DB_PATH, ENV_DEBUG,
    ENV_IN_MEMORY,
};

#[derive(Parser)]
#[command(name = "roster")]
#[command(version, about = "Member and team roster", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug mode (debug logging including SQL statements, unless ROSTER_LOG or RUST_LOG is set)
    #[arg(long, global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database file
    #[arg(long, global = true, env = ENV_DB_PATH)]
    pub db_path: Option<PathBuf>,

    /// Use a throwaway in-memory database (seeded automatically)
    #[arg(
        long,
        global = true,
        env = ENV_IN_MEMORY,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub in_memory: Option<bool>,

    /// Maximum number of pooled connections
    #[arg(long, global = true, env = ENV_DB_MAX_CONNECTIONS)]
    pub max_connections: Option<u32>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Insert sample teams and members into an empty database
    Seed,
    /// Search members; omitted criteria match everyone
    Search(SearchArgs),
    /// Age statistics over all members and per team
    Stats,
    /// Average age per team
    Teams {
        /// Only teams whose name starts with this prefix
        #[arg(long)]
        prefix: Option<String>,
    },
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct SearchArgs {
    /// Exact username
    #[arg(long)]
    pub username: Option<String>,

    /// Exact team name
    #[arg(long)]
    pub team: Option<String>,

    /// Minimum age (inclusive)
    #[arg(long)]
    pub age_goe: Option<i32>,

    /// Maximum age (inclusive)
    #[arg(long)]
    pub age_loe: Option<i32>,

    /// Condition as JSON, e.g. '{"teamName":"teamB","ageGoe":35}'.
    /// Explicit flags take precedence over fields in the JSON.
    #[arg(long)]
    pub condition: Option<String>,

    /// Sort keys: field[:asc|desc][:nulls_first|nulls_last], e.g. age:desc
    #[arg(long = "sort", value_name = "KEY")]
    pub sort: Vec<String>,

    /// Rows to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Maximum rows to return
    #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
    pub limit: u32,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
    pub in_memory: Option<bool>,
    pub max_connections: Option<u32>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        debug: cli.debug,
        config: cli.config,
        db_path: cli.db_path,
        in_memory: cli.in_memory,
        max_connections: cli.max_connections,
    };
    (config, cli.command)
}
