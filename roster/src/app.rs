//! Core application

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::cli::{self, Commands, SearchArgs};
use crate::core::config::AppConfig;
use crate::core::constants::{
    APP_NAME_LOWER, ENV_LOG, EXIT_FAILURE, EXIT_INVALID_INPUT, MAX_SEARCH_LIMIT,
};
use crate::core::storage::AppStorage;
use crate::data::filters::{FilterError, MemberSearchCondition, OrderSpec, Page};
use crate::data::types::{AgeSummary, MemberRow, MemberTeamDto, TeamAgeAverage};
use crate::data::{DataError, RosterRepository, SqliteService};

pub struct CoreApp {
    pub config: AppConfig,
    pub storage: AppStorage,
    pub database: Arc<SqliteService>,
}

/// One page of search results
#[derive(Debug, Serialize)]
struct SearchOutput {
    total: i64,
    offset: u32,
    limit: u32,
    rows: Vec<MemberTeamDto>,
}

#[derive(Debug, Serialize)]
struct StatsOutput {
    summary: AgeSummary,
    teams: Vec<TeamAgeAverage>,
    oldest: Vec<MemberRow>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();

        let (cli_config, command) = cli::parse();
        let config = AppConfig::load(&cli_config)?;

        Self::init_logging(config.debug);
        config.warn_unknown_fields();

        tracing::debug!("Application starting");
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::init(config).await?;
        let result = app.execute(command).await;
        app.database.close().await;
        result
    }

    /// Process exit status for a failed run
    ///
    /// Rejected conditions, sort keys and non-unique results exit with
    /// `EXIT_INVALID_INPUT`; everything else with `EXIT_FAILURE`.
    pub fn exit_code(err: &anyhow::Error) -> i32 {
        let invalid_input = err
            .downcast_ref::<DataError>()
            .is_some_and(DataError::is_invalid_input)
            || err.downcast_ref::<FilterError>().is_some();
        if invalid_input {
            EXIT_INVALID_INPUT
        } else {
            EXIT_FAILURE
        }
    }

    async fn init(config: AppConfig) -> Result<Self> {
        let storage = AppStorage::init(&config).await?;

        let database = Arc::new(
            SqliteService::init(&config.database, &storage)
                .await
                .context("Failed to initialize database")?,
        );

        if config.debug {
            tracing::warn!(
                data_dir = %storage.data_dir().display(),
                in_memory = config.database.in_memory,
                "Debug mode enabled"
            );
        }

        let app = Self {
            config,
            storage,
            database,
        };

        // A fresh in-memory database has nothing to query otherwise
        if app.config.database.in_memory {
            app.repository().seed_sample_data().await?;
        }

        Ok(app)
    }

    fn repository(&self) -> &dyn RosterRepository {
        &self.database
    }

    async fn execute(&self, command: Option<Commands>) -> Result<()> {
        match command {
            Some(Commands::Seed) => {
                if self.repository().seed_sample_data().await? {
                    println!("Seeded sample teams and members.");
                } else {
                    println!("Database already has members; nothing seeded.");
                }
                Ok(())
            }
            Some(Commands::Search(args)) => print_json(&self.search(&args).await?),
            Some(Commands::Teams { prefix }) => {
                let teams = self
                    .repository()
                    .team_age_averages(prefix.as_deref())
                    .await?;
                print_json(&teams)
            }
            Some(Commands::Stats) | None => print_json(&self.stats().await?),
        }
    }

    async fn search(&self, args: &SearchArgs) -> Result<SearchOutput> {
        let condition = search_condition(args)?;
        let order = sort_keys(&args.sort)?;
        if condition.is_empty() {
            tracing::debug!("No search criteria, matching every member");
        }

        let limit = args.limit.min(MAX_SEARCH_LIMIT);
        if limit < args.limit {
            tracing::warn!(
                requested = args.limit,
                limit,
                "Search limit capped"
            );
        }

        tracing::debug!(condition = ?condition, order = ?order, "Searching members");
        let (rows, total) = self
            .repository()
            .search_page(&condition, &order, Page::new(args.offset, limit))
            .await?;

        Ok(SearchOutput {
            total,
            offset: args.offset,
            limit,
            rows,
        })
    }

    async fn stats(&self) -> Result<StatsOutput> {
        let repository = self.repository();
        Ok(StatsOutput {
            summary: repository.age_summary().await?,
            teams: repository.team_age_averages(None).await?,
            oldest: repository.find_oldest_members().await?,
        })
    }

    fn init_logging(debug: bool) {
        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| default_log_filter(debug));

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}

/// Log filter used when neither `ROSTER_LOG` nor `RUST_LOG` is set
///
/// Debug mode also surfaces the SQL statements sqlx logs at trace level.
fn default_log_filter(debug: bool) -> String {
    if debug {
        format!("debug,{}=debug,sqlx=trace", APP_NAME_LOWER)
    } else {
        format!("info,{}=info", APP_NAME_LOWER)
    }
}

/// Merge the explicit flags with `--condition`; flags win per field
fn search_condition(args: &SearchArgs) -> Result<MemberSearchCondition> {
    let flags = MemberSearchCondition {
        username: args.username.clone(),
        team_name: args.team.clone(),
        age_goe: args.age_goe,
        age_loe: args.age_loe,
    };

    match &args.condition {
        Some(json) => {
            let parsed =
                MemberSearchCondition::from_json(json).context("Invalid --condition JSON")?;
            Ok(flags.or(parsed))
        }
        None => Ok(flags),
    }
}

fn sort_keys(keys: &[String]) -> Result<Vec<OrderSpec>> {
    keys.iter()
        .map(|key| OrderSpec::parse(key).with_context(|| format!("Invalid sort key: {}", key)))
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
