// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "Roster";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "roster";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".roster";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "roster.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "ROSTER_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "ROSTER_DEBUG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "ROSTER_LOG";

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "ROSTER_DATA_DIR";

/// Environment variable for the database file path
pub const ENV_DB_PATH: &str = "ROSTER_DB_PATH";

/// Environment variable to use a throwaway in-memory database
pub const ENV_IN_MEMORY: &str = "ROSTER_IN_MEMORY";

/// Environment variable for the connection pool size
pub const ENV_DB_MAX_CONNECTIONS: &str = "ROSTER_DB_MAX_CONNECTIONS";

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "roster.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite cache size (negative = KB, so -16000 = 16MB)
pub const SQLITE_CACHE_SIZE: &str = "-16000";

// =============================================================================
// Search Defaults
// =============================================================================

/// Page size used by `roster search` when `--limit` is omitted
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Upper bound on `--limit`
pub const MAX_SEARCH_LIMIT: u32 = 1000;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit status for runtime failures
pub const EXIT_FAILURE: i32 = 1;

/// Exit status for rejected input (bad condition, sort key or non-unique result)
pub const EXIT_INVALID_INPUT: i32 = 2;
