//! Shared Constants

/// Key under which the selected client id is persisted
pub const SELECTED_CLIENT_KEY: &str = "selectedClientId";

/// Default remote table holding client records
pub const DEFAULT_CLIENTS_TABLE: &str = "clients";

/// Columns the collection is ordered by (descending)
pub const CREATED_AT_COLUMN: &str = "created_at";
pub const ID_COLUMN: &str = "id";

/// PostgREST default `max-rows` on Supabase
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// HTTP request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of body characters kept in remote error messages
pub const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Project directory identifiers
pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "client-context";
pub const APP_NAME: &str = "client-context";

/// File names inside the project directories
pub const CONFIG_FILE_NAME: &str = "client-context.toml";
pub const KV_FILE_NAME: &str = "local-storage.json";
