pub mod check_db;
pub mod serve;

use clap::Args;

use custapi_server::DatabaseConfig;

/// Database connection flags shared by `serve` and `check-db`.
///
/// Each flag also reads an environment variable; both override the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct DatabaseArgs {
    /// Full connection URL (takes precedence over the discrete fields)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "CUSTAPI_DB_HOST")]
    pub db_host: Option<String>,

    /// Database port
    #[arg(long, env = "CUSTAPI_DB_PORT")]
    pub db_port: Option<u16>,

    /// Database user
    #[arg(long, env = "CUSTAPI_DB_USER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = "CUSTAPI_DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Schema name
    #[arg(long, env = "CUSTAPI_DB_NAME")]
    pub db_name: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "CUSTAPI_POOL_SIZE", value_parser = clap::value_parser!(u32).range(1..))]
    pub pool_size: Option<u32>,

    /// Seconds to wait for a free connection
    #[arg(long)]
    pub acquire_timeout: Option<u64>,
}

impl DatabaseArgs {
    /// Overlay whatever was given on top of `config`.
    pub fn apply(&self, config: &mut DatabaseConfig) {
        if let Some(url) = &self.database_url {
            config.url = Some(url.clone());
        }
        if let Some(host) = &self.db_host {
            config.host = host.clone();
        }
        if let Some(port) = self.db_port {
            config.port = port;
        }
        if let Some(user) = &self.db_user {
            config.user = user.clone();
        }
        if let Some(password) = &self.db_password {
            config.password = password.clone();
        }
        if let Some(name) = &self.db_name {
            config.database = name.clone();
        }
        if let Some(size) = self.pool_size {
            config.pool.max_connections = size;
        }
        if let Some(secs) = self.acquire_timeout {
            config.pool.acquire_timeout_secs = secs;
        }
    }
}
