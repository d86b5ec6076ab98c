use clap::Parser;

/// Server settings, from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Battleline game server", long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8080")]
    pub bind: String,
    /// HTTP worker threads
    #[arg(long, env = "WORKERS", default_value_t = 4)]
    pub workers: usize,
    /// Inbound queue capacity per session
    #[arg(long, env = "SESSION_QUEUE", default_value_t = 32)]
    pub queue: usize,
    /// Domain attribute for credential cookies
    #[arg(long, env = "COOKIE_DOMAIN")]
    pub cookie_domain: Option<String>,
    /// Lifetime of credential cookies, in hours
    #[arg(long, env = "COOKIE_HOURS", default_value_t = 5)]
    pub cookie_hours: i64,
    /// Terminal log level; the log file always records debug
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: log::LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: String::from("127.0.0.1:8080"),
            workers: 4,
            queue: 32,
            cookie_domain: None,
            cookie_hours: 5,
            log_level: log::LevelFilter::Info,
        }
    }
}
