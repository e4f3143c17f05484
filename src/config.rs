use std::{env, net::SocketAddr};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string. Without one the service keeps products in memory.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Single origin allowed by CORS; any origin when unset.
    pub cors_allow_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);
        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse::<u32>().ok())
            .unwrap_or(5);
        let cors_allow_origin = env::var("CORS_ALLOW_ORIGIN").ok().filter(|o| !o.is_empty());
        Ok(Self {
            port,
            database_url,
            host,
            max_connections,
            cors_allow_origin,
        })
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(SocketAddr::from((
            self.host.parse::<std::net::IpAddr>()?,
            self.port,
        )))
    }
}
