//! Environment-driven service configuration

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DB_PATH: &str = "vapt.db";
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEV_JWT_SECRET: &str = "sentinel-vapt-dev-secret";

/// Runtime configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub uploads_dir: PathBuf,
    pub jwt_secret: String,
    /// Seed sample data on first run against an empty database
    pub seed: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let bind_addr = env::var("VAPT_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()?;

        let db_path = env::var("VAPT_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));

        let uploads_dir = env::var("VAPT_UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOADS_DIR));

        let jwt_secret = match env::var("VAPT_JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("VAPT_JWT_SECRET not set; using the development signing key");
                DEV_JWT_SECRET.to_string()
            }
        };

        let seed = env::var("VAPT_SEED").map(|v| v != "0").unwrap_or(true);

        Ok(Self {
            bind_addr,
            db_path,
            uploads_dir,
            jwt_secret,
            seed,
        })
    }
}
