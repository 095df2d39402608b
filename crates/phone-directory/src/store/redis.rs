//! Networked key-value store backend.

use crate::config::StoreConfig;
use crate::directory::PhoneKey;
use crate::error::DirectoryError;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, info};

/// Store backend over a single long-lived connection to the key-value store.
///
/// The connection manager multiplexes every request over one connection and
/// is cheap to clone per command; it is the only process-wide handle the
/// service holds.
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Open the store connection described by the configuration.
    pub async fn connect(config: &StoreConfig) -> Result<Self, DirectoryError> {
        let url = format!("redis://{}:{}/{}", config.host, config.port, config.db);
        info!(
            host = %config.host,
            port = config.port,
            db = config.db,
            "Connecting to key-value store"
        );

        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn })
    }

    pub async fn get(&self, key: &PhoneKey) -> Result<Option<String>, DirectoryError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key.as_str()).await?;
        Ok(value)
    }

    pub async fn set_if_absent(
        &self,
        key: &PhoneKey,
        value: &str,
    ) -> Result<bool, DirectoryError> {
        let mut conn = self.conn.clone();
        // SET .. NX replies OK on a fresh write, nil when the key exists
        let reply: Option<String> = redis::cmd("SET")
            .arg(key.as_str())
            .arg(value)
            .arg("NX")
            .query_async(&mut conn)
            .await?;
        Ok(reply.is_some())
    }

    pub async fn set_if_exists(
        &self,
        key: &PhoneKey,
        value: &str,
    ) -> Result<bool, DirectoryError> {
        let mut conn = self.conn.clone();
        // SET .. XX replies OK on overwrite, nil when the key is absent
        let reply: Option<String> = redis::cmd("SET")
            .arg(key.as_str())
            .arg(value)
            .arg("XX")
            .query_async(&mut conn)
            .await?;
        Ok(reply.is_some())
    }

    pub async fn delete(&self, key: &PhoneKey) -> Result<bool, DirectoryError> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(key.as_str()).await?;
        Ok(removed > 0)
    }

    pub async fn ping(&self) -> bool {
        let mut conn = self.conn.clone();
        let reply: Result<String, redis::RedisError> =
            redis::cmd("PING").query_async(&mut conn).await;
        match reply {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Store ping failed");
                false
            }
        }
    }
}
