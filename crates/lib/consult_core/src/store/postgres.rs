//! PostgreSQL message store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};
use tracing::{info, warn};
use uuid::Uuid;

use super::{MessageStore, StoreError};
use crate::models::message::{Message, NewMessage};
use crate::uuid::message_id;

/// Schema migrations embedded from `consult_core/migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Newest first. `created_at` comes from `clock_timestamp()`, so concurrent
/// inserts can commit with `seq` and `created_at` in different orders; sorting
/// on `created_at` keeps the result non-increasing by timestamp and `seq`
/// breaks ties between equal timestamps.
const RECENT_SQL: &str = r#"
    SELECT id, author, body, kind, created_at
    FROM messages
    ORDER BY created_at DESC, seq DESC
    LIMIT $1
"#;

/// Row returned by message queries.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRow {
    pub id: Uuid,
    pub author: String,
    pub body: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        let kind = row.kind.parse().unwrap_or_else(|e| {
            warn!(id = %row.id, "{e}; treating as user message");
            Default::default()
        });
        Message {
            id: row.id,
            author: row.author,
            body: row.body,
            timestamp: row.created_at,
            kind,
        }
    }
}

/// Message store backed by the `messages` table.
#[derive(Debug, Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Bring the `messages` schema up to date, then wrap the pool.
    pub async fn migrated(pool: PgPool) -> Result<Self, MigrateError> {
        MIGRATOR.run(&pool).await?;
        info!(migrations = MIGRATOR.iter().count(), "message schema up to date");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn append(&self, message: NewMessage) -> Result<Message, StoreError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (id, author, body, kind)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author, body, kind, created_at
            "#,
        )
        .bind(message_id())
        .bind(&message.author)
        .bind(&message.body)
        .bind(message.kind.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query_as::<_, MessageRow>(RECENT_SQL)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await?;
        Ok(total.max(0) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::message::MessageKind;

    #[test]
    fn row_with_unknown_kind_falls_back_to_user() {
        let row = MessageRow {
            id: message_id(),
            author: "alice".into(),
            body: "hi".into(),
            kind: "robot".into(),
            created_at: Utc::now(),
        };
        let msg = Message::from(row);
        assert_eq!(msg.kind, MessageKind::User);
    }

    #[test]
    fn embedded_migrations_include_recent_index() {
        let versions: Vec<i64> = MIGRATOR.iter().map(|m| m.version).collect();
        assert_eq!(versions, vec![1, 2]);
        assert!(
            MIGRATOR
                .iter()
                .any(|m| m.sql.contains("(created_at DESC, seq DESC)"))
        );
    }

    #[test]
    fn recent_orders_by_timestamp_then_insertion() {
        assert!(RECENT_SQL.contains("ORDER BY created_at DESC, seq DESC"));
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn append_and_read_back_against_postgres() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
        let pool = PgPool::connect(&url).await.expect("connect");
        let store = PgMessageStore::migrated(pool).await.expect("migrate");

        let before = store.count().await.unwrap();
        let user = store
            .append(NewMessage::user("alice", "What is my runway?"))
            .await
            .unwrap();
        let agent = store
            .append(NewMessage::agent("Let's break this down into actionable steps."))
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), before + 2);
        let recent = store.recent(2).await.unwrap();
        assert_eq!(recent, vec![agent, user]);
        assert!(recent[0].timestamp >= recent[1].timestamp);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn concurrent_appends_read_back_non_increasing() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
        let pool = PgPool::connect(&url).await.expect("connect");
        let store = std::sync::Arc::new(PgMessageStore::migrated(pool).await.expect("migrate"));

        let writers: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .append(NewMessage::user(format!("writer-{i}"), "tick"))
                        .await
                        .unwrap()
                })
            })
            .collect();
        for w in writers {
            w.await.unwrap();
        }

        let recent = store.recent(16).await.unwrap();
        assert_eq!(recent.len(), 16);
        assert!(recent.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }
}
