//! Record store backed by Spin's SQLite.
//!
//! Group content is stored as a JSON payload; identity, shop, activity and
//! timestamps live in their own columns so listing never has to trust the
//! payload for them.

use crate::{params, Db, RecordStore, Row, StoreError};
use async_trait::async_trait;
use bundle_commerce::{GroupId, OfferGroup, ShopId};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::sync::Mutex;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS offer_groups (
    shop TEXT NOT NULL,
    id TEXT NOT NULL,
    active INTEGER NOT NULL,
    payload TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (shop, id)
)";

/// SQLite record store. Opens a connection per call.
pub struct SqliteRecordStore {
    database: Option<String>,
    last_stamp: Mutex<Option<DateTime<Utc>>>,
}

impl SqliteRecordStore {
    /// Use the default database, creating the table if needed.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::init(None)
    }

    /// Use a named database, creating the table if needed.
    pub fn open(name: &str) -> Result<Self, StoreError> {
        Self::init(Some(name.to_string()))
    }

    fn init(database: Option<String>) -> Result<Self, StoreError> {
        let store = Self {
            database,
            last_stamp: Mutex::new(None),
        };
        store.db()?.execute(SCHEMA, params![])?;
        Ok(store)
    }

    fn db(&self) -> Result<Db, StoreError> {
        match &self.database {
            Some(name) => Db::open(name),
            None => Db::open_default(),
        }
    }

    fn stamp(&self) -> Result<DateTime<Utc>, StoreError> {
        let mut last = self
            .last_stamp
            .lock()
            .map_err(|_| StoreError::Unavailable("stamp lock poisoned".to_string()))?;
        let now = Utc::now();
        let stamp = match *last {
            Some(prev) if now <= prev => prev + Duration::microseconds(1),
            _ => now,
        };
        *last = Some(stamp);
        Ok(stamp)
    }

    fn existing(&self, db: &Db, shop: &ShopId, id: &GroupId) -> Result<Row, StoreError> {
        db.query(
            "SELECT created_at FROM offer_groups WHERE shop = ? AND id = ?",
            params![shop.as_str(), id.as_str()],
        )?
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::not_found(shop, id))
    }
}

fn format_stamp(stamp: DateTime<Utc>) -> String {
    stamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_stamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Serialization(format!("bad timestamp {}: {}", raw, e)))
}

fn payload(group: &OfferGroup) -> Result<String, StoreError> {
    let mut content = group.content();
    content.id = None;
    Ok(serde_json::to_string(&content)?)
}

fn group_from_row(row: &Row) -> Result<OfferGroup, StoreError> {
    let mut group: OfferGroup = serde_json::from_str(row.text("payload")?)?;
    group.id = Some(GroupId::new(row.text("id")?));
    group.created_at = Some(parse_stamp(row.text("created_at")?)?);
    group.updated_at = Some(parse_stamp(row.text("updated_at")?)?);
    Ok(group)
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn list(&self, shop: &ShopId) -> Result<Vec<OfferGroup>, StoreError> {
        self.db()?
            .query(
                "SELECT id, payload, created_at, updated_at FROM offer_groups
                 WHERE shop = ? ORDER BY created_at, id",
                params![shop.as_str()],
            )?
            .iter()
            .map(group_from_row)
            .collect()
    }

    async fn create(&self, shop: &ShopId, group: &OfferGroup) -> Result<OfferGroup, StoreError> {
        let db = self.db()?;
        let stamp = self.stamp()?;
        let id = GroupId::generate();

        db.execute(
            "INSERT INTO offer_groups (shop, id, active, payload, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                shop.as_str(),
                id.as_str(),
                group.active,
                payload(group)?,
                format_stamp(stamp),
                format_stamp(stamp)
            ],
        )?;
        tracing::debug!(shop = %shop, id = %id, "offer group created");

        let mut persisted = group.content();
        persisted.id = Some(id);
        persisted.created_at = Some(stamp);
        persisted.updated_at = Some(stamp);
        Ok(persisted)
    }

    async fn update(
        &self,
        shop: &ShopId,
        id: &GroupId,
        group: &OfferGroup,
    ) -> Result<OfferGroup, StoreError> {
        let db = self.db()?;
        let created_at = parse_stamp(self.existing(&db, shop, id)?.text("created_at")?)?;
        let stamp = self.stamp()?;

        db.execute(
            "UPDATE offer_groups SET active = ?, payload = ?, updated_at = ?
             WHERE shop = ? AND id = ?",
            params![
                group.active,
                payload(group)?,
                format_stamp(stamp),
                shop.as_str(),
                id.as_str()
            ],
        )?;
        tracing::debug!(shop = %shop, id = %id, "offer group updated");

        let mut persisted = group.content();
        persisted.id = Some(id.clone());
        persisted.created_at = Some(created_at);
        persisted.updated_at = Some(stamp);
        Ok(persisted)
    }

    async fn delete(&self, shop: &ShopId, id: &GroupId) -> Result<(), StoreError> {
        let db = self.db()?;
        self.existing(&db, shop, id)?;
        db.execute(
            "DELETE FROM offer_groups WHERE shop = ? AND id = ?",
            params![shop.as_str(), id.as_str()],
        )?;
        tracing::debug!(shop = %shop, id = %id, "offer group deleted");
        Ok(())
    }
}
