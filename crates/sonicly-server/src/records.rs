//! Schema-less record collections on top of the local cache.
//!
//! Every mutation runs under one process-wide lock so concurrent requests for
//! the same user cannot lose each other's read-modify-write.

use std::sync::{Mutex, PoisonError};

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use sonicly_core::UserId;
use sonicly_store::{Collection, LocalCache, Result};

/// A stored JSON object.
pub type Record = Map<String, Value>;

/// Where a new record goes in its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Append (oldest first).
    Back,
    /// Prepend (latest first).
    Front,
}

/// Result of updating or removing a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The change was applied.
    Applied(T),
    /// Nothing was ever stored for this user.
    NoCollection,
    /// The collection exists but has no record with that ID.
    NoRecord,
}

/// Record collections keyed by user.
pub struct RecordStore {
    cache: LocalCache,
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Wrap a cache.
    #[must_use]
    pub fn new(cache: LocalCache) -> Self {
        Self {
            cache,
            write_lock: Mutex::new(()),
        }
    }

    /// A user's records; empty if none were stored.
    pub fn list(&self, collection: Collection, user_id: &UserId) -> Result<Vec<Record>> {
        self.cache.read(collection, user_id)
    }

    /// Insert a record, keeping a caller-supplied `id` or assigning a UUID.
    pub fn insert(
        &self,
        collection: Collection,
        user_id: &UserId,
        mut record: Record,
        placement: Placement,
        stamps: &[&str],
    ) -> Result<Record> {
        ensure_id(&mut record);
        stamp(&mut record, stamps);

        let _guard = self.lock();
        self.cache.modify(collection, user_id, |records: &mut Vec<Record>| {
            match placement {
                Placement::Back => records.push(record.clone()),
                Placement::Front => records.insert(0, record.clone()),
            }
        })?;
        Ok(record)
    }

    /// Shallow-merge `patch` into the record with `id` and stamp `updatedAt`.
    ///
    /// The stored `id` is never overwritten.
    pub fn update(
        &self,
        collection: Collection,
        user_id: &UserId,
        id: &str,
        patch: Record,
    ) -> Result<Outcome<Record>> {
        let _guard = self.lock();
        if !self.cache.contains(collection, user_id)? {
            return Ok(Outcome::NoCollection);
        }

        let mut records: Vec<Record> = self.cache.read(collection, user_id)?;
        let Some(record) = records.iter_mut().find(|r| record_id(r) == Some(id)) else {
            return Ok(Outcome::NoRecord);
        };

        merge(record, patch);
        stamp(record, &["updatedAt"]);
        let updated = record.clone();

        self.cache.write(collection, user_id, &records)?;
        Ok(Outcome::Applied(updated))
    }

    /// Remove the record with `id`. Removing an absent ID is not an error.
    pub fn remove(&self, collection: Collection, user_id: &UserId, id: &str) -> Result<Outcome<()>> {
        let _guard = self.lock();
        if !self.cache.contains(collection, user_id)? {
            return Ok(Outcome::NoCollection);
        }

        self.cache
            .modify(collection, user_id, |records: &mut Vec<Record>| {
                records.retain(|r| record_id(r) != Some(id));
            })?;
        Ok(Outcome::Applied(()))
    }

    /// A user's profile object.
    pub fn profile(&self, user_id: &UserId) -> Result<Option<Record>> {
        self.cache.get(Collection::Users, user_id)
    }

    /// Shallow-merge `patch` into a user's profile and stamp `updatedAt`.
    pub fn save_profile(&self, user_id: &UserId, patch: Record) -> Result<Record> {
        let _guard = self.lock();
        let mut profile = self.profile(user_id)?.unwrap_or_default();
        merge(&mut profile, patch);
        stamp(&mut profile, &["updatedAt"]);
        self.cache.put(Collection::Users, user_id, &profile)?;
        Ok(profile)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// The record's string `id`, if it has one.
#[must_use]
pub fn record_id(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn ensure_id(record: &mut Record) {
    let has_id = record_id(record).is_some_and(|id| !id.is_empty());
    if !has_id {
        record.insert(
            "id".into(),
            Value::String(uuid::Uuid::new_v4().to_string()),
        );
    }
}

fn merge(target: &mut Record, patch: Record) {
    for (key, value) in patch {
        if key != "id" || !target.contains_key("id") {
            target.insert(key, value);
        }
    }
}

fn stamp(record: &mut Record, fields: &[&str]) {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    for field in fields {
        record.insert((*field).to_string(), Value::String(now.clone()));
    }
}
