//! Built-in item processors
//!
//! - `require-fields`: reports items missing any of the configured fields
//! - `fingerprint`: adds a SHA-256 `fingerprint` of the item's content
//! - `timestamp`: adds an RFC 3339 `processed_at` field
//!
//! [`ItemSink`] is not configurable by name; callers append its processor
//! to keep the items that reach the end of a chain.

use crate::data::Item;
use crate::pipeline::ProcessItem;
use crate::CrawlError;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Field written by [`fingerprint`]
pub const FINGERPRINT_FIELD: &str = "fingerprint";

/// Field written by [`timestamp`]
pub const PROCESSED_AT_FIELD: &str = "processed_at";

/// Looks up a built-in processor by its configuration name
///
/// `required_fields` is only used by `require-fields`.
pub fn processor_by_name(name: &str, required_fields: &[String]) -> Option<ProcessItem> {
    match name {
        "require-fields" => Some(require_fields(required_fields.to_vec())),
        "fingerprint" => Some(fingerprint()),
        "timestamp" => Some(timestamp()),
        _ => None,
    }
}

/// Reports an error naming every field in `fields` that the item lacks
///
/// Never replaces the item.
pub fn require_fields(fields: Vec<String>) -> ProcessItem {
    Arc::new(move |item: &Item| -> (Option<Item>, Option<CrawlError>) {
        let missing: Vec<&str> = fields
            .iter()
            .filter(|field| !item.contains(field))
            .map(String::as_str)
            .collect();

        if missing.is_empty() {
            (None, None)
        } else {
            let message = format!("item is missing fields: {}", missing.join(", "));
            (None, Some(CrawlError::pipeline(message)))
        }
    })
}

/// Adds a hex SHA-256 digest of the item's other fields
///
/// Fields are hashed in key order, so equal content yields equal digests.
pub fn fingerprint() -> ProcessItem {
    Arc::new(|item: &Item| -> (Option<Item>, Option<CrawlError>) {
        let mut fields = item.fields().clone();
        fields.remove(FINGERPRINT_FIELD);

        match serde_json::to_vec(&fields) {
            Ok(bytes) => {
                let digest = hex::encode(Sha256::digest(&bytes));
                (Some(item.with_field(FINGERPRINT_FIELD, digest)), None)
            }
            Err(e) => (
                None,
                Some(CrawlError::pipeline(format!("failed to fingerprint item: {}", e))),
            ),
        }
    })
}

/// Stamps the item with the current UTC time
pub fn timestamp() -> ProcessItem {
    Arc::new(|item: &Item| -> (Option<Item>, Option<CrawlError>) {
        let now = Utc::now().to_rfc3339();
        (Some(item.with_field(PROCESSED_AT_FIELD, now)), None)
    })
}

/// Collects every item that reaches it
///
/// Clones share one store, so a sink can hand out its processor to a
/// pipeline and still be read from afterwards.
#[derive(Debug, Clone, Default)]
pub struct ItemSink {
    items: Arc<Mutex<Vec<Item>>>,
}

impl ItemSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a processor that records the item it receives
    ///
    /// The processor never replaces the item and never fails, so it is
    /// meant to run last.
    pub fn processor(&self) -> ProcessItem {
        let items = Arc::clone(&self.items);
        Arc::new(move |item: &Item| -> (Option<Item>, Option<CrawlError>) {
            lock(&items).push(item.clone());
            (None, None)
        })
    }

    /// Number of items recorded so far
    pub fn len(&self) -> usize {
        lock(&self.items).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns the recorded items in arrival order
    pub fn drain(&self) -> Vec<Item> {
        std::mem::take(&mut *lock(&self.items))
    }
}

// Push and take never leave the list partially updated, so poison is ignored
fn lock(items: &Mutex<Vec<Item>>) -> MutexGuard<'_, Vec<Item>> {
    items.lock().unwrap_or_else(PoisonError::into_inner)
}
