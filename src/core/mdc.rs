//! Mapped diagnostic context
//!
//! Every [`Logger`](crate::Logger) owns exactly one [`Mdc`]. Its entries are
//! copied into each record the logger emits, so later mutations never reach
//! records that were already built.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Owned copy of an MDC taken at emission time
pub type MdcSnapshot = HashMap<String, String>;

/// Thread-safe key/value store attached to a single logger.
///
/// # Example
///
/// ```
/// use mdc_logger::core::Mdc;
///
/// let mdc = Mdc::new();
/// mdc.add("request_id", "abc-123");
/// assert_eq!(mdc.get("request_id").as_deref(), Some("abc-123"));
///
/// mdc.remove("request_id");
/// assert_eq!(mdc.get("request_id"), None);
/// ```
#[derive(Debug, Default)]
pub struct Mdc {
    entries: RwLock<HashMap<String, String>>,
}

impl Mdc {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a value, overwriting any previous value for `key`
    pub fn add<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.entries.write().insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    /// Remove `key`; absent keys are ignored
    pub fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Independent copy of the current entries, taken under a single read lock
    pub fn snapshot(&self) -> MdcSnapshot {
        self.entries.read().clone()
    }

    /// Insert several entries under one write lock
    pub(crate) fn extend<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.entries.write().extend(entries);
    }
}
