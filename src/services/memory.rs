//! In-memory result store for embedded use and tests

use std::collections::HashMap;
use std::sync::RwLock;

use super::{ResultStore, ServiceError};
use crate::summary::PensionRecord;

fn lock_err(context: &'static str) -> ServiceError {
    ServiceError::Unavailable(format!("poisoned lock: {context}"))
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<String, PensionRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, ServiceError> {
        let records = self.records.read().map_err(|_| lock_err("len"))?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool, ServiceError> {
        Ok(self.len()? == 0)
    }
}

impl ResultStore for InMemoryStore {
    fn save(&self, record: PensionRecord) -> Result<(), ServiceError> {
        let mut records = self.records.write().map_err(|_| lock_err("save"))?;
        records.insert(record.session_id.clone(), record);
        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<PensionRecord>, ServiceError> {
        let records = self.records.read().map_err(|_| lock_err("load"))?;
        Ok(records.get(session_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::tests::sample_record;

    #[test]
    fn test_save_and_load() {
        let store = InMemoryStore::new();
        assert!(store.is_empty().unwrap());

        store.save(sample_record("abc")).unwrap();

        let loaded = store.load("abc").unwrap().unwrap();
        assert_eq!(loaded.session_id, "abc");
        assert!(store.load("missing").unwrap().is_none());
    }

    #[test]
    fn test_save_replaces_same_session() {
        let store = InMemoryStore::new();

        let mut first = sample_record("abc");
        first.metadata.name = "first".to_string();
        let mut second = sample_record("abc");
        second.metadata.name = "second".to_string();

        store.save(first).unwrap();
        store.save(second).unwrap();

        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.load("abc").unwrap().unwrap().metadata.name, "second");
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let store = InMemoryStore::new();
        store.save(sample_record("abc")).unwrap();

        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.records.write().unwrap();
            panic!("writer died");
        }));
        assert!(poisoned.is_err());

        assert!(matches!(store.len(), Err(ServiceError::Unavailable(_))));
        assert!(store.is_empty().is_err());
        assert!(matches!(store.load("abc"), Err(ServiceError::Unavailable(_))));
    }
}
