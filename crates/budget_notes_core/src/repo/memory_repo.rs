//! In-process document store.

use crate::repo::document_repo::{DocumentRepository, RepoError, RepoResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

type Collections = BTreeMap<String, BTreeMap<String, Value>>;

/// Mutex-guarded map of collections to documents.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    collections: Mutex<Collections>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents stored in one collection.
    pub fn count(&self, collection: &str) -> RepoResult<usize> {
        let guard = self.lock()?;
        Ok(guard.get(collection).map_or(0, BTreeMap::len))
    }

    /// Removes one document, returning whether it existed.
    pub fn remove_document(&self, collection: &str, id: &str) -> RepoResult<bool> {
        let mut guard = self.lock()?;
        Ok(guard
            .get_mut(collection)
            .and_then(|documents| documents.remove(id))
            .is_some())
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Collections>> {
        self.collections
            .lock()
            .map_err(|_| RepoError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

impl DocumentRepository for InMemoryDocumentRepository {
    fn get_document(&self, collection: &str, id: &str) -> RepoResult<Option<Value>> {
        let guard = self.lock()?;
        Ok(guard
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    fn create_document(&self, collection: &str, id: &str, document: &Value) -> RepoResult<()> {
        let mut guard = self.lock()?;
        let documents = guard.entry(collection.to_string()).or_default();
        if documents.contains_key(id) {
            return Err(RepoError::DuplicateId {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        documents.insert(id.to_string(), document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryDocumentRepository;
    use crate::repo::document_repo::{DocumentRepository, RepoError};
    use serde_json::json;

    #[test]
    fn missing_document_is_none() {
        let repo = InMemoryDocumentRepository::new();
        assert_eq!(repo.get_document("budgets", "nope").unwrap(), None);
    }

    #[test]
    fn duplicate_create_is_rejected_and_keeps_original() {
        let repo = InMemoryDocumentRepository::new();
        repo.create_document("budgets", "b-1", &json!({"name": "first"}))
            .unwrap();

        let err = repo
            .create_document("budgets", "b-1", &json!({"name": "second"}))
            .unwrap_err();
        assert!(matches!(err, RepoError::DuplicateId { .. }));

        let stored = repo.get_document("budgets", "b-1").unwrap().unwrap();
        assert_eq!(stored["name"], "first");
        assert_eq!(repo.count("budgets").unwrap(), 1);
    }

    #[test]
    fn same_id_in_different_collections_is_allowed() {
        let repo = InMemoryDocumentRepository::new();
        repo.create_document("budgets/a/notes", "n-1", &json!({}))
            .unwrap();
        repo.create_document("budgets/b/notes", "n-1", &json!({}))
            .unwrap();
        assert!(repo.remove_document("budgets/a/notes", "n-1").unwrap());
        assert!(!repo.remove_document("budgets/a/notes", "n-1").unwrap());
    }
}
