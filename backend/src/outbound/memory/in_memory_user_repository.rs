//! In-memory `UserRepository` keeping each user and their log as one document.
//!
//! All documents sit behind a single `tokio::sync::RwLock`. Appends take the
//! write lock, so each append is atomic and visible to the next read.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Exercise, LogQuery, LogView, User, UserId, Username};

#[derive(Debug)]
struct Document {
    user: User,
    log: Vec<Exercise>,
}

#[derive(Debug, Default)]
struct Store {
    documents: Vec<Document>,
    by_id: HashMap<UserId, usize>,
    usernames: HashSet<Username>,
}

impl Store {
    fn document_mut(&mut self, user_id: &UserId) -> Option<&mut Document> {
        let index = *self.by_id.get(user_id)?;
        self.documents.get_mut(index)
    }

    fn document(&self, user_id: &UserId) -> Option<&Document> {
        let index = *self.by_id.get(user_id)?;
        self.documents.get(index)
    }
}

/// Shared, cloneable in-memory repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut store = self.store.write().await;
        if store.usernames.contains(user.username()) {
            return Err(UserPersistenceError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        if store.by_id.contains_key(user.id()) {
            return Err(UserPersistenceError::query(format!(
                "user id already exists: {}",
                user.id()
            )));
        }

        let index = store.documents.len();
        store.usernames.insert(user.username().clone());
        store.by_id.insert(user.id().clone(), index);
        store.documents.push(Document {
            user: user.clone(),
            log: Vec::new(),
        });
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let store = self.store.read().await;
        Ok(store
            .documents
            .iter()
            .map(|document| document.user.clone())
            .collect())
    }

    async fn append_exercise(
        &self,
        user_id: &UserId,
        exercise: &Exercise,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut store = self.store.write().await;
        Ok(store.document_mut(user_id).map(|document| {
            document.log.push(exercise.clone());
            document.user.clone()
        }))
    }

    async fn find_log(&self, query: &LogQuery) -> Result<Option<LogView>, UserPersistenceError> {
        let store = self.store.read().await;
        Ok(store
            .document(query.user_id())
            .map(|document| LogView::new(document.user.clone(), query.select(&document.log))))
    }
}
