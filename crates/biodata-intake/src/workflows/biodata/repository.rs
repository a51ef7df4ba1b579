use serde::{Deserialize, Serialize};

use super::domain::Application;
use super::subscription::{Listener, Subscription};

/// Key assigned by the store when an application is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationKey(pub String);

impl ApplicationKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApplicationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted application paired with its store key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredApplication {
    pub key: ApplicationKey,
    #[serde(flatten)]
    pub application: Application,
}

/// One delivery of a collection subscription: the full current contents, or the failure.
pub type SnapshotEvent = Result<Vec<StoredApplication>, StoreError>;

/// Document store holding submitted applications.
///
/// `subscribe` delivers the full collection once promptly and again after every change, until
/// the returned [`Subscription`] is cancelled.
pub trait ApplicationStore: Send + Sync {
    fn create(
        &self,
        collection: &str,
        application: &Application,
    ) -> Result<ApplicationKey, StoreError>;

    fn subscribe(&self, collection: &str, listener: Listener<SnapshotEvent>) -> Subscription;
}

/// Error enumeration for store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store rejected the write: {0}")]
    Rejected(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
