use biodata_intake::error::AppError;
use biodata_intake::workflows::biodata::export::Artifact;
use biodata_intake::workflows::biodata::{
    Application, ApplicationKey, ApplicationStore, AuthError, Identity, IdentityProvider,
    Listener, ListenerRegistry, SnapshotEvent, StoreError, StoredApplication, Subscription,
};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};
use uuid::Uuid;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Document store that keeps every collection in memory and pushes full snapshots.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationStore {
    collections: Arc<Mutex<HashMap<String, Vec<StoredApplication>>>>,
    listeners: Arc<Mutex<HashMap<String, ListenerRegistry<SnapshotEvent>>>>,
}

impl InMemoryApplicationStore {
    fn registry(&self, collection: &str) -> ListenerRegistry<SnapshotEvent> {
        lock(&self.listeners)
            .entry(collection.to_string())
            .or_default()
            .clone()
    }

    fn snapshot(&self, collection: &str) -> Vec<StoredApplication> {
        lock(&self.collections)
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

impl ApplicationStore for InMemoryApplicationStore {
    fn create(
        &self,
        collection: &str,
        application: &Application,
    ) -> Result<ApplicationKey, StoreError> {
        let key = ApplicationKey(Uuid::new_v4().simple().to_string());
        let snapshot = {
            let mut guard = lock(&self.collections);
            let records = guard.entry(collection.to_string()).or_default();
            records.push(StoredApplication {
                key: key.clone(),
                application: application.clone(),
            });
            records.clone()
        };

        let delivered = self.registry(collection).notify(&Ok(snapshot));
        debug!(%key, collection, delivered, "document created");
        Ok(key)
    }

    fn subscribe(&self, collection: &str, listener: Listener<SnapshotEvent>) -> Subscription {
        let current = self.snapshot(collection);
        self.registry(collection)
            .register_and_prime(listener, &Ok(current))
    }
}

/// Email/password accounts held in memory.
#[derive(Default)]
pub(crate) struct InMemoryIdentityProvider {
    accounts: Mutex<HashMap<String, String>>,
    current: Mutex<Option<Identity>>,
    listeners: ListenerRegistry<Option<Identity>>,
}

impl InMemoryIdentityProvider {
    pub(crate) fn with_account(self, email: &str, password: &str) -> Self {
        lock(&self.accounts).insert(email.to_ascii_lowercase(), password.to_string());
        self
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    fn sign_in(&self, email: &str, secret: &str) -> Result<Identity, AuthError> {
        let email = email.trim().to_ascii_lowercase();
        let known = lock(&self.accounts)
            .get(&email)
            .is_some_and(|password| password == secret);
        if !known {
            return Err(AuthError::InvalidCredentials);
        }

        let identity = Identity::new(Uuid::new_v4().simple().to_string(), Some(&email));
        *lock(&self.current) = Some(identity.clone());
        self.listeners.notify(&Some(identity.clone()));
        Ok(identity)
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        *lock(&self.current) = None;
        self.listeners.notify(&None);
        Ok(())
    }

    fn subscribe(&self, listener: Listener<Option<Identity>>) -> Subscription {
        let current = lock(&self.current).clone();
        self.listeners.register_and_prime(listener, &current)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn load_application(path: &Path) -> Result<Application, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn load_applications(path: &Path) -> Result<Vec<Application>, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn write_artifact(dir: &Path, artifact: &Artifact) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&artifact.file_name);
    fs::write(&path, &artifact.bytes)?;
    info!(path = %path.display(), media_type = artifact.media_type, "artifact written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_listener(counter: Arc<AtomicUsize>) -> Listener<SnapshotEvent> {
        Box::new(move |event: &SnapshotEvent| {
            let size = event.as_ref().map(Vec::len).unwrap_or_default();
            counter.store(size, Ordering::SeqCst);
        })
    }

    #[test]
    fn store_pushes_snapshots_per_collection() {
        let store = InMemoryApplicationStore::default();
        let applicants = Arc::new(AtomicUsize::new(usize::MAX));
        let archive = Arc::new(AtomicUsize::new(usize::MAX));
        let _first = store.subscribe("applicants", counting_listener(applicants.clone()));
        let _second = store.subscribe("archive", counting_listener(archive.clone()));
        assert_eq!(applicants.load(Ordering::SeqCst), 0, "primed with empty snapshot");

        let draft = Application::initial(NaiveDate::from_ymd_opt(2026, 10, 18).expect("date"));
        let first = store.create("applicants", &draft).expect("create");
        let second = store.create("applicants", &draft).expect("create");

        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), 32);
        assert_eq!(applicants.load(Ordering::SeqCst), 2);
        assert_eq!(archive.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn provider_checks_passwords_case_insensitively_on_email() {
        let provider = InMemoryIdentityProvider::default().with_account("Admin@Contoh.id", "pw");

        let identity = provider.sign_in(" admin@contoh.id ", "pw").expect("signs in");
        assert_eq!(identity.email.as_deref(), Some("admin@contoh.id"));
        assert!(matches!(
            provider.sign_in("admin@contoh.id", "nope"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn parse_date_reports_the_raw_value() {
        let err = parse_date("18/10/2026").expect_err("wrong format");
        assert!(err.contains("18/10/2026"));
        assert_eq!(
            parse_date(" 2026-10-18 ").expect("iso date"),
            NaiveDate::from_ymd_opt(2026, 10, 18).expect("date")
        );
    }
}
