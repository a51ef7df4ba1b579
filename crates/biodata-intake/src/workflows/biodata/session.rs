//! Identity-driven role gate that decides which view the application shows.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::subscription::{Listener, Subscription};

/// Authenticated principal as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: Option<&str>) -> Self {
        Self {
            uid: uid.into(),
            email: email.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Applicant,
    Admin,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Applicant => "applicant",
            Role::Admin => "admin",
        }
    }
}

/// Placeholder role rule: any email containing `admin` (case-sensitive) is an administrator.
pub fn derive_role(identity: Option<&Identity>) -> Option<Role> {
    let identity = identity?;
    match identity.email.as_deref() {
        Some(email) if email.contains("admin") => Some(Role::Admin),
        _ => Some(Role::Applicant),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Loading,
    Login,
    ApplicantForm,
    AdminDashboard,
}

/// Snapshot of who is signed in, refreshed by the identity subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub identity: Option<Identity>,
    pub role: Option<Role>,
    pub loading: bool,
}

impl SessionContext {
    pub fn loading() -> Self {
        Self {
            identity: None,
            role: None,
            loading: true,
        }
    }

    pub fn from_identity(identity: Option<Identity>) -> Self {
        let role = derive_role(identity.as_ref());
        Self {
            identity,
            role,
            loading: false,
        }
    }

    pub fn view(&self) -> View {
        if self.loading {
            return View::Loading;
        }
        match self.role {
            None => View::Login,
            Some(Role::Applicant) => View::ApplicantForm,
            Some(Role::Admin) => View::AdminDashboard,
        }
    }
}

/// Authentication backend.
///
/// `subscribe` reports the current identity promptly and again on every sign-in or sign-out.
pub trait IdentityProvider: Send + Sync {
    fn sign_in(&self, email: &str, secret: &str) -> Result<Identity, AuthError>;
    fn sign_out(&self) -> Result<(), AuthError>;
    fn subscribe(&self, listener: Listener<Option<Identity>>) -> Subscription;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("credentials rejected")]
    InvalidCredentials,
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// The only login failure shown to users; the underlying cause is logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Email atau password salah.")]
    Rejected,
}

/// Owns the identity subscription for as long as the application shell is mounted.
pub struct SessionGate<P> {
    provider: Arc<P>,
    context: Arc<Mutex<SessionContext>>,
    _subscription: Subscription,
}

impl<P> SessionGate<P>
where
    P: IdentityProvider + 'static,
{
    pub fn mount(provider: Arc<P>) -> Self {
        let context = Arc::new(Mutex::new(SessionContext::loading()));
        let sink = Arc::clone(&context);
        let subscription = provider.subscribe(Box::new(move |identity: &Option<Identity>| {
            let next = SessionContext::from_identity(identity.clone());
            info!(
                role = next.role.map(Role::label).unwrap_or("none"),
                "session identity changed"
            );
            *sink.lock().unwrap_or_else(PoisonError::into_inner) = next;
        }));

        Self {
            provider,
            context,
            _subscription: subscription,
        }
    }

    pub fn context(&self) -> SessionContext {
        self.context
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn view(&self) -> View {
        self.context().view()
    }

    pub fn login(&self, email: &str, secret: &str) -> Result<Identity, LoginError> {
        self.provider.sign_in(email, secret).map_err(|err| {
            warn!(error = %err, "sign-in failed");
            LoginError::Rejected
        })
    }

    pub fn logout(&self) {
        if let Err(err) = self.provider.sign_out() {
            warn!(error = %err, "sign-out failed");
        }
    }
}
