mod admin;
pub mod domain;
pub mod export;
mod form;
mod photo;
pub mod reducer;
mod repository;
mod session;
mod submission;
mod subscription;

pub use admin::AdminDashboard;
pub use domain::{Application, EntityId, Identified};
pub use export::{Artifact, ExportError, PdfRenderer, RenderError, WorkbookRenderer};
pub use form::{
    missing_required_fields, ApplicantForm, FormSubmitError, SubmissionStatus,
    SUBMISSION_FAILED_MESSAGE,
};
pub use photo::{DecodedPhoto, PhotoError, PhotoPayload};
pub use reducer::{reduce, FormAction};
pub use repository::{
    ApplicationKey, ApplicationStore, SnapshotEvent, StoreError, StoredApplication,
};
pub use session::{
    derive_role, AuthError, Identity, IdentityProvider, LoginError, Role, SessionContext,
    SessionGate, View,
};
pub use submission::{prepare_for_storage, SubmissionError, SubmissionPipeline, SubmissionReceipt};
pub use subscription::{Listener, ListenerRegistry, Subscription};

#[cfg(test)]
mod tests;
