//! Session lifecycle: credential storage, profile fetching, role handling.

mod credentials;
mod roles;
mod session;

pub use credentials::CredentialStore;
pub use roles::{PROFESSIONAL_ROLE, normalize_roles};
pub use session::{CurrentUser, Session, SessionService};
