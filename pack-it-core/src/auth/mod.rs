//! Authentication against a managed identity provider.
//!
//! [`AuthSession`] owns the guest/authenticated state and the side effects of
//! each transition; [`IdentityProvider`] is the seam to the provider itself.

mod firebase;
mod provider;
mod session;
#[cfg(test)]
pub(crate) mod testing;

pub use firebase::{FirebaseIdentityProvider, DEFAULT_IDENTITY_URL};
pub use provider::{
    clear_session, load_session, save_session, AuthError, AuthUser, IdentityProvider,
    SESSION_KEY,
};
pub use session::{AuthSession, SessionRestore};
