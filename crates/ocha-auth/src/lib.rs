//! Authentication session for the OCHA storefront client.
//!
//! Owns the bearer credential and the signed-in user's profile. The
//! credential is written through to the persistent cache on every change,
//! which is where the HTTP adapter picks it up for outgoing requests.

mod error;
mod profile;
mod session;

pub use error::AuthError;
pub use profile::{Profile, Role};
pub use session::{paths, SessionStatus, SessionStore};
