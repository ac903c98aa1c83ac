//! REST API client module.
//!
//! `ApiClient` speaks the Tableau REST API: an unauthenticated sign-in
//! exchange for a token, then JSON requests carrying the token in the
//! `X-Tableau-Auth` header. `SignInApi` is the seam the authenticator uses
//! so tests can substitute a recording double.

pub mod client;
pub mod error;

pub use client::{ApiClient, SignInApi, SignInResponse};
pub use error::{ApiError, AuthError};
