// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application services for the pastoral agent registry.
//!
//! This crate sits between the HTTP layer and the store. It owns
//! authentication and session handling, role-based authorization, the
//! request/response DTOs, and the handler functions that tie domain
//! validation to persistence. Every fallible path returns [`ApiError`],
//! which the server maps to HTTP statuses.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

pub mod auth;
pub mod csv_export;
pub mod error;
pub mod handlers;
pub mod password_policy;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use csv_export::EXPORT_FILENAME;
pub use error::{ApiError, AuthError};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
