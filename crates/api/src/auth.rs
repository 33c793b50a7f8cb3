// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use time::{Duration, OffsetDateTime};

use pastoral_persistence::{OperatorData, PersistenceError, SessionData, SqlitePersistence};

use crate::error::AuthError;

/// Operator roles for authorization.
///
/// Roles apply only to operators (the people running the registry), never
/// to the agents being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Full authority, including deletions and operator management.
    Admin,
    /// May create and edit agents, movements and lookup values.
    Cadastrador,
    /// Read-only access to listings and reports.
    Consulta,
}

impl Role {
    /// Parses a stored role string.
    ///
    /// # Errors
    ///
    /// Returns an error naming the unknown role.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        match value {
            "Admin" => Ok(Self::Admin),
            "Cadastrador" => Ok(Self::Cadastrador),
            "Consulta" => Ok(Self::Consulta),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {value}"),
            }),
        }
    }

    /// The stored string form of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Cadastrador => "Cadastrador",
            Self::Consulta => "Consulta",
        }
    }
}

/// An authenticated operator with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The operator's login name.
    pub id: String,
    /// The role assigned to this operator.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the actor may create or edit registry data.
    ///
    /// Admin and Cadastrador may edit; Consulta is read-only.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor's role does not allow editing.
    pub fn authorize_edit(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Cadastrador => Ok(()),
            Role::Consulta => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin or Cadastrador"),
            }),
        }
    }

    /// Checks that the actor holds the Admin role.
    ///
    /// Deletions and operator management are Admin-only.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an Admin.
    pub fn authorize_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Cadastrador | Role::Consulta => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates an operator by login name and password and creates a
    /// session.
    ///
    /// Unknown logins and wrong passwords produce the same error so the
    /// response does not reveal which logins exist.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `operator_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails.
    pub fn login(
        persistence: &mut SqlitePersistence,
        login_name: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedActor, OperatorData), AuthError> {
        let (operator, password_hash): (OperatorData, String) = persistence
            .get_operator_credentials(login_name)
            .map_err(|e| match e {
                PersistenceError::OperatorNotFound(_) => AuthError::AuthenticationFailed {
                    reason: String::from("Invalid login name or password"),
                },
                _ => AuthError::AuthenticationFailed {
                    reason: format!("Database error: {e}"),
                },
            })?;

        let password_matches: bool =
            bcrypt::verify(password, &password_hash).map_err(|e| {
                AuthError::AuthenticationFailed {
                    reason: format!("Password verification failed: {e}"),
                }
            })?;
        if !password_matches {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid login name or password"),
            });
        }

        if operator.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Operator is disabled"),
            });
        }

        let role: Role = Role::parse(&operator.role)?;
        let session_token: String = Self::generate_session_token();

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let expires_at: OffsetDateTime = now + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = Self::format_timestamp(expires_at)?;
        let now_str: String = Self::format_timestamp(now)?;

        persistence
            .create_session(&session_token, operator.operator_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        persistence
            .update_last_login(operator.operator_id, &now_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        let authenticated_actor: AuthenticatedActor =
            AuthenticatedActor::new(operator.login_name.clone(), role);

        Ok((session_token, authenticated_actor, operator))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_actor`, `operator_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired, or the
    /// operator has been disabled since login.
    pub fn validate_session(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, OperatorData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(|e| match e {
                PersistenceError::SessionNotFound(_) => AuthError::AuthenticationFailed {
                    reason: String::from("Invalid session token"),
                },
                _ => AuthError::AuthenticationFailed {
                    reason: format!("Database error: {e}"),
                },
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let operator: OperatorData = persistence
            .get_operator(session.operator_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Operator lookup failed: {e}"),
            })?;

        if operator.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Operator is disabled"),
            });
        }

        let role: Role = Role::parse(&operator.role)?;
        let authenticated_actor: AuthenticatedActor =
            AuthenticatedActor::new(operator.login_name.clone(), role);

        Ok((authenticated_actor, operator))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates a session token from the current time and a random nonce.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    /// Formats an `OffsetDateTime` as an ISO 8601 string for storage.
    fn format_timestamp(value: OffsetDateTime) -> Result<String, AuthError> {
        value
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format timestamp: {e}"),
            })
    }
}
