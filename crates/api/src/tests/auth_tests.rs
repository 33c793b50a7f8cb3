// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{admin, cadastrador, consulta, setup};
use crate::auth::{AuthenticationService, AuthorizationService, Role};
use crate::error::{ApiError, AuthError};
use crate::handlers;
use crate::request_response::{CreateOperatorRequest, LoginRequest};

fn bootstrap_admin(persistence: &mut pastoral_persistence::SqlitePersistence) {
    persistence
        .create_operator("admin", "Administrator", "Str0ng!Passw0rd", "Admin")
        .unwrap();
}

#[test]
fn test_role_parse_accepts_known_roles() {
    assert_eq!(Role::parse("Admin").unwrap(), Role::Admin);
    assert_eq!(Role::parse("Cadastrador").unwrap(), Role::Cadastrador);
    assert_eq!(Role::parse("Consulta").unwrap(), Role::Consulta);
    assert!(Role::parse("Root").is_err());
}

#[test]
fn test_edit_requires_admin_or_cadastrador() {
    assert!(AuthorizationService::authorize_edit(&admin(), "x").is_ok());
    assert!(AuthorizationService::authorize_edit(&cadastrador(), "x").is_ok());

    let err = AuthorizationService::authorize_edit(&consulta(), "x").unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized { .. }));
}

#[test]
fn test_admin_actions_reject_cadastrador() {
    assert!(AuthorizationService::authorize_admin(&admin(), "x").is_ok());
    assert!(AuthorizationService::authorize_admin(&cadastrador(), "x").is_err());
    assert!(AuthorizationService::authorize_admin(&consulta(), "x").is_err());
}

#[test]
fn test_login_returns_session_token() {
    let mut persistence = setup();
    bootstrap_admin(&mut persistence);

    let request = LoginRequest {
        login_name: String::from("admin"),
        password: String::from("Str0ng!Passw0rd"),
    };
    let response = handlers::login(&mut persistence, &request).unwrap();

    assert_eq!(response.login_name, "ADMIN");
    assert_eq!(response.role, "Admin");
    assert!(response.session_token.starts_with("session_"));
    assert!(!response.expires_at.is_empty());
}

#[test]
fn test_login_with_wrong_password_fails() {
    let mut persistence = setup();
    bootstrap_admin(&mut persistence);

    let request = LoginRequest {
        login_name: String::from("admin"),
        password: String::from("not-the-password"),
    };
    let err = handlers::login(&mut persistence, &request).unwrap_err();
    assert!(matches!(err, ApiError::AuthenticationFailed { .. }));
}

#[test]
fn test_login_with_unknown_operator_uses_generic_message() {
    let mut persistence = setup();
    bootstrap_admin(&mut persistence);

    let wrong_password = handlers::login(
        &mut persistence,
        &LoginRequest {
            login_name: String::from("admin"),
            password: String::from("nope-nope-nope"),
        },
    )
    .unwrap_err();
    let unknown_login = handlers::login(
        &mut persistence,
        &LoginRequest {
            login_name: String::from("ghost"),
            password: String::from("nope-nope-nope"),
        },
    )
    .unwrap_err();

    // Same message either way, so login names cannot be enumerated.
    assert_eq!(wrong_password.to_string(), unknown_login.to_string());
}

#[test]
fn test_session_round_trip() {
    let mut persistence = setup();
    bootstrap_admin(&mut persistence);

    let (token, actor, operator) =
        AuthenticationService::login(&mut persistence, "admin", "Str0ng!Passw0rd").unwrap();
    assert_eq!(actor.role, Role::Admin);
    assert_eq!(operator.login_name, "ADMIN");

    let (validated_actor, validated_operator) =
        AuthenticationService::validate_session(&mut persistence, &token).unwrap();
    assert_eq!(validated_actor.role, Role::Admin);
    assert_eq!(validated_operator.login_name, "ADMIN");
}

#[test]
fn test_logout_invalidates_session() {
    let mut persistence = setup();
    bootstrap_admin(&mut persistence);

    let (token, _, _) =
        AuthenticationService::login(&mut persistence, "admin", "Str0ng!Passw0rd").unwrap();
    handlers::logout(&mut persistence, &token).unwrap();

    let err = AuthenticationService::validate_session(&mut persistence, &token).unwrap_err();
    assert!(matches!(err, AuthError::AuthenticationFailed { .. }));
}

#[test]
fn test_validate_session_rejects_unknown_token() {
    let mut persistence = setup();
    bootstrap_admin(&mut persistence);

    let err = AuthenticationService::validate_session(&mut persistence, "session_0_0").unwrap_err();
    assert!(matches!(err, AuthError::AuthenticationFailed { .. }));
}

#[test]
fn test_whoami_reflects_operator() {
    let mut persistence = setup();
    bootstrap_admin(&mut persistence);

    let (_, _, operator) =
        AuthenticationService::login(&mut persistence, "admin", "Str0ng!Passw0rd").unwrap();
    let response = handlers::whoami(&operator);

    assert_eq!(response.login_name, "ADMIN");
    assert_eq!(response.display_name, "Administrator");
    assert_eq!(response.role, "Admin");
}

#[test]
fn test_first_operator_may_be_created_without_session() {
    let mut persistence = setup();

    let request = CreateOperatorRequest {
        login_name: String::from("admin"),
        display_name: String::from("Administrator"),
        password: String::from("Str0ng!Passw0rd"),
        role: String::from("Admin"),
    };
    let response = handlers::create_operator(&mut persistence, request, None).unwrap();
    assert_eq!(response.login_name, "ADMIN");
}

#[test]
fn test_first_operator_must_be_admin() {
    let mut persistence = setup();

    let request = CreateOperatorRequest {
        login_name: String::from("clerk"),
        display_name: String::from("Clerk"),
        password: String::from("Str0ng!Passw0rd"),
        role: String::from("Cadastrador"),
    };
    let err = handlers::create_operator(&mut persistence, request, None).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "role"));
}

#[test]
fn test_later_operators_require_admin_session() {
    let mut persistence = setup();
    bootstrap_admin(&mut persistence);

    let request = CreateOperatorRequest {
        login_name: String::from("clerk"),
        display_name: String::from("Clerk"),
        password: String::from("Str0ng!Passw0rd"),
        role: String::from("Cadastrador"),
    };

    let no_session =
        handlers::create_operator(&mut persistence, request.clone(), None).unwrap_err();
    assert!(matches!(no_session, ApiError::AuthenticationFailed { .. }));

    let not_admin =
        handlers::create_operator(&mut persistence, request.clone(), Some(&cadastrador()))
            .unwrap_err();
    assert!(matches!(not_admin, ApiError::Unauthorized { .. }));

    let created = handlers::create_operator(&mut persistence, request, Some(&admin())).unwrap();
    assert_eq!(created.role, "Cadastrador");
}
