// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{admin, setup};
use crate::error::ApiError;
use crate::handlers;
use crate::password_policy::{PasswordPolicy, PasswordPolicyError};
use crate::request_response::CreateOperatorRequest;

fn operator_request(login_name: &str, password: &str, role: &str) -> CreateOperatorRequest {
    CreateOperatorRequest {
        login_name: login_name.to_string(),
        display_name: format!("{login_name} display"),
        password: password.to_string(),
        role: role.to_string(),
    }
}

#[test]
fn test_policy_rejects_short_passwords() {
    let policy = PasswordPolicy::default();
    let err = policy.validate("Ab1!", "user", "User").unwrap_err();
    assert!(matches!(err, PasswordPolicyError::TooShort { min_length: 10 }));
}

#[test]
fn test_policy_requires_three_character_classes() {
    let policy = PasswordPolicy::default();

    let err = policy
        .validate("alllowercaseword", "user", "User")
        .unwrap_err();
    assert!(matches!(
        err,
        PasswordPolicyError::InsufficientComplexity { required: 3, .. }
    ));

    assert!(policy.validate("Upper1lower!", "user", "User").is_ok());
}

#[test]
fn test_policy_rejects_password_matching_login_or_display_name() {
    let policy = PasswordPolicy::default();

    let err = policy
        .validate("Maria.Souza1", "maria.souza1", "Someone Else")
        .unwrap_err();
    assert!(matches!(err, PasswordPolicyError::MatchesForbiddenField { .. }));
}

#[test]
fn test_create_operator_enforces_password_policy() {
    let mut persistence = setup();

    let request = operator_request("admin", "weak", "Admin");
    let err = handlers::create_operator(&mut persistence, request, None).unwrap_err();
    assert!(matches!(err, ApiError::PasswordPolicyViolation { .. }));
}

#[test]
fn test_create_operator_rejects_unknown_role() {
    let mut persistence = setup();
    handlers::create_operator(
        &mut persistence,
        operator_request("admin", "Str0ng!Passw0rd", "Admin"),
        None,
    )
    .unwrap();

    let err = handlers::create_operator(
        &mut persistence,
        operator_request("clerk", "Str0ng!Passw0rd", "Root"),
        Some(&admin()),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "role"));
}

#[test]
fn test_duplicate_login_name_is_a_conflict() {
    let mut persistence = setup();
    handlers::create_operator(
        &mut persistence,
        operator_request("admin", "Str0ng!Passw0rd", "Admin"),
        None,
    )
    .unwrap();

    let err = handlers::create_operator(
        &mut persistence,
        operator_request("admin", "An0ther!Passw0rd", "Consulta"),
        Some(&admin()),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Conflict { ref rule, .. } if rule == "unique_name"));
}
