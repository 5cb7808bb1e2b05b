// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ActorRole, DomainError, Frequency, MappedField, ObligationField, ObligationStatus, Program,
    TaskPriority, TaskStatus, UserRole,
};

#[test]
fn test_user_role_parsing_is_exact() {
    assert_eq!("cliente_admin".parse::<UserRole>(), Ok(UserRole::ClienteAdmin));
    assert!("Cliente_Admin".parse::<UserRole>().is_err());
    assert!("admin".parse::<UserRole>().is_err());
}

#[test]
fn test_invalid_value_reports_kind() {
    let err: DomainError = "Urgent".parse::<TaskPriority>().unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidValue {
            kind: "task priority",
            value: String::from("Urgent"),
        }
    );
}

#[test]
fn test_defaults() {
    assert_eq!(UserRole::default(), UserRole::ClienteMiembro);
    assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    assert_eq!(ObligationStatus::default(), ObligationStatus::Compliant);
    assert_eq!(Program::default(), Program::General);
    assert_eq!(Frequency::default(), Frequency::Other);
}

#[test]
fn test_task_status_wire_spelling_has_space() {
    assert_eq!("In Progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
    let json: String = serde_json::to_string(&TaskStatus::InProgress).unwrap();
    assert_eq!(json, "\"In Progress\"");
}

#[test]
fn test_obligation_status_serializes_hyphenated() {
    let json: String = serde_json::to_string(&ObligationStatus::NonCompliant).unwrap();
    assert_eq!(json, "\"non-compliant\"");
}

#[test]
fn test_actor_permissions() {
    assert!(ActorRole::Admin.can_manage_companies());
    assert!(ActorRole::Consultor.can_manage_companies());
    assert!(!ActorRole::ClienteAdmin.can_manage_companies());
    assert!(!ActorRole::ClienteMiembro.can_manage_companies());

    assert!(ActorRole::ClienteAdmin.can_manage_company_info());
    assert!(!ActorRole::ClienteMiembro.can_manage_company_info());
}

#[test]
fn test_mapped_field_round_trips_through_wire_spelling() {
    for field in MappedField::ALL {
        assert_eq!(field.as_str().parse::<MappedField>(), Ok(field));
        let json: String = serde_json::to_string(&field).unwrap();
        assert_eq!(json, format!("\"{}\"", field.as_str()));
    }
}

#[test]
fn test_obligation_field_uses_camel_case() {
    assert_eq!(
        "obligationType".parse::<ObligationField>(),
        Ok(ObligationField::ObligationType)
    );
    let json: String = serde_json::to_string(&ObligationField::SubmissionDate).unwrap();
    assert_eq!(json, "\"submissionDate\"");
}

#[test]
fn test_unknown_field_is_rejected() {
    assert_eq!(
        "company".parse::<MappedField>(),
        Err(DomainError::UnknownField(String::from("company")))
    );
}

#[test]
fn test_field_groups_are_disjoint() {
    for field in MappedField::ALL {
        let groups: usize = [
            field.is_company_field(),
            field.is_user_field(),
            field.is_task_field(),
        ]
        .into_iter()
        .filter(|member| *member)
        .count();
        let expected: usize = usize::from(field != MappedField::Ignore);
        assert_eq!(groups, expected, "{field}");
    }
}
