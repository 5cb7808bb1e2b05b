// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DatePolicy, DomainError, ResolvedDate, is_valid_email, parse_iso_date};
use time::macros::date;

#[test]
fn test_email_accepts_plain_address() {
    assert!(is_valid_email("ana@x.com"));
    assert!(is_valid_email("first.last@sub.example.org"));
}

#[test]
fn test_email_is_unanchored() {
    assert!(is_valid_email("contact: ana@x.com please"));
}

#[test]
fn test_email_rejects_missing_parts() {
    assert!(!is_valid_email("ana"));
    assert!(!is_valid_email("ana@"));
    assert!(!is_valid_email("@x.com"));
    assert!(!is_valid_email("ana@.com"));
    assert!(!is_valid_email("ana@x."));
    assert!(!is_valid_email("ana @x.com"));
    assert!(!is_valid_email("ana@x .com"));
    assert!(!is_valid_email(""));
}

#[test]
fn test_email_accepts_dot_after_second_at() {
    assert!(is_valid_email("a@b@c.d"));
}

#[test]
fn test_parse_iso_date_accepts_real_dates() {
    assert_eq!(parse_iso_date("2024-12-31"), Ok(date!(2024 - 12 - 31)));
    assert_eq!(parse_iso_date("2024-02-29"), Ok(date!(2024 - 02 - 29)));
}

#[test]
fn test_parse_iso_date_rejects_wrong_shape() {
    for raw in ["31/12/2024", "2024-1-01", "2024-01-01T00:00", " 2024-01-01", "20240101"] {
        assert!(
            matches!(parse_iso_date(raw), Err(DomainError::InvalidDate(_))),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn test_parse_iso_date_rejects_impossible_days() {
    assert!(parse_iso_date("2024-13-40").is_err());
    assert!(parse_iso_date("2023-02-29").is_err());
}

#[test]
fn test_leave_unset_policy_drops_bad_dates() {
    let resolved: ResolvedDate = DatePolicy::LeaveUnset.resolve("2024-13-40");
    assert_eq!(resolved.value, None);
    assert!(resolved.rejected);
}

#[test]
fn test_default_to_today_policy_substitutes_today() {
    let policy: DatePolicy = DatePolicy::DefaultToToday {
        today: date!(2026 - 10 - 18),
    };
    let resolved: ResolvedDate = policy.resolve("31/12/2024");
    assert_eq!(resolved.value, Some(String::from("2026-10-18")));
    assert!(resolved.rejected);
}

#[test]
fn test_policies_keep_valid_dates() {
    let today: DatePolicy = DatePolicy::DefaultToToday {
        today: date!(2026 - 10 - 18),
    };
    for policy in [DatePolicy::LeaveUnset, today] {
        let resolved: ResolvedDate = policy.resolve("2024-12-31");
        assert_eq!(resolved.value, Some(String::from("2024-12-31")));
        assert!(!resolved.rejected);
    }
}
