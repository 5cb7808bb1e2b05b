// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use obtrack_domain::ActorRole;

use super::helpers::create_test_actor;
use crate::{ApiError, AuthError, AuthorizationService};

#[test]
fn test_full_import_is_limited_to_company_managers() {
    for role in [ActorRole::Admin, ActorRole::Consultor] {
        assert!(AuthorizationService::authorize_full_import(&create_test_actor(role)).is_ok());
    }
    for role in [ActorRole::ClienteAdmin, ActorRole::ClienteMiembro] {
        assert!(AuthorizationService::authorize_full_import(&create_test_actor(role)).is_err());
    }
}

#[test]
fn test_obligation_import_allows_client_admins() {
    assert!(
        AuthorizationService::authorize_obligation_import(&create_test_actor(
            ActorRole::ClienteAdmin
        ))
        .is_ok()
    );

    let err: AuthError = AuthorizationService::authorize_obligation_import(&create_test_actor(
        ActorRole::ClienteMiembro,
    ))
    .unwrap_err();

    assert!(matches!(
        ApiError::from(err),
        ApiError::Unauthorized { ref action, .. } if action == "import_obligations"
    ));
}
