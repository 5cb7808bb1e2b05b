// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Static role checks guarding the importers.

use obtrack_domain::ActorRole;

use crate::error::AuthError;

/// An operator with an associated role.
///
/// Identity is supplied by the surrounding application; only the role is
/// checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: ActorRole,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: ActorRole) -> Self {
        Self { id, role }
    }
}

/// Authorization service for the import entry points.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may run the full import wizard.
    ///
    /// The full wizard creates a company, so only actors who manage
    /// companies may use it.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an Admin or Consultor.
    pub fn authorize_full_import(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.can_manage_companies() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("import_company"),
                required_role: String::from("admin or consultor"),
            })
        }
    }

    /// Checks if an actor may import obligations into an existing company.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor may not edit company information.
    pub fn authorize_obligation_import(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.can_manage_company_info() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("import_obligations"),
                required_role: String::from("admin, consultor or cliente_admin"),
            })
        }
    }
}
