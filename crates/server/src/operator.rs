// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator extraction for the server.
//!
//! Identity is established by whatever fronts this server; it forwards the
//! operator's id and role as request headers and only the role is checked.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use obtrack_api::AuthenticatedActor;
use obtrack_domain::ActorRole;
use tracing::{debug, warn};

/// Header carrying the operator's id.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";

/// Header carrying the operator's role.
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// Extractor for the operator driving an import.
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - The role header is missing or not valid UTF-8
/// - The role is not a known actor role
pub struct Operator(pub AuthenticatedActor);

impl<S> FromRequestParts<S> for Operator
where
    S: Send + Sync,
{
    type Rejection = OperatorError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let role_header: &str = parts
            .headers
            .get(ACTOR_ROLE_HEADER)
            .ok_or_else(|| {
                debug!("Missing actor role header");
                OperatorError::MissingRole
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid actor role header encoding");
                OperatorError::InvalidRole(String::from("<non-utf8>"))
            })?;

        let role: ActorRole = role_header.parse().map_err(|_| {
            warn!(role = role_header, "Unknown actor role");
            OperatorError::InvalidRole(role_header.to_string())
        })?;

        let id: String = parts
            .headers
            .get(ACTOR_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map_or_else(|| String::from("anonymous"), str::to_string);

        Ok(Self(AuthenticatedActor::new(id, role)))
    }
}

/// Operator extraction errors.
#[derive(Debug)]
pub enum OperatorError {
    /// The role header is missing.
    MissingRole,
    /// The role header does not name a known role.
    InvalidRole(String),
}

impl IntoResponse for OperatorError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingRole => format!("Missing {ACTOR_ROLE_HEADER} header"),
            Self::InvalidRole(role) => format!(
                "Invalid role: '{role}'. Must be one of admin, consultor, cliente_admin, cliente_miembro"
            ),
        };
        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}
