// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Closed value sets used by imported records.
//!
//! Every set parses its exact wire spelling only. Case and surrounding
//! whitespace are significant, matching how the values are stored.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! value_set {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal $(, default = $default:ident)? {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            /// Every member of the set.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the wire spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        $(
            impl Default for $name {
                fn default() -> Self {
                    Self::$default
                }
            }
        )?

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|member| member.as_str() == s)
                    .ok_or_else(|| DomainError::InvalidValue {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

value_set! {
    /// Role given to a user created by an import.
    ///
    /// Imports may only create client-side accounts.
    UserRole, "user role", default = ClienteMiembro {
        ClienteAdmin => "cliente_admin",
        ClienteMiembro => "cliente_miembro",
    }
}

value_set! {
    /// Priority of an imported task.
    TaskPriority, "task priority", default = Medium {
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

value_set! {
    /// Progress state of an imported task.
    TaskStatus, "task status", default = Pending {
        Pending => "Pending",
        InProgress => "In Progress",
        Completed => "Completed",
    }
}

value_set! {
    /// Compliance state of an obligation.
    ObligationStatus, "obligation status", default = Compliant {
        Compliant => "compliant",
        NonCompliant => "non-compliant",
    }
}

value_set! {
    /// Trade program an obligation belongs to.
    Program, "program", default = General {
        Immex => "IMMEX",
        Prosec => "PROSEC",
        Certiva => "CERTIVA",
        General => "General",
    }
}

value_set! {
    /// How often an obligation recurs.
    Frequency, "frequency", default = Other {
        Monthly => "monthly",
        Annual => "annual",
        Weekly => "weekly",
        Other => "other",
    }
}

value_set! {
    /// Role of the operator driving an import.
    ActorRole, "actor role" {
        Admin => "admin",
        Consultor => "consultor",
        ClienteAdmin => "cliente_admin",
        ClienteMiembro => "cliente_miembro",
    }
}

impl ActorRole {
    /// Whether this operator may create companies (and so run the full wizard).
    #[must_use]
    pub const fn can_manage_companies(self) -> bool {
        matches!(self, Self::Admin | Self::Consultor)
    }

    /// Whether this operator may edit an existing company's information,
    /// which includes importing its obligations.
    #[must_use]
    pub const fn can_manage_company_info(self) -> bool {
        matches!(self, Self::Admin | Self::Consultor | Self::ClienteAdmin)
    }
}
