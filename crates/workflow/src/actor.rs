use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

/// Role asserted by whoever issues a command. Identity is not verified here.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ActorRole {
    #[default]
    Member,
    Admin,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actor {
    pub role: ActorRole,
}

impl Actor {
    pub const fn member() -> Self {
        Self {
            role: ActorRole::Member,
        }
    }

    pub const fn admin() -> Self {
        Self {
            role: ActorRole::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }
}
