use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Authenticated caller identity.
///
/// Supplied verbatim by the authentication layer; the catalog services
/// trust it without further checks. The display name is snapshotted into
/// reviews at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// The caller's user id.
    pub id: UserId,
    /// The caller's display name.
    pub name: String,
}

impl Caller {
    /// Create a new caller identity.
    #[must_use]
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
