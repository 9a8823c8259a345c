use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, authenticated caller identity.
///
/// The ledger never inspects the contents; it only compares principals for
/// equality. Producing a `Principal` is the job of whatever authentication
/// layer sits in front of the ledger.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Principal used for callers that presented no credentials.
    pub const ANONYMOUS: &'static str = "anonymous";

    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn anonymous() -> Self {
        Self(Self::ANONYMOUS.to_string())
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == Self::ANONYMOUS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({})", self.0)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
