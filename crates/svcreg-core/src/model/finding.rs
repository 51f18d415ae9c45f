use serde::Serialize;
use std::fmt;

/// A single field-level schema defect in one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub file: String,
    /// JSON Pointer of the offending location, `/` for the record root
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    DuplicateId,
    DuplicateAlias,
    IdAliasCollision,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::DuplicateId => "duplicate-id",
            ConflictKind::DuplicateAlias => "duplicate-alias",
            ConflictKind::IdAliasCollision => "id-alias-collision",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cross-record uniqueness violation
///
/// `first` is the file that claimed the token earlier in processing order,
/// `second` the file that collided with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub token: String,
    pub first: String,
    pub second: String,
}

impl Conflict {
    /// The two involved files, order-independent
    pub fn files(&self) -> (&str, &str) {
        if self.first <= self.second {
            (&self.first, &self.second)
        } else {
            (&self.second, &self.first)
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}': {} collides with {}",
            self.kind, self.token, self.second, self.first
        )
    }
}
