use std::fmt;

/// How a caller identifies a star.
///
/// A reference starts out either resolved (the CP-Stars primary key is known)
/// or unresolved (only the Renson catalog identifier is known). Resolving only
/// ever goes from unresolved to resolved; a resolved reference keeps its key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StarReference {
    Unresolved {
        catalog_id: String,
    },
    Resolved {
        primary_key: i64,
        catalog_id: Option<String>,
    },
}

impl StarReference {
    pub fn by_primary_key(primary_key: i64) -> Self {
        Self::Resolved {
            primary_key,
            catalog_id: None,
        }
    }

    pub fn by_catalog_id(catalog_id: impl Into<String>) -> Self {
        Self::Unresolved {
            catalog_id: catalog_id.into(),
        }
    }

    pub fn primary_key(&self) -> Option<i64> {
        match self {
            Self::Resolved { primary_key, .. } => Some(*primary_key),
            Self::Unresolved { .. } => None,
        }
    }

    pub fn catalog_id(&self) -> Option<&str> {
        match self {
            Self::Unresolved { catalog_id } => Some(catalog_id),
            Self::Resolved { catalog_id, .. } => catalog_id.as_deref(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// Attaches a resolved primary key. Already resolved references are
    /// returned unchanged.
    pub fn resolved_to(self, primary_key: i64) -> Self {
        match self {
            Self::Unresolved { catalog_id } => Self::Resolved {
                primary_key,
                catalog_id: Some(catalog_id),
            },
            resolved @ Self::Resolved { .. } => resolved,
        }
    }
}

impl From<i64> for StarReference {
    fn from(primary_key: i64) -> Self {
        Self::by_primary_key(primary_key)
    }
}

impl From<&str> for StarReference {
    fn from(catalog_id: &str) -> Self {
        Self::by_catalog_id(catalog_id)
    }
}

impl From<String> for StarReference {
    fn from(catalog_id: String) -> Self {
        Self::by_catalog_id(catalog_id)
    }
}

impl fmt::Display for StarReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved { catalog_id } => write!(f, "renson {}", catalog_id),
            Self::Resolved {
                primary_key,
                catalog_id: Some(catalog_id),
            } => write!(f, "cp-stars id {} (renson {})", primary_key, catalog_id),
            Self::Resolved { primary_key, .. } => write!(f, "cp-stars id {}", primary_key),
        }
    }
}
