//! Participant identities
//!
//! The hosting environment supplies one human identity (the viewer) and a
//! list of simulated participants. Both are read-only here.

use serde::{Deserialize, Serialize};

/// What kind of participant an identity represents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdentityKind {
    /// A real researcher. The email is the unique key for authorship checks.
    Human { email: String },
    /// A simulated community member
    Simulated {
        #[serde(default, rename = "personaSummary")]
        persona_summary: String,
    },
}

/// Authorship key. Emails and simulated ids never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKey<'a> {
    Email(&'a str),
    Simulated(&'a str),
}

/// A chat participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    /// Avatar reference (URL or asset key), opaque to this crate
    #[serde(default)]
    pub picture: String,
    #[serde(flatten)]
    pub kind: IdentityKind,
}

impl Identity {
    #[must_use]
    pub fn human(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        picture: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            picture: picture.into(),
            kind: IdentityKind::Human {
                email: email.into(),
            },
        }
    }

    #[must_use]
    pub fn simulated(
        id: impl Into<String>,
        name: impl Into<String>,
        persona_summary: impl Into<String>,
        picture: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            picture: picture.into(),
            kind: IdentityKind::Simulated {
                persona_summary: persona_summary.into(),
            },
        }
    }

    /// Key used for "is this my message" comparisons.
    ///
    /// Humans are keyed by email, simulated participants by id.
    #[must_use]
    pub fn key(&self) -> IdentityKey<'_> {
        match &self.kind {
            IdentityKind::Human { email } => IdentityKey::Email(email),
            IdentityKind::Simulated { .. } => IdentityKey::Simulated(&self.id),
        }
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        matches!(self.kind, IdentityKind::Human { .. })
    }

    #[must_use]
    pub fn persona_summary(&self) -> Option<&str> {
        match &self.kind {
            IdentityKind::Simulated { persona_summary } => Some(persona_summary),
            IdentityKind::Human { .. } => None,
        }
    }
}
