//! Principal identifiers issued by the identity provider.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum accepted length for a uid.
pub const UID_MAX: usize = 128;

/// Validation errors returned by [`Uid::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UidValidationError {
    /// The uid was empty.
    #[error("uid must not be empty")]
    Empty,
    /// The uid carried leading or trailing whitespace.
    #[error("uid must not contain surrounding whitespace")]
    SurroundingWhitespace,
    /// The uid exceeded [`UID_MAX`] characters.
    #[error("uid must be at most {max} characters")]
    TooLong {
        /// Configured maximum length.
        max: usize,
    },
}

/// Opaque, stable identifier of an authenticated principal.
///
/// The identity provider owns the format; the only guarantees are that the
/// value is non-empty, trimmed, and bounded in length.
///
/// # Examples
/// ```
/// use listshare::domain::Uid;
///
/// let uid = Uid::new("x7Fq2LmA").expect("valid uid");
/// assert_eq!(uid.as_ref(), "x7Fq2LmA");
/// assert!(Uid::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uid(String);

impl Uid {
    /// Validate and construct a [`Uid`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UidValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(UidValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(UidValidationError::SurroundingWhitespace);
        }
        if raw.chars().count() > UID_MAX {
            return Err(UidValidationError::TooLong { max: UID_MAX });
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Uid> for String {
    fn from(value: Uid) -> Self {
        value.0
    }
}

impl TryFrom<String> for Uid {
    type Error = UidValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Insertion-ordered set of [`Uid`]s.
///
/// Used for list collaborators and per-item completion. Membership is exact;
/// inserting a present uid or removing an absent one leaves the set unchanged.
///
/// # Examples
/// ```
/// use listshare::domain::{Uid, UidSet};
///
/// let alice = Uid::new("alice").expect("uid");
/// let mut set = UidSet::default();
/// assert!(set.insert(alice.clone()));
/// assert!(!set.insert(alice.clone()));
/// assert!(set.contains(&alice));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Uid>", into = "Vec<Uid>")]
pub struct UidSet(Vec<Uid>);

impl UidSet {
    /// Whether `uid` is a member.
    pub fn contains(&self, uid: &Uid) -> bool {
        self.0.contains(uid)
    }

    /// Add `uid`; returns `true` when it was not already present.
    pub fn insert(&mut self, uid: Uid) -> bool {
        if self.contains(&uid) {
            return false;
        }
        self.0.push(uid);
        true
    }

    /// Remove `uid`; returns `true` when it was present.
    pub fn remove(&mut self, uid: &Uid) -> bool {
        let before = self.0.len();
        self.0.retain(|member| member != uid);
        before != self.0.len()
    }

    /// Iterate members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Uid> {
        self.0.iter()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Uid>> for UidSet {
    fn from(values: Vec<Uid>) -> Self {
        let mut set = Self::default();
        for uid in values {
            set.insert(uid);
        }
        set
    }
}

impl From<UidSet> for Vec<Uid> {
    fn from(value: UidSet) -> Self {
        value.0
    }
}

impl FromIterator<Uid> for UidSet {
    fn from_iter<T: IntoIterator<Item = Uid>>(iter: T) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}
