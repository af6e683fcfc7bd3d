//! TimezoneId - Cheap-to-clone timezone identifier
//!
//! Uses Arc<str> internally so the per-frame settings snapshot clones in O(1).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Timezone identifier as selected by the user (normally an IANA zone name).
///
/// The identifier is not validated on construction: an empty or unknown value
/// is legal and makes the resolver fall back to the observer's local zone.
///
/// # Examples
/// ```
/// use contracts::TimezoneId;
///
/// let tz: TimezoneId = "Asia/Tokyo".into();
/// let tz2 = tz.clone();  // O(1) - just increments ref count
/// assert_eq!(tz, tz2);
/// assert_eq!(tz.as_str(), "Asia/Tokyo");
/// assert!(TimezoneId::default().is_blank());
/// ```
#[derive(Clone)]
pub struct TimezoneId(Arc<str>);

impl TimezoneId {
    /// Create a new TimezoneId from a string slice.
    #[inline]
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Get the underlying string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no zone was selected (empty or whitespace only).
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Default for TimezoneId {
    fn default() -> Self {
        Self(Arc::from(""))
    }
}

impl Deref for TimezoneId {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for TimezoneId {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TimezoneId {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TimezoneId {
    #[inline]
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for TimezoneId {
    #[inline]
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for TimezoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TimezoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimezoneId({:?})", self.0)
    }
}

impl PartialEq for TimezoneId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for TimezoneId {}

impl PartialEq<str> for TimezoneId {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for TimezoneId {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Hash for TimezoneId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl Serialize for TimezoneId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TimezoneId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s))
    }
}
