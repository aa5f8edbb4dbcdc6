//! Mailbox and AddressMap - ordered recipient lists
//!
//! `AddressMap` is the ordered `address -> display name` mapping carried by
//! the `to`, `cc` and `bcc` fields of a message. Insertion order is preserved
//! because batch sends walk the `to` list in that order.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A single recipient: address plus optional display name.
///
/// An empty `name` means the recipient has no display name.
///
/// # Examples
/// ```
/// use contracts::Mailbox;
///
/// let mb = Mailbox::new("ada@example.com", "Ada");
/// assert_eq!(mb.to_string(), "\"Ada\" <ada@example.com>");
/// assert_eq!(Mailbox::bare("bob@example.com").to_string(), "bob@example.com");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mailbox {
    /// Delivery address
    pub address: String,

    /// Display name (may be empty)
    #[serde(default)]
    pub name: String,
}

impl Mailbox {
    /// Create a mailbox with a display name
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }

    /// Create a mailbox without a display name
    pub fn bare(address: impl Into<String>) -> Self {
        Self::new(address, String::new())
    }

    /// Whether a display name is present
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_name() {
            write!(f, "\"{}\" <{}>", self.name, self.address)
        } else {
            write!(f, "{}", self.address)
        }
    }
}

impl<A: Into<String>, N: Into<String>> From<(A, N)> for Mailbox {
    fn from((address, name): (A, N)) -> Self {
        Self::new(address, name)
    }
}

/// Ordered, key-unique mapping from address to display name.
///
/// Backed by a `Vec` so iteration follows insertion order, with an
/// address -> position index for constant-time lookups. Re-inserting an
/// existing address keeps its position and replaces the name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressMap {
    entries: Vec<Mailbox>,
    index: HashMap<String, usize>,
}

impl AddressMap {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapping holding exactly one recipient
    pub fn singleton(address: impl Into<String>, name: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert(address, name);
        map
    }

    /// Insert or update a recipient
    ///
    /// Returns the previous display name when the address was already present.
    pub fn insert(&mut self, address: impl Into<String>, name: impl Into<String>) -> Option<String> {
        let address = address.into();
        let name = name.into();
        match self.index.get(&address) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].name, name)),
            None => {
                self.index.insert(address.clone(), self.entries.len());
                self.entries.push(Mailbox { address, name });
                None
            }
        }
    }

    /// Display name for an address, if present
    pub fn get(&self, address: &str) -> Option<&str> {
        self.index
            .get(address)
            .map(|&pos| self.entries[pos].name.as_str())
    }

    pub fn contains(&self, address: &str) -> bool {
        self.index.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(address, name)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|m| (m.address.as_str(), m.name.as_str()))
    }

    /// Iterate mailboxes in insertion order
    pub fn mailboxes(&self) -> std::slice::Iter<'_, Mailbox> {
        self.entries.iter()
    }

    /// Iterate addresses only
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|m| m.address.as_str())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

impl fmt::Display for AddressMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, mailbox) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{mailbox}")?;
        }
        Ok(())
    }
}

impl<M: Into<Mailbox>> FromIterator<M> for AddressMap {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        let mut map = Self::new();
        for mailbox in iter {
            let Mailbox { address, name } = mailbox.into();
            map.insert(address, name);
        }
        map
    }
}

impl<M: Into<Mailbox>> Extend<M> for AddressMap {
    fn extend<I: IntoIterator<Item = M>>(&mut self, iter: I) {
        for mailbox in iter {
            let Mailbox { address, name } = mailbox.into();
            self.insert(address, name);
        }
    }
}

impl IntoIterator for AddressMap {
    type Item = Mailbox;
    type IntoIter = std::vec::IntoIter<Mailbox>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a AddressMap {
    type Item = &'a Mailbox;
    type IntoIter = std::slice::Iter<'a, Mailbox>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Serialized form of one entry: either `"addr"` or `{ address, name }`
#[derive(Deserialize)]
#[serde(untagged)]
enum MailboxEntry {
    Bare(String),
    Full(Mailbox),
}

impl From<MailboxEntry> for Mailbox {
    fn from(entry: MailboxEntry) -> Self {
        match entry {
            MailboxEntry::Bare(address) => Mailbox::bare(address),
            MailboxEntry::Full(mailbox) => mailbox,
        }
    }
}

// Serde support
impl Serialize for AddressMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AddressMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<MailboxEntry>::deserialize(deserializer)?;
        Ok(entries.into_iter().map(Mailbox::from).collect())
    }
}
