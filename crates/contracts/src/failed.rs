//! FailedRecipients - caller-owned record of rejected addresses

use serde::{Deserialize, Serialize};

/// Append-only, ordered collection of addresses a transport rejected.
///
/// One collector is shared by `&mut` across every send of a dispatch, so
/// rejections from successive calls accumulate in call order. There is
/// intentionally no way to remove entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FailedRecipients(Vec<String>);

impl FailedRecipients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rejected address
    pub fn push(&mut self, address: impl Into<String>) {
        self.0.push(address.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.0.iter().any(|a| a == address)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> Extend<S> for FailedRecipients {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl From<Vec<String>> for FailedRecipients {
    fn from(addresses: Vec<String>) -> Self {
        Self(addresses)
    }
}

impl<'a> IntoIterator for &'a FailedRecipients {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
