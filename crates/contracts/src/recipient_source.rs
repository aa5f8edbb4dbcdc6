//! RecipientSource trait - pull-based recipient stream
//!
//! Lets a batch send read recipients one at a time instead of from the
//! message's own `to` list.

use std::iter::Peekable;

use crate::{AddressMap, ContractError, Mailbox};

/// Forward-only, finite stream of single recipients.
///
/// # Example
///
/// ```
/// use contracts::{ListRecipientSource, RecipientSource};
///
/// let mut source = ListRecipientSource::from_addresses(["a@example.com", "b@example.com"]);
/// while source.has_next() {
///     let to = source.next_recipient().unwrap();
///     assert_eq!(to.len(), 1);
/// }
/// assert!(source.next_recipient().is_err());
/// ```
pub trait RecipientSource {
    /// Whether another recipient is available
    fn has_next(&mut self) -> bool;

    /// Take the next recipient as a singleton mapping
    ///
    /// # Errors
    /// Returns `ContractError::RecipientsExhausted` once `has_next` is false
    fn next_recipient(&mut self) -> Result<AddressMap, ContractError>;
}

/// Recipient source over an in-memory list
#[derive(Debug, Clone, Default)]
pub struct ListRecipientSource {
    recipients: Vec<Mailbox>,
    position: usize,
}

impl ListRecipientSource {
    pub fn new(recipients: Vec<Mailbox>) -> Self {
        Self {
            recipients,
            position: 0,
        }
    }

    /// Build from bare addresses (no display names)
    pub fn from_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(addresses.into_iter().map(Mailbox::bare).collect())
    }

    /// Recipients not yet handed out
    pub fn remaining(&self) -> usize {
        self.recipients.len() - self.position
    }
}

impl From<AddressMap> for ListRecipientSource {
    fn from(map: AddressMap) -> Self {
        Self::new(map.into_iter().collect())
    }
}

impl RecipientSource for ListRecipientSource {
    fn has_next(&mut self) -> bool {
        self.position < self.recipients.len()
    }

    fn next_recipient(&mut self) -> Result<AddressMap, ContractError> {
        let mailbox = self
            .recipients
            .get(self.position)
            .ok_or(ContractError::RecipientsExhausted)?;
        self.position += 1;
        Ok(AddressMap::singleton(
            mailbox.address.clone(),
            mailbox.name.clone(),
        ))
    }
}

/// Adapts any mailbox iterator into a recipient source
pub struct IterRecipientSource<I: Iterator<Item = Mailbox>> {
    inner: Peekable<I>,
}

impl<I: Iterator<Item = Mailbox>> IterRecipientSource<I> {
    pub fn new<T>(iter: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            inner: iter.into_iter().peekable(),
        }
    }
}

impl<I: Iterator<Item = Mailbox>> RecipientSource for IterRecipientSource<I> {
    fn has_next(&mut self) -> bool {
        self.inner.peek().is_some()
    }

    fn next_recipient(&mut self) -> Result<AddressMap, ContractError> {
        let Mailbox { address, name } = self
            .inner
            .next()
            .ok_or(ContractError::RecipientsExhausted)?;
        Ok(AddressMap::singleton(address, name))
    }
}
