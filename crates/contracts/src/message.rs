//! Message trait - recipient access for the dispatcher
//!
//! The dispatcher only ever reads and replaces the three recipient lists;
//! everything else about a message (headers, body encoding) belongs to the
//! transport.

use serde::{Deserialize, Serialize};

use crate::AddressMap;

/// Recipient capability of an outbound message.
///
/// Setters replace a field wholesale.
pub trait Message {
    fn to(&self) -> &AddressMap;
    fn cc(&self) -> &AddressMap;
    fn bcc(&self) -> &AddressMap;

    fn set_to(&mut self, to: AddressMap);
    fn set_cc(&mut self, cc: AddressMap);
    fn set_bcc(&mut self, bcc: AddressMap);

    /// Every recipient address in `to`, `cc`, `bcc` order, first occurrence wins
    fn recipients(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for address in self
            .to()
            .addresses()
            .chain(self.cc().addresses())
            .chain(self.bcc().addresses())
        {
            if !seen.contains(&address) {
                seen.push(address);
            }
        }
        seen
    }
}

/// Plain structured message used by the bundled transports and the CLI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Sender mailboxes
    #[serde(default)]
    pub from: AddressMap,

    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub to: AddressMap,

    #[serde(default)]
    pub cc: AddressMap,

    #[serde(default)]
    pub bcc: AddressMap,
}

impl OutboundMessage {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn with_from(mut self, from: AddressMap) -> Self {
        self.from = from;
        self
    }

    pub fn with_to(mut self, to: AddressMap) -> Self {
        self.to = to;
        self
    }

    pub fn with_cc(mut self, cc: AddressMap) -> Self {
        self.cc = cc;
        self
    }

    pub fn with_bcc(mut self, bcc: AddressMap) -> Self {
        self.bcc = bcc;
        self
    }
}

impl Message for OutboundMessage {
    fn to(&self) -> &AddressMap {
        &self.to
    }

    fn cc(&self) -> &AddressMap {
        &self.cc
    }

    fn bcc(&self) -> &AddressMap {
        &self.bcc
    }

    fn set_to(&mut self, to: AddressMap) {
        self.to = to;
    }

    fn set_cc(&mut self, cc: AddressMap) {
        self.cc = cc;
    }

    fn set_bcc(&mut self, bcc: AddressMap) {
        self.bcc = bcc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipients_union_without_duplicates() {
        let msg = OutboundMessage::new("hi", "body")
            .with_to(AddressMap::singleton("a@x.org", "A"))
            .with_cc([("b@x.org", ""), ("a@x.org", "")].into_iter().collect())
            .with_bcc(AddressMap::singleton("c@x.org", ""));

        assert_eq!(msg.recipients(), vec!["a@x.org", "b@x.org", "c@x.org"]);
    }

    #[test]
    fn test_setters_replace_wholesale() {
        let mut msg = OutboundMessage::new("hi", "body")
            .with_to([("a@x.org", ""), ("b@x.org", "")].into_iter().collect());
        msg.set_to(AddressMap::singleton("z@x.org", "Z"));
        assert_eq!(msg.to().len(), 1);
        assert_eq!(msg.to().get("z@x.org"), Some("Z"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let msg: OutboundMessage =
            serde_json::from_str(r#"{"subject": "s", "to": ["a@x.org"]}"#).unwrap();
        assert_eq!(msg.subject, "s");
        assert!(msg.cc.is_empty());
        assert!(msg.to.contains("a@x.org"));
    }
}
