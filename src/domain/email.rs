/// Sender identity for messages addressed to customers.
pub const CONFIRMATION_SENDER: &str = "HomiFi <noreply@homifi.ae>";
/// Sender identity for messages addressed to the HomiFi team.
pub const NOTIFICATION_SENDER: &str = "HomiFi Website <website@homifi.ae>";
pub const REPLY_TO: &str = "info@homifi.ae";
pub const INTERNAL_INBOX: &str = "info@homifi.ae";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) reply_to: String,
    pub(crate) subject: String,
    pub(crate) html: String,
    pub(crate) text: String,
}

impl OutboundEmail {
    #[must_use]
    pub fn sender(&self) -> &str {
        &self.from
    }

    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    #[must_use]
    pub fn reply_to(&self) -> &str {
        &self.reply_to
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
