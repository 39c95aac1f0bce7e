//! Email message domain types

/// Email address with optional display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    pub email: String,
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    /// Mailbox notation accepted by the SMTP message builder
    pub fn to_mailbox_string(&self) -> String {
        match &self.name {
            Some(name) => format!("{} <{}>", name, self.email),
            None => self.email.clone(),
        }
    }
}

/// Email message to be sent
///
/// The body is delivered as `text/html`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: EmailAddress,
    pub to: EmailAddress,
    pub subject: String,
    pub html_body: String,
}

impl EmailMessage {
    pub fn new(
        from: EmailAddress,
        to: EmailAddress,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            from,
            to,
            subject: subject.into(),
            html_body: html_body.into(),
        }
    }
}

/// Result of sending an email
#[derive(Debug)]
pub struct EmailSendResult {
    pub message_id: Option<String>,
}

impl EmailSendResult {
    pub fn success(message_id: Option<String>) -> Self {
        Self { message_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_address() {
        let addr = EmailAddress::new("test@example.com");
        assert_eq!(addr.email, "test@example.com");
        assert!(addr.name.is_none());
        assert_eq!(addr.to_mailbox_string(), "test@example.com");

        let addr = EmailAddress {
            email: "test@example.com".to_string(),
            name: Some("Test User".to_string()),
        };
        assert_eq!(addr.to_mailbox_string(), "Test User <test@example.com>");
    }

    #[test]
    fn test_email_message() {
        let msg = EmailMessage::new(
            EmailAddress::new("noreply@example.com"),
            EmailAddress::new("to@example.com"),
            "Subject",
            "<p>Hello</p>",
        );

        assert_eq!(msg.from.email, "noreply@example.com");
        assert_eq!(msg.to.email, "to@example.com");
        assert_eq!(msg.subject, "Subject");
        assert_eq!(msg.html_body, "<p>Hello</p>");
    }

    #[test]
    fn test_email_send_result() {
        let result = EmailSendResult::success(Some("msg-123".to_string()));
        assert_eq!(result.message_id.as_deref(), Some("msg-123"));
    }
}
