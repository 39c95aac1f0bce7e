//! OTP email delivery node
//!
//! One invocation resolves the recipient (at most once per session),
//! renders the body, appends the passcode and makes a single send attempt.
//! Every failure ends the invocation; retries belong to the tree engine.

use crate::config::NodeConfig;
use crate::content::{ContentFetcher, ContentSource, ContentSourceError, HttpContentFetcher};
use crate::domain::{EmailAddress, EmailMessage, SharedState, StateKey};
use crate::email::{EmailProviderFactory, SmtpProviderFactory, TemplateEngine};
use crate::error::{FailureKind, NodeError, Result};
use crate::i18n::{Locale, MessageCatalog, MESSAGE_SUBJECT, OTP_LABEL};
use crate::identity::{AddressResolver, IdentityStore, IdentityStoreError};
use metrics::counter;
use std::error::Error as _;
use std::sync::Arc;

/// Realm used when the shared state carries none
pub const ROOT_REALM: &str = "/";

/// Failure reported to the tree engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFailure {
    pub kind: FailureKind,
    /// Localized, user-facing text
    pub message: String,
    /// Technical cause, for logs only
    pub cause: Option<String>,
}

/// Terminal result of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Continue to the next tree step with the updated shared state
    Success,
    Failure(NodeFailure),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn failure(&self) -> Option<&NodeFailure> {
        match self {
            Self::Success => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

/// The delivery pipeline behind the node
pub struct DeliveryPipeline {
    config: NodeConfig,
    resolver: AddressResolver,
    content: ContentSource,
    provider_factory: Arc<dyn EmailProviderFactory>,
    catalog: MessageCatalog,
}

impl DeliveryPipeline {
    /// Build a pipeline with injected capabilities
    pub fn new(
        config: NodeConfig,
        identity_store: Arc<dyn IdentityStore>,
        fetcher: Arc<dyn ContentFetcher>,
        provider_factory: Arc<dyn EmailProviderFactory>,
    ) -> Self {
        let resolver = AddressResolver::new(identity_store, config.email_attribute());
        let content = ContentSource::new(
            config.content_mode,
            config.content_value.clone(),
            fetcher,
        );

        Self {
            config,
            resolver,
            content,
            provider_factory,
            catalog: MessageCatalog::embedded(),
        }
    }

    /// Build a pipeline using HTTP content fetching and SMTP delivery
    pub fn with_defaults(
        config: NodeConfig,
        identity_store: Arc<dyn IdentityStore>,
    ) -> std::result::Result<Self, ContentSourceError> {
        let fetcher = HttpContentFetcher::new(&config.probe)?;
        Ok(Self::new(
            config,
            identity_store,
            Arc::new(fetcher),
            Arc::new(SmtpProviderFactory),
        ))
    }

    /// Replace the embedded message catalog
    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Run the node once against the session's shared state.
    ///
    /// A newly resolved email address stays in `state` even when a later
    /// stage fails.
    pub async fn process<S>(&self, state: &mut S, locale: &Locale) -> Outcome
    where
        S: SharedState + ?Sized,
    {
        tracing::debug!("OTP mail node started");

        match self.deliver(state, locale).await {
            Ok(()) => {
                counter!("otp_mail_deliveries_total", "result" => "success").increment(1);
                Outcome::Success
            }
            Err(err) => {
                let kind = err.kind();
                counter!("otp_mail_deliveries_total", "result" => kind.as_str()).increment(1);
                tracing::warn!(kind = %kind, error = %err, "OTP mail delivery failed");

                Outcome::Failure(NodeFailure {
                    kind,
                    message: self.catalog.get(locale, kind.message_key()).to_string(),
                    cause: err.source().map(|source| source.to_string()),
                })
            }
        }
    }

    async fn deliver<S>(&self, state: &mut S, locale: &Locale) -> Result<()>
    where
        S: SharedState + ?Sized,
    {
        let cached = state.get(StateKey::EmailAddress).map(str::to_string);
        let to_address = match cached {
            Some(address) => address,
            None => {
                let address = self.resolve_address(state).await?;
                state.set(StateKey::EmailAddress, address.clone());
                address
            }
        };

        let otp = state
            .get(StateKey::OneTimePassword)
            .map(str::to_string)
            .ok_or_else(|| {
                tracing::warn!("oneTimePasswordNotFound");
                NodeError::OtpNotFound
            })?;

        let body = self.content.render().await?;
        let message = EmailMessage::new(
            EmailAddress::new(self.config.from_email.clone()),
            EmailAddress::new(to_address),
            self.subject(state, locale),
            compose_body(&body, self.catalog.get(locale, OTP_LABEL), &otp),
        );

        tracing::debug!(
            from = %message.from.email,
            to = %message.to.email,
            "Sending one time password"
        );

        let provider = self.provider_factory.create(&self.config.smtp)?;
        let result = provider.send(&message).await?;

        tracing::info!(
            to = %message.to.email,
            provider = provider.provider_name(),
            message_id = ?result.message_id,
            "One time password email sent"
        );

        Ok(())
    }

    async fn resolve_address<S>(&self, state: &S) -> Result<String>
    where
        S: SharedState + ?Sized,
    {
        let username = state.get(StateKey::Username).ok_or_else(|| {
            NodeError::IdentityLookup(IdentityStoreError::InvalidQuery(format!(
                "{} missing from shared state",
                StateKey::Username
            )))
        })?;
        let realm = state.get(StateKey::Realm).unwrap_or(ROOT_REALM);

        self.resolver.resolve(username, realm).await
    }

    fn subject<S>(&self, state: &S, locale: &Locale) -> String
    where
        S: SharedState + ?Sized,
    {
        match &self.config.subject {
            Some(template) => {
                let mut engine = TemplateEngine::new();
                for key in [StateKey::Username, StateKey::Realm] {
                    if let Some(value) = state.get(key) {
                        engine.set(key.as_str(), value);
                    }
                }
                engine.render(template)
            }
            None => self.catalog.get(locale, MESSAGE_SUBJECT).to_string(),
        }
    }
}

/// `<body> \n \n <label>: <otp>`
pub fn compose_body(body: &str, otp_label: &str, otp: &str) -> String {
    format!("{} \n \n {}: {}", body, otp_label, otp)
}
