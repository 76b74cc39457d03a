//! SMTP notification client.
//!
//! Built once at startup from the config's mail block and injected into the
//! routes that send email. When the mail block is incomplete the mailer runs
//! disabled: sends log a warning and report success, so request handling
//! never depends on SMTP availability.

use anyhow::{Context, Result};
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use shared_config::MailConfig;

pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
}

impl Mailer {
    /// Build the transport from the mail config. Falls back to a disabled
    /// mailer when credentials are missing.
    pub fn from_config(config: &MailConfig) -> Result<Self> {
        if !config.is_configured() {
            warn!("Mail settings incomplete, notifications disabled");
            return Ok(Self::disabled());
        }

        // EMAIL_SECURE selects implicit TLS (port 465 style); otherwise the
        // connection is upgraded with STARTTLS.
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .with_context(|| format!("invalid SMTP relay host {}", config.host))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        let from = format!("Smart Health <{}>", config.from)
            .parse::<Mailbox>()
            .with_context(|| format!("invalid EMAIL_FROM address {}", config.from))?;

        Ok(Self {
            transport: Some(transport),
            from: Some(from),
        })
    }

    /// A mailer that accepts sends without doing anything. Used when mail is
    /// not configured, and by tests.
    pub fn disabled() -> Self {
        Self {
            transport: None,
            from: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Send a plain-text message. Returns an error for the caller to log;
    /// callers treat mail as best-effort.
    pub async fn send(&self, to: &str, subject: &str, body: String) -> Result<()> {
        let (Some(transport), Some(from)) = (&self.transport, &self.from) else {
            warn!("Mailer disabled, dropping message to {}", to);
            return Ok(());
        };

        let message = Message::builder()
            .from(from.clone())
            .to(to.parse().with_context(|| format!("invalid recipient {}", to))?)
            .subject(subject)
            .body(body)?;

        transport
            .send(message)
            .await
            .with_context(|| format!("SMTP send to {} failed", to))?;

        info!("Email sent to {}", to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured() -> MailConfig {
        MailConfig {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            secure: false,
            username: String::new(),
            password: String::new(),
            from: String::new(),
        }
    }

    #[test]
    fn missing_credentials_yield_disabled_mailer() {
        let mailer = Mailer::from_config(&unconfigured()).unwrap();
        assert!(!mailer.is_enabled());
    }

    #[tokio::test]
    async fn full_config_yields_enabled_mailer() {
        let config = MailConfig {
            username: "notify@example.com".to_string(),
            password: "app-password".to_string(),
            from: "notify@example.com".to_string(),
            ..unconfigured()
        };

        let mailer = Mailer::from_config(&config).unwrap();
        assert!(mailer.is_enabled());
    }

    #[tokio::test]
    async fn disabled_mailer_accepts_sends() {
        let mailer = Mailer::disabled();
        let result = mailer
            .send("patient@example.com", "Test", "body".to_string())
            .await;
        assert!(result.is_ok());
    }
}
