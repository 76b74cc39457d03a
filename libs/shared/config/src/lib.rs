use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub frontend_url: String,
    pub backend_url: String,
    pub database_url: String,
    pub database_api_key: String,
    pub mail: MailConfig,
}

/// SMTP settings for the notification mailer.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let config = Self {
            port,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("DATABASE_URL not set, using empty value");
                    String::new()
                }),
            database_api_key: env::var("DATABASE_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("DATABASE_API_KEY not set, using empty value");
                    String::new()
                }),
            mail: MailConfig::from_env(),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.database_url.is_empty() && !self.database_api_key.is_empty()
    }
}

impl MailConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("EMAIL_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            port: env::var("EMAIL_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            secure: env::var("EMAIL_SECURE").map(|v| v == "true").unwrap_or(false),
            username: env::var("EMAIL_USER").unwrap_or_else(|_| {
                warn!("EMAIL_USER not set, mail notifications disabled");
                String::new()
            }),
            // Deployments have used both names for the app password.
            password: env::var("EMAIL_PASS")
                .or_else(|_| env::var("EMAIL_PASSWORD"))
                .unwrap_or_default(),
            from: env::var("EMAIL_FROM").unwrap_or_default(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty() && !self.from.is_empty()
    }
}
