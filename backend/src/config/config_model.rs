use darraa_pay_core::domain::value_objects::enums::payment_providers::PaymentProvider;

use super::stage::Stage;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub webhooks: WebhookSecrets,
    pub dev_simulator: DevSimulator,
    pub stage: Stage,
    pub service_name: String,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

/// Shared HMAC secrets, one per provider.
#[derive(Clone)]
pub struct WebhookSecrets {
    pub bankily: String,
    pub sedad: String,
    pub masrvi: String,
}

impl WebhookSecrets {
    pub fn secret_for(&self, provider: PaymentProvider) -> &str {
        match provider {
            PaymentProvider::Bankily => &self.bankily,
            PaymentProvider::Sedad => &self.sedad,
            PaymentProvider::Masrvi => &self.masrvi,
        }
    }
}

// Keep secrets out of `{:?}` output, config gets logged on startup failures.
impl std::fmt::Debug for WebhookSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookSecrets")
            .field("bankily", &"<redacted>")
            .field("sedad", &"<redacted>")
            .field("masrvi", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub struct DevSimulator {
    /// `None` keeps `/simulate/webhook` unmounted even outside production.
    pub secret: Option<String>,
}

impl std::fmt::Debug for DevSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevSimulator")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
