use anyhow::{Context, Result};

use super::{
    config_model::{Database, DevSimulator, DotEnvyConfig, Server, WebhookSecrets},
    stage::Stage,
};

const DEFAULT_SERVICE_NAME: &str = "darraa-pay-backend";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();
    load_from(|key| std::env::var(key).ok())
}

pub(crate) fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<DotEnvyConfig> {
    let server = Server {
        port: lookup("SERVER_PORT")
            .unwrap_or_else(|| "4000".to_string())
            .parse()
            .context("SERVER_PORT is invalid")?,
        body_limit: lookup("SERVER_BODY_LIMIT")
            .unwrap_or_else(|| "1".to_string())
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: lookup("SERVER_TIMEOUT")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let database = Database {
        url: required(&lookup, "DATABASE_URL")?,
    };

    let webhooks = WebhookSecrets {
        bankily: required(&lookup, "BANKILY_SECRET")?,
        sedad: required(&lookup, "SEDAD_SECRET")?,
        masrvi: required(&lookup, "MASRVI_SECRET")?,
    };

    let dev_simulator = DevSimulator {
        secret: lookup("DEV_WEBHOOK_SECRET").filter(|v| !v.is_empty()),
    };

    // An unset STAGE means local; a misspelt one must not silently become local
    // and expose the simulator.
    let stage = match lookup("STAGE").filter(|v| !v.trim().is_empty()) {
        Some(raw) => Stage::try_from(&raw).context("STAGE is invalid")?,
        None => Stage::default(),
    };

    let service_name = lookup("SERVICE_NAME")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

    Ok(DotEnvyConfig {
        server,
        database,
        webhooks,
        dev_simulator,
        stage,
        service_name,
    })
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|v| !v.is_empty())
        .with_context(|| format!("{} is invalid", key))
}
