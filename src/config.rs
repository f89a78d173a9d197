// src/config.rs
use serde::Deserialize;
use tracing::info;

pub const N8N_LIVE_URL: &str =
    "https://aclhxamj.rpcld.net/webhook/3ace2731-d228-4c1c-b785-dfd27f31f187";
pub const N8N_TEST_URL: &str =
    "https://aclhxamj.rpcld.net/webhook-test/3ace2731-d228-4c1c-b785-dfd27f31f187";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookTarget {
    Live,
    Test,
}

impl WebhookTarget {
    /// Only a case-insensitive `"true"` selects the test webhook.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(v) if v.eq_ignore_ascii_case("true") => WebhookTarget::Test,
            _ => WebhookTarget::Live,
        }
    }
}

/// Raw view of the environment, as `envy` sees it.
#[derive(Debug, Deserialize)]
struct EnvSettings {
    use_test_webhook: Option<String>,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_live_url")]
    n8n_live_url: String,
    #[serde(default = "default_test_url")]
    n8n_test_url: String,
}

fn default_port() -> u16 {
    5000
}

fn default_live_url() -> String {
    N8N_LIVE_URL.to_string()
}

fn default_test_url() -> String {
    N8N_TEST_URL.to_string()
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub target: WebhookTarget,
    pub live_url: String,
    pub test_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: default_port(),
            target: WebhookTarget::Live,
            live_url: default_live_url(),
            test_url: default_test_url(),
        }
    }
}

impl From<EnvSettings> for Settings {
    fn from(env: EnvSettings) -> Self {
        Self {
            port: env.port,
            target: WebhookTarget::from_flag(env.use_test_webhook.as_deref()),
            live_url: env.n8n_live_url,
            test_url: env.n8n_test_url,
        }
    }
}

impl Settings {
    /// Reads `.env` if present, then the process environment.
    pub fn load() -> Result<Self, envy::Error> {
        if dotenvy::dotenv().is_ok() {
            info!("loaded variables from .env");
        }
        envy::from_env::<EnvSettings>().map(Settings::from)
    }

    pub fn webhook_url(&self) -> &str {
        match self.target {
            WebhookTarget::Live => &self.live_url,
            WebhookTarget::Test => &self.test_url,
        }
    }
}
