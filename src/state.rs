// src/state.rs
use std::sync::Arc;

use crate::config::Settings;
use crate::services::webhook::WebhookClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub settings: Settings,
    pub webhook: WebhookClient,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, reqwest::Error> {
        Ok(Self {
            settings,
            webhook: WebhookClient::new()?,
        })
    }
}
