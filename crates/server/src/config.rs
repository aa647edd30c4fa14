use std::{collections::HashMap, fs, io::ErrorKind, time::Duration};

use anyhow::{bail, Context};
use tracing::warn;

pub const SETTINGS_FILE: &str = "server.toml";
const MAX_PAGE_SIZE: u32 = 250;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub shop_domain: String,
    pub api_version: String,
    pub access_token: String,
    pub catalog_endpoint: Option<String>,
    pub page_size: u32,
    pub catalog_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            shop_domain: String::new(),
            api_version: "2024-10".into(),
            access_token: String::new(),
            catalog_endpoint: None,
            page_size: 5,
            catalog_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn graphql_endpoint(&self) -> anyhow::Result<String> {
        if let Some(endpoint) = &self.catalog_endpoint {
            return Ok(endpoint.clone());
        }
        let shop = self.shop_domain.trim().trim_end_matches('/');
        if shop.is_empty() {
            bail!("no shop configured: set SHOPIFY_SHOP or APP__CATALOG_ENDPOINT");
        }
        let shop = shop
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        Ok(format!(
            "https://{shop}/admin/api/{}/graphql.json",
            self.api_version
        ))
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog_timeout_secs.max(1))
    }
}

/// Defaults, then `server.toml` if present, then the environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(SETTINGS_FILE) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse {SETTINGS_FILE}"))?,
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {SETTINGS_FILE}"))
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(raw)?;
    let text = |key: &str| -> Option<String> {
        file_cfg.get(key).map(|value| match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    };

    if let Some(v) = text("bind_addr") {
        settings.server_bind = v;
    }
    if let Some(v) = text("shop_domain") {
        settings.shop_domain = v;
    }
    if let Some(v) = text("api_version") {
        settings.api_version = v;
    }
    if let Some(v) = text("access_token") {
        settings.access_token = v;
    }
    if let Some(v) = text("catalog_endpoint") {
        settings.catalog_endpoint = Some(v);
    }
    if let Some(v) = text("page_size") {
        set_page_size(settings, &v);
    }
    if let Some(v) = text("catalog_timeout_secs") {
        set_timeout(settings, &v);
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = var("SHOPIFY_SHOP") {
        settings.shop_domain = v;
    }
    if let Some(v) = var("APP__SHOP_DOMAIN") {
        settings.shop_domain = v;
    }

    if let Some(v) = var("SHOPIFY_ACCESS_TOKEN") {
        settings.access_token = v;
    }
    if let Some(v) = var("APP__ACCESS_TOKEN") {
        settings.access_token = v;
    }

    if let Some(v) = var("APP__API_VERSION") {
        settings.api_version = v;
    }
    if let Some(v) = var("APP__CATALOG_ENDPOINT") {
        settings.catalog_endpoint = Some(v);
    }
    if let Some(v) = var("APP__PAGE_SIZE") {
        set_page_size(settings, &v);
    }
    if let Some(v) = var("APP__CATALOG_TIMEOUT_SECS") {
        set_timeout(settings, &v);
    }
}

fn set_page_size(settings: &mut Settings, raw: &str) {
    match raw.trim().parse::<u32>() {
        Ok(parsed) => settings.page_size = parsed.clamp(1, MAX_PAGE_SIZE),
        Err(_) => warn!(value = raw, "ignoring invalid page size"),
    }
}

fn set_timeout(settings: &mut Settings, raw: &str) {
    match raw.trim().parse::<u64>() {
        Ok(parsed) => settings.catalog_timeout_secs = parsed,
        Err(_) => warn!(value = raw, "ignoring invalid catalog timeout"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
