use super::Settings;
use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::Serialize;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

pub struct WordfreqConfig {
    figment: Figment,
}

impl WordfreqConfig {
    /// Load the layered configuration.
    ///
    /// Priority, lowest first: embedded defaults, user config, repository
    /// config (or only `custom_config` when given), `WORDFREQ_` environment
    /// variables, CLI overrides. `null` entries in the overrides are dropped
    /// so unset flags never mask lower layers.
    pub fn load<T: Serialize>(custom_config: Option<&str>, cli_overrides: Option<T>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            figment = match Self::format_of(custom_path) {
                "json" => figment.merge(Json::file(custom_path)),
                "yaml" => figment.merge(Yaml::file(custom_path)),
                _ => figment.merge(Toml::file(custom_path)),
            };
        } else {
            let user_base = Self::user_config_base_path();
            figment = figment
                .merge(Toml::file(format!("{user_base}.toml")))
                .merge(Json::file(format!("{user_base}.json")))
                .merge(Yaml::file(format!("{user_base}.yaml")))
                .merge(Yaml::file(format!("{user_base}.yml")))
                .merge(Toml::file("wordfreq.toml"))
                .merge(Json::file("wordfreq.json"))
                .merge(Yaml::file("wordfreq.yaml"))
                .merge(Yaml::file("wordfreq.yml"));
        }

        figment = figment.merge(Env::prefixed("WORDFREQ_").split("__"));

        if let Some(overrides) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            let mut value = serde_json::to_value(overrides)
                .context("Failed to serialize CLI overrides")?;
            prune_nulls(&mut value);
            figment = figment.merge(Serialized::defaults(value));
        }

        Ok(WordfreqConfig { figment })
    }

    /// Typed view of every section
    pub fn settings(&self) -> Result<Settings> {
        self.figment
            .extract()
            .context("Invalid wordfreq configuration")
    }

    /// Get a nested object/section as JSON
    pub fn get_section(&self, path: &str) -> Result<serde_json::Value> {
        Ok(self.figment.extract_inner(path)?)
    }

    /// Get the full merged configuration as a structured value
    pub fn get_full_config(&self) -> Result<serde_json::Value> {
        Ok(self.figment.extract()?)
    }

    fn format_of(path: &str) -> &'static str {
        match std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some("json") => "json",
            Some("yaml") | Some("yml") => "yaml",
            _ => "toml",
        }
    }

    fn user_config_base_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/wordfreq/config", home),
            Err(_) => "~/.config/wordfreq/config".to_string(),
        }
    }
}

fn prune_nulls(value: &mut serde_json::Value) {
    if let serde_json::Value::Object(map) = value {
        map.retain(|_, v| !v.is_null());
        for v in map.values_mut() {
            prune_nulls(v);
        }
        map.retain(|_, v| !matches!(v, serde_json::Value::Object(inner) if inner.is_empty()));
    }
}
