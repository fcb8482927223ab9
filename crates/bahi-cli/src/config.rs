// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use bahi_app::{DEFAULT_OWNER_CONTACT, DEFAULT_SHOP_NAME, PlatformFamily, Theme};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const PLATFORM_AUTO: &str = "auto";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub shop: Shop,
    #[serde(default)]
    pub sms: Sms,
    #[serde(default)]
    pub ui: Ui,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
            shop: Shop::default(),
            sms: Sms::default(),
            ui: Ui::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Shop {
    pub name: Option<String>,
    pub owner_contact: Option<String>,
}

impl Default for Shop {
    fn default() -> Self {
        Self {
            name: Some(DEFAULT_SHOP_NAME.to_owned()),
            owner_contact: Some(DEFAULT_OWNER_CONTACT.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sms {
    pub platform: Option<String>,
}

impl Default for Sms {
    fn default() -> Self {
        Self {
            platform: Some(PLATFORM_AUTO.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub theme: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            theme: Some(Theme::Light.as_str().to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("BAHI_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set BAHI_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(bahi_db::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [storage], [shop], [sms], and [ui]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1. Run `bahi --print-example-config` for a template",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(db_path) = &self.storage.db_path {
            bahi_db::validate_db_path(db_path)?;
        }

        if let Some(name) = &self.shop.name
            && name.trim().is_empty()
        {
            bail!("shop.name in {} must not be blank", path.display());
        }

        if let Some(contact) = &self.shop.owner_contact
            && contact.trim().is_empty()
        {
            bail!(
                "shop.owner_contact in {} must not be blank; reminders are sent to this number",
                path.display()
            );
        }

        if let Some(platform) = &self.sms.platform
            && platform != PLATFORM_AUTO
            && PlatformFamily::parse(platform).is_none()
        {
            bail!(
                "sms.platform in {} must be one of auto, ios, android, desktop; got {platform:?}",
                path.display()
            );
        }

        if let Some(theme) = &self.ui.theme
            && Theme::parse(theme).is_none()
        {
            bail!(
                "ui.theme in {} must be light or dark; got {theme:?}",
                path.display()
            );
        }

        Ok(())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => bahi_db::default_db_path(),
        }
    }

    pub fn shop_name(&self) -> &str {
        self.shop
            .name
            .as_deref()
            .map(str::trim)
            .unwrap_or(DEFAULT_SHOP_NAME)
    }

    pub fn owner_contact(&self) -> &str {
        self.shop
            .owner_contact
            .as_deref()
            .map(str::trim)
            .unwrap_or(DEFAULT_OWNER_CONTACT)
    }

    /// Configured family, or the one matching the host OS for `auto`.
    pub fn platform(&self) -> PlatformFamily {
        self.sms
            .platform
            .as_deref()
            .and_then(PlatformFamily::parse)
            .unwrap_or_else(PlatformFamily::detect)
    }

    pub fn theme(&self) -> Theme {
        self.ui
            .theme
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or_default()
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# bahi config\n# Place this file at: {}\n\nversion = 1\n\n[storage]\n# Optional. Default is platform data dir (for example ~/.local/share/bahi/bahi.db)\n# db_path = \"/absolute/path/to/bahi.db\"\n\n[shop]\nname = \"{}\"\n# Every reminder goes to this number.\nowner_contact = \"{}\"\n\n[sms]\n# auto, ios, android or desktop\nplatform = \"auto\"\n\n[ui]\n# Used until a theme is toggled and saved.\ntheme = \"light\"\n",
            path.display(),
            DEFAULT_SHOP_NAME,
            DEFAULT_OWNER_CONTACT,
        )
    }
}
