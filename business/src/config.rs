use std::any::Any;
use std::env::vars;

use anyhow::Context as _;
use chrono::TimeDelta;
use roster_states::{State, state_assign_impl};
use serde::Deserialize;
use ustr::Ustr;

const DEFAULT_TOAST_SECONDS: u64 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
    /// How long a toast stays on screen.
    pub toast_seconds: u64,
}

/// Environment variables, matched case-insensitively by `serde-env`.
#[derive(Debug, Deserialize)]
struct RawConfig {
    roster_api_base_url: Option<String>,
    roster_toast_seconds: Option<u64>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads `ROSTER_API_BASE_URL` and `ROSTER_TOAST_SECONDS`, falling back to
    /// [`BusinessConfig::default`] for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let raw: RawConfig = serde_env::from_iter(vars())
            .context("Failed to parse ROSTER_* environment variables")?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(base) = raw.roster_api_base_url {
            config.api_base_url = base.trim_end_matches('/').to_owned();
        }
        if let Some(seconds) = raw.roster_toast_seconds {
            anyhow::ensure!(seconds > 0, "ROSTER_TOAST_SECONDS must be positive");
            config.toast_seconds = seconds;
        }

        Ok(config)
    }

    pub fn api_url(&self) -> Ustr {
        if self.api_base_url.is_empty() {
            Ustr::from("/api")
        } else {
            Ustr::from(&format!("{}/api", self.api_base_url))
        }
    }

    pub fn toast_ttl(&self) -> TimeDelta {
        let seconds = i64::try_from(self.toast_seconds).unwrap_or(i64::MAX / 1000);
        TimeDelta::try_seconds(seconds).unwrap_or(TimeDelta::MAX)
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: if cfg!(target_arch = "wasm32") {
                String::new()
            } else {
                "http://localhost:8080".to_owned()
            },
            toast_seconds: DEFAULT_TOAST_SECONDS,
        }
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
