//! setting config file
//! layered from `config_{ENV}.toml` (optional) and `PANEL__SECTION__KEY` environment variables

use std::env;
use std::time::Duration;
use lazy_static::lazy_static;
use serde_derive::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Env {
    pub env: String,
    pub log_level: String,
}

impl Default for Env {
    fn default() -> Self {
        Env { env: "dev".to_string(), log_level: "info".to_string() }
    }
}

/// where the device web server lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Device {
    pub host: String,
    pub port: u16,
}

impl Default for Device {
    fn default() -> Self {
        // soft AP address of the board
        Device { host: "192.168.4.1".to_string(), port: 80 }
    }
}

impl Device {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// per request timeouts, independent of the polling cadence
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Timeout {
    pub default_ms: u64,
    pub ethernet_status_ms: u64,
    pub sysinfo_ms: u64,
    pub scan_ms: u64,
}

impl Default for Timeout {
    fn default() -> Self {
        Timeout {
            default_ms: 5000,
            ethernet_status_ms: 5000,
            sysinfo_ms: 10000,
            scan_ms: 15000,
        }
    }
}

impl Timeout {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_ms)
    }

    pub fn ethernet_status(&self) -> Duration {
        Duration::from_millis(self.ethernet_status_ms)
    }

    pub fn sysinfo(&self) -> Duration {
        Duration::from_millis(self.sysinfo_ms)
    }

    pub fn scan(&self) -> Duration {
        Duration::from_millis(self.scan_ms)
    }
}

/// polling cadence, 0 disables the timer
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Poll {
    pub clients_ms: u64,
    pub sensor_ms: u64,
    pub sysinfo_ms: u64,
    pub ethernet_status_ms: u64,
    pub blur_grace_ms: u64,
}

impl Default for Poll {
    fn default() -> Self {
        Poll {
            clients_ms: 2000,
            sensor_ms: 2000,
            sysinfo_ms: 1000,
            ethernet_status_ms: 5000,
            blur_grace_ms: 100,
        }
    }
}

impl Poll {
    pub fn period(millis: u64) -> Option<Duration> {
        if millis == 0 {
            None
        } else {
            Some(Duration::from_millis(millis))
        }
    }

    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Panel {
    pub initial_tab: String,
}

impl Default for Panel {
    fn default() -> Self {
        Panel { initial_tab: "controls".to_string() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub env: Env,
    pub device: Device,
    pub timeout: Timeout,
    pub poll: Poll,
    pub panel: Panel,
}

impl Settings {
    /// build settings from the config file picked by `ENV` and the environment overlay
    pub fn load() -> Result<Self, config::ConfigError> {
        let env_name = env::var("ENV").unwrap_or_else(|_| String::from("dev"));
        let file_name = format!("config_{}", env_name);

        let settings: Settings = config::Config::builder()
            .add_source(config::File::with_name(file_name.as_str()).required(false))
            .add_source(
                config::Environment::with_prefix("PANEL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn get<'a>() -> &'a Self {
        lazy_static! {
            static ref CACHE: Settings = Settings::load().unwrap_or_else(|e| {
                // logger is not up yet
                eprintln!("cannot load settings, falling back to defaults: {}", e);
                Settings::default()
            });
        }
        &CACHE
    }
}
