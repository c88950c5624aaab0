//! panel model
//! single owner of everything the operator sees: texts, indicators, the ethernet draft, alerts
//! sync cycles write into it, the console renders it

use std::sync::{Arc, Mutex, MutexGuard};
use crate::entity::bo::network_config_bo::NetworkConfigBo;
use super::tab::Tab;

/// neutral value for anything not known yet or not applicable
pub const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Green,
    Red,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlsView {
    pub led_status: String,
    pub dac_slider: u8,
    pub dac_value: String,
    pub voltage: String,
    pub temperature: String,
    pub humidity: String,
    pub client_count: String,
    pub connection: Indicator,
    pub connection_text: String,
}

impl Default for ControlsView {
    fn default() -> Self {
        ControlsView {
            led_status: format!("LED Status: {}", PLACEHOLDER),
            dac_slider: 0,
            dac_value: format!("DAC Value: {}", PLACEHOLDER),
            voltage: format!("Voltage: {}", PLACEHOLDER),
            temperature: PLACEHOLDER.to_string(),
            humidity: PLACEHOLDER.to_string(),
            client_count: PLACEHOLDER.to_string(),
            connection: Indicator::Red,
            connection_text: PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRow {
    pub decimal: String,
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScannerView {
    pub button_enabled: bool,
    pub button_label: String,
    pub status: String,
    pub table_visible: bool,
    pub rows: Vec<ScanRow>,
}

impl Default for ScannerView {
    fn default() -> Self {
        ScannerView {
            button_enabled: true,
            button_label: "Scan I2C Bus".to_string(),
            status: String::new(),
            table_visible: false,
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSection {
    pub wifi_mode: String,
    pub ip_address: String,
    pub mac_address: String,
    pub wifi_ssid: String,
    pub wifi_rssi: String,
}

impl Default for NetworkSection {
    fn default() -> Self {
        NetworkSection {
            wifi_mode: PLACEHOLDER.to_string(),
            ip_address: PLACEHOLDER.to_string(),
            mac_address: PLACEHOLDER.to_string(),
            wifi_ssid: PLACEHOLDER.to_string(),
            wifi_rssi: PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSection {
    pub cpu_freq: String,
    pub free_ram: String,
    pub used_ram: String,
    pub flash_size: String,
    pub flash_usage: String,
}

impl Default for ResourceSection {
    fn default() -> Self {
        ResourceSection {
            cpu_freq: PLACEHOLDER.to_string(),
            free_ram: PLACEHOLDER.to_string(),
            used_ram: PLACEHOLDER.to_string(),
            flash_size: PLACEHOLDER.to_string(),
            flash_usage: PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardSection {
    pub chip_model: String,
    pub chip_revision: String,
    pub sdk_version: String,
    pub uptime: String,
}

impl Default for BoardSection {
    fn default() -> Self {
        BoardSection {
            chip_model: PLACEHOLDER.to_string(),
            chip_revision: PLACEHOLDER.to_string(),
            sdk_version: PLACEHOLDER.to_string(),
            uptime: PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatterySection {
    pub connected: String,
    pub percentage: String,
    pub voltage: String,
    pub power_source: String,
    pub charging: String,
}

impl Default for BatterySection {
    fn default() -> Self {
        BatterySection {
            connected: PLACEHOLDER.to_string(),
            percentage: PLACEHOLDER.to_string(),
            voltage: PLACEHOLDER.to_string(),
            power_source: PLACEHOLDER.to_string(),
            charging: PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SysInfoView {
    pub network: NetworkSection,
    pub resources: ResourceSection,
    pub board: BoardSection,
    pub battery: BatterySection,
}

/// read-only mirror of the device reported ethernet state
#[derive(Debug, Clone, PartialEq)]
pub struct EthernetStatusSection {
    pub indicator: Indicator,
    pub connection_text: String,
    pub ip_address: String,
    pub subnet_mask: String,
    pub gateway: String,
    pub dns_server: String,
}

impl Default for EthernetStatusSection {
    fn default() -> Self {
        EthernetStatusSection {
            indicator: Indicator::Red,
            connection_text: PLACEHOLDER.to_string(),
            ip_address: "-".to_string(),
            subnet_mask: "-".to_string(),
            gateway: "-".to_string(),
            dns_server: "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelMessage {
    pub text: String,
    pub success: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EthernetView {
    pub status: EthernetStatusSection,
    // operator owned draft
    pub form: NetworkConfigBo,
    pub message: Option<PanelMessage>,
}

impl EthernetView {
    pub fn show_message(&mut self, text: &str, success: bool) {
        self.message = Some(PanelMessage { text: text.to_string(), success });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub active_tab: Tab,
    pub controls: ControlsView,
    pub scanner: ScannerView,
    pub sysinfo: SysInfoView,
    pub ethernet: EthernetView,
    // blocking alerts waiting to be shown
    pub alerts: Vec<String>,
}

impl Default for Panel {
    fn default() -> Self {
        Panel {
            active_tab: Tab::Controls,
            controls: ControlsView::default(),
            scanner: ScannerView::default(),
            sysinfo: SysInfoView::default(),
            ethernet: EthernetView::default(),
            alerts: Vec::new(),
        }
    }
}

impl Panel {
    pub fn alert(&mut self, text: &str) {
        self.alerts.push(text.to_string());
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}

pub type SharedPanel = Arc<Mutex<Panel>>;

pub fn shared_panel() -> SharedPanel {
    Arc::new(Mutex::new(Panel::default()))
}

/// lock the panel, a poisoned lock still holds a usable panel
pub fn lock_panel(panel: &SharedPanel) -> MutexGuard<'_, Panel> {
    panel.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
