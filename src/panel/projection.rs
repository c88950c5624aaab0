//! pure projections: entity -> display strings
//! nothing here touches the panel, the sync cycles write the results in

use crate::common::error::{ErrorCode, SyncError};
use crate::entity::bo::state_bo::{AnalogOutputBo, EnvironmentBo, I2cDeviceBo, PeerCountBo};
use crate::entity::dto::ethernet_dto::EthernetStatusDto;
use crate::entity::dto::sysinfo_dto::{BatteryInfoDto, BoardInfoDto, NetworkInfoDto, ResourceInfoDto, SystemInfoDto};
use super::panel::{
    BatterySection, BoardSection, EthernetStatusSection, Indicator, NetworkSection, ResourceSection, ScanRow, SysInfoView,
    PLACEHOLDER,
};

pub const SCAN_BUTTON_IDLE: &str = "Scan I2C Bus";
pub const SCAN_BUTTON_BUSY: &str = "Scanning...";
pub const SCAN_IN_PROGRESS: &str = "Scanning I2C bus, please wait...";
pub const SCAN_NO_DEVICES: &str = "Scan complete. No I2C devices found.";
pub const SCAN_INVALID: &str = "Error performing scan or invalid response.";
pub const SYSINFO_MANUAL_FAILURE: &str = "Error fetching system information. Please try again.";
pub const ETHERNET_SAVED: &str = "Configuration saved successfully";
pub const ETHERNET_SAVED_BAD_REPLY: &str = "Configuration saved, but response had invalid format";
pub const ETHERNET_SAVE_FAILED: &str = "Failed to save configuration";

// controls

pub fn led_status_text(on: bool) -> String {
    format!("LED Status: {}", if on { "ON" } else { "OFF" })
}

pub fn dac_value_text(dac: &AnalogOutputBo) -> String {
    format!("DAC Value: {}", dac.value())
}

pub fn voltage_text(dac: &AnalogOutputBo) -> String {
    format!("Voltage: {:.2}V", dac.voltage())
}

/// (temperature, humidity); a sensor that is not ready never shows numbers
pub fn sensor_texts(env: &EnvironmentBo) -> (String, String) {
    let show = |v: Option<f64>| match v {
        Some(v) if env.ready => format!("{:.1}", v),
        _ => PLACEHOLDER.to_string(),
    };
    (show(env.temperature), show(env.humidity))
}

/// (count, indicator, text)
pub fn peer_projection(peers: &PeerCountBo) -> (String, Indicator, String) {
    if peers.others_connected() {
        (peers.0.to_string(), Indicator::Green, "Other client(s) connected.".to_string())
    } else {
        (peers.0.to_string(), Indicator::Red, "No other clients connected.".to_string())
    }
}

// scanner

pub fn scan_found_text(count: usize) -> String {
    format!(
        "Scan complete. Found {} device{} on the I2C bus.",
        count,
        if count > 1 { "s" } else { "" }
    )
}

pub fn scan_rows(devices: &[I2cDeviceBo]) -> Vec<ScanRow> {
    devices
        .iter()
        .map(|d| ScanRow { decimal: d.address.to_string(), hex: d.hex_address.clone() })
        .collect()
}

/// one status text per terminal failure cause
pub fn scan_failure_text(err: &SyncError) -> String {
    match err.code {
        ErrorCode::TimeoutError => "Scan request timed out. Please try again.".to_string(),
        ErrorCode::HttpStatusError => format!(
            "Error performing scan. Server returned status {}",
            err.status.map(|s| s.to_string()).unwrap_or_else(|| PLACEHOLDER.to_string())
        ),
        ErrorCode::PayloadError => "Error parsing scan results.".to_string(),
        _ => "Network error during scan. Please try again.".to_string(),
    }
}

// ethernet

pub fn ethernet_status_section(dto: &EthernetStatusDto) -> EthernetStatusSection {
    let show = |v: &Option<String>| match v {
        Some(s) if !s.is_empty() => s.clone(),
        _ => "-".to_string(),
    };
    let (indicator, connection_text) = if dto.connected {
        (Indicator::Green, "Connected")
    } else {
        (Indicator::Red, "Disconnected")
    };
    EthernetStatusSection {
        indicator,
        connection_text: connection_text.to_string(),
        ip_address: show(&dto.ip),
        subnet_mask: show(&dto.subnet),
        gateway: show(&dto.gateway),
        dns_server: show(&dto.dns),
    }
}

pub fn ethernet_status_failure_text(err: &SyncError) -> &'static str {
    match err.code {
        ErrorCode::HttpStatusError => "Failed to fetch Ethernet status. Check if hardware is connected.",
        ErrorCode::TimeoutError => "Request timed out. Check hardware connection.",
        ErrorCode::PayloadError => "Error processing Ethernet status data",
        _ => "Network error. Check hardware connection.",
    }
}

/// transport level save failures; http errors carry the server text instead
pub fn ethernet_save_failure_text(err: &SyncError) -> &'static str {
    match err.code {
        ErrorCode::TimeoutError => "Request timed out while saving configuration",
        _ => "Network error while saving configuration",
    }
}

// system info

pub fn rssi_quality(rssi: i32) -> &'static str {
    if rssi > -50 {
        "Excellent"
    } else if rssi > -60 {
        "Good"
    } else if rssi > -70 {
        "Fair"
    } else {
        "Poor"
    }
}

/// "1 days, 2 hours, 3 minutes, 4 seconds", leading zero units left out
pub fn format_uptime(uptime: u64) -> String {
    let days = uptime / 86400;
    let hours = (uptime % 86400) / 3600;
    let minutes = (uptime % 3600) / 60;
    let seconds = uptime % 60;

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{} days, ", days));
    }
    if hours > 0 || days > 0 {
        out.push_str(&format!("{} hours, ", hours));
    }
    if minutes > 0 || hours > 0 || days > 0 {
        out.push_str(&format!("{} minutes, ", minutes));
    }
    out.push_str(&format!("{} seconds", seconds));
    out
}

fn text_or_placeholder(v: &Option<String>) -> String {
    match v {
        Some(s) if !s.is_empty() => s.clone(),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn network_section(network: Option<&NetworkInfoDto>) -> NetworkSection {
    let network = match network {
        Some(n) => n,
        None => return NetworkSection::default(),
    };
    NetworkSection {
        wifi_mode: text_or_placeholder(&network.mode),
        ip_address: text_or_placeholder(&network.ip),
        mac_address: text_or_placeholder(&network.mac),
        wifi_ssid: text_or_placeholder(&network.ssid),
        wifi_rssi: network
            .rssi
            .map(|rssi| format!("{} dBm ({})", rssi, rssi_quality(rssi)))
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
    }
}

pub fn resource_section(resources: Option<&ResourceInfoDto>) -> ResourceSection {
    let res = match resources {
        Some(r) => r,
        None => return ResourceSection::default(),
    };
    let mut section = ResourceSection {
        cpu_freq: match res.cpu_freq {
            Some(freq) => format!("{} MHz", freq),
            None => format!("{} MHz", PLACEHOLDER),
        },
        ..ResourceSection::default()
    };

    if let (Some(free), Some(total)) = (res.free_ram, res.total_ram) {
        let used = total - free;
        let used_percent = if total > 0.0 { used / total * 100.0 } else { 0.0 };
        section.free_ram = format!("{:.2} KB (of {:.2} KB)", free, total);
        section.used_ram = format!("{:.2} KB ({:.1}%)", used, used_percent);
    }

    if let Some(flash) = res.flash_size {
        let units = res.flash_size_units.as_deref().unwrap_or("MB");
        section.flash_size = format!("{:.2} {}", flash, units);
        if let (Some(sketch), Some(percent)) = (res.sketch_size, res.flash_used_percent) {
            let sketch_units = res.sketch_size_units.as_deref().unwrap_or("KB");
            section.flash_usage = format!("{:.2} {} ({:.1}%)", sketch, sketch_units, percent);
        }
    }
    section
}

pub fn board_section(board: Option<&BoardInfoDto>) -> BoardSection {
    let board = match board {
        Some(b) => b,
        None => return BoardSection::default(),
    };
    BoardSection {
        chip_model: text_or_placeholder(&board.chip_model),
        chip_revision: board.chip_revision.map(|r| r.to_string()).unwrap_or_else(|| PLACEHOLDER.to_string()),
        sdk_version: text_or_placeholder(&board.sdk_version),
        uptime: board.uptime.map(format_uptime).unwrap_or_else(|| PLACEHOLDER.to_string()),
    }
}

pub fn battery_section(battery: Option<&BatteryInfoDto>) -> BatterySection {
    let battery = match battery {
        Some(b) => b,
        None => return BatterySection::default(),
    };
    let connected = battery.connected;
    let pending = if connected { "Calculating..." } else { "N/A" };
    BatterySection {
        connected: if connected { "Yes" } else { "No" }.to_string(),
        percentage: match battery.percentage {
            Some(p) if connected => format!("{:.1}%", p),
            _ => pending.to_string(),
        },
        voltage: match battery.voltage {
            Some(v) if connected => format!("{:.2} V", v),
            _ => pending.to_string(),
        },
        power_source: if battery.usb_powered.unwrap_or(false) || !connected { "USB" } else { "Battery" }.to_string(),
        charging: match battery.charging {
            Some(c) if connected => if c { "Charging" } else { "Not Charging" }.to_string(),
            _ => "N/A".to_string(),
        },
    }
}

/// whole bundle, a missing section renders placeholders
pub fn sysinfo_view(info: &SystemInfoDto) -> SysInfoView {
    SysInfoView {
        network: network_section(info.network.as_ref()),
        resources: resource_section(info.resources.as_ref()),
        board: board_section(info.board.as_ref()),
        battery: battery_section(info.battery.as_ref()),
    }
}
