//! `/sysinfo` payload
//! every section and every field is optional, a missing section means "not applicable on this board"

use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInfoDto {
    #[serde(default)]
    pub network: Option<NetworkInfoDto>,
    #[serde(default)]
    pub resources: Option<ResourceInfoDto>,
    #[serde(default)]
    pub board: Option<BoardInfoDto>,
    #[serde(default)]
    pub battery: Option<BatteryInfoDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkInfoDto {
    // "Access Point", "Station", "AP+Station" or "Disabled"
    pub mode: Option<String>,
    pub ip: Option<String>,
    pub ap_ip: Option<String>,
    pub ssid: Option<String>,
    pub stations: Option<u32>,
    pub rssi: Option<i32>,
    pub mac: Option<String>,
}

/// memory sizes in KB, flash size in `flash_size_units`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceInfoDto {
    pub cpu_freq: Option<f64>,
    pub free_heap: Option<f64>,
    pub total_heap: Option<f64>,
    pub free_ram: Option<f64>,
    pub total_ram: Option<f64>,
    pub flash_size: Option<f64>,
    pub flash_size_units: Option<String>,
    pub flash_speed: Option<f64>,
    pub sketch_size: Option<f64>,
    pub sketch_size_units: Option<String>,
    pub free_sketch_space: Option<f64>,
    pub free_sketch_space_units: Option<String>,
    pub flash_used_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardInfoDto {
    pub chip_model: Option<String>,
    pub chip_revision: Option<u32>,
    pub sdk_version: Option<String>,
    // seconds since boot
    pub uptime: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatteryInfoDto {
    pub connected: bool,
    pub voltage: Option<f64>,
    pub percentage: Option<f64>,
    pub usb_powered: Option<bool>,
    pub charging: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_bundle() {
        let json = r#"{
            "network": {"mode": "Access Point", "ip": "192.168.4.1", "ssid": "feather", "stations": 2, "mac": "AA:BB"},
            "resources": {"cpuFreq": 240, "freeRam": 180.5, "totalRam": 320.0, "flashSize": 4.0, "flashSizeUnits": "MB",
                          "sketchSize": 812.3, "sketchSizeUnits": "KB", "flashUsedPercent": 19.8},
            "board": {"chipModel": "ESP32-S2", "chipRevision": 0, "sdkVersion": "v4.4", "uptime": 61},
            "battery": {"connected": false, "usbPowered": true}
        }"#;
        let info: SystemInfoDto = serde_json::from_str(json).unwrap();
        let network = info.network.unwrap();
        assert_eq!(network.stations, Some(2));
        assert_eq!(network.rssi, None);
        assert_eq!(info.resources.unwrap().cpu_freq, Some(240.0));
        assert_eq!(info.board.unwrap().uptime, Some(61));
        let battery = info.battery.unwrap();
        assert!(!battery.connected);
        assert_eq!(battery.usb_powered, Some(true));
    }

    #[test]
    fn test_missing_sections_are_none() {
        let info: SystemInfoDto = serde_json::from_str(r#"{"board": {"uptime": 5}}"#).unwrap();
        assert!(info.network.is_none());
        assert!(info.resources.is_none());
        assert!(info.battery.is_none());
        assert_eq!(info.board.unwrap().chip_model, None);
    }
}
