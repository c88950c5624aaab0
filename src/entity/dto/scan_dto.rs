//! `/scan` payload

use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResultDto {
    pub scan_complete: bool,
    #[serde(default)]
    pub devices: Vec<I2cDeviceDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I2cDeviceDto {
    pub address: u8,
    pub hex_address: String,
}
