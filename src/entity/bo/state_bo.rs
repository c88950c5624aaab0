//! device mirrored values (one per resource), source of truth is always the device

use crate::common::error::SyncError;
use crate::entity::dto::scan_dto::I2cDeviceDto;
use crate::entity::dto::sensor_dto::SensorDto;

/// DAC full scale output
pub const DAC_REFERENCE_VOLTS: f64 = 3.3;

/// DAC code, the voltage is always derived from the code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalogOutputBo {
    value: u8,
}

impl AnalogOutputBo {
    pub fn new(value: u8) -> Self {
        AnalogOutputBo { value }
    }

    /// accept operator or device input, anything outside 0-255 is rejected
    pub fn parse(raw: &str) -> Result<Self, SyncError> {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| SyncError::validation(format!("DAC value must be an integer, got '{}'", raw.trim())))?;
        let value = u8::try_from(value)
            .map_err(|_| SyncError::validation(format!("DAC value must be within 0-255, got {}", value)))?;
        Ok(Self::new(value))
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn voltage(&self) -> f64 {
        self.value as f64 / 255.0 * DAC_REFERENCE_VOLTS
    }
}

/// temperature (C) and humidity (%RH) pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentBo {
    pub ready: bool,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
}

impl From<SensorDto> for EnvironmentBo {
    fn from(dto: SensorDto) -> Self {
        EnvironmentBo {
            ready: dto.ready,
            temperature: dto.temperature.filter(|t| t.is_finite()),
            humidity: dto.humidity.filter(|h| h.is_finite()),
        }
    }
}

/// stations on the access point, the requester itself included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerCountBo(pub u32);

impl PeerCountBo {
    pub fn others_connected(&self) -> bool {
        self.0 > 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I2cDeviceBo {
    pub address: u8,
    pub hex_address: String,
}

impl From<I2cDeviceDto> for I2cDeviceBo {
    fn from(dto: I2cDeviceDto) -> Self {
        I2cDeviceBo { address: dto.address, hex_address: dto.hex_address }
    }
}
