//! ethernet endpoints: `/api/ethernet/status` and `/ethernet/config`

use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EthernetStatusDto {
    pub connected: bool,
    pub ip: Option<String>,
    pub subnet: Option<String>,
    pub gateway: Option<String>,
    pub dns: Option<String>,
}

/// body of the save request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EthernetConfigDto {
    pub ip: String,
    pub subnet: String,
    pub gateway: String,
    pub dns: String,
}

/// reply of the save request, `message` on success and `error` on failure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EthernetSaveReplyDto {
    pub message: Option<String>,
    pub error: Option<String>,
}
