//! ethernet network configuration, used both as device mirror and as operator draft

use std::fmt;
use std::str::FromStr;
use crate::common::error::SyncError;
use crate::entity::dto::ethernet_dto::{EthernetConfigDto, EthernetStatusDto};
use crate::util::ip::is_dotted_quad;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EthernetField {
    Ip,
    Subnet,
    Gateway,
    Dns,
}

impl EthernetField {
    /// validation order on save
    pub const ALL: [EthernetField; 4] = [EthernetField::Ip, EthernetField::Subnet, EthernetField::Gateway, EthernetField::Dns];

    pub fn invalid_message(&self) -> &'static str {
        match self {
            EthernetField::Ip => "Invalid IP address format",
            EthernetField::Subnet => "Invalid subnet mask format",
            EthernetField::Gateway => "Invalid gateway format",
            EthernetField::Dns => "Invalid DNS server format",
        }
    }
}

impl FromStr for EthernetField {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ip" => Ok(EthernetField::Ip),
            "subnet" => Ok(EthernetField::Subnet),
            "gateway" => Ok(EthernetField::Gateway),
            "dns" => Ok(EthernetField::Dns),
            other => Err(SyncError::validation(format!("unknown ethernet field '{}', expected ip, subnet, gateway or dns", other))),
        }
    }
}

impl fmt::Display for EthernetField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            EthernetField::Ip => "ip",
            EthernetField::Subnet => "subnet",
            EthernetField::Gateway => "gateway",
            EthernetField::Dns => "dns",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkConfigBo {
    pub ip: String,
    pub subnet: String,
    pub gateway: String,
    pub dns: String,
}

impl NetworkConfigBo {
    pub fn field(&self, field: EthernetField) -> &str {
        match field {
            EthernetField::Ip => &self.ip,
            EthernetField::Subnet => &self.subnet,
            EthernetField::Gateway => &self.gateway,
            EthernetField::Dns => &self.dns,
        }
    }

    pub fn set_field(&mut self, field: EthernetField, value: &str) {
        let slot = match field {
            EthernetField::Ip => &mut self.ip,
            EthernetField::Subnet => &mut self.subnet,
            EthernetField::Gateway => &mut self.gateway,
            EthernetField::Dns => &mut self.dns,
        };
        *slot = value.to_string();
    }

    /// first field that is not a dotted quad, in ip / subnet / gateway / dns order
    pub fn validate(&self) -> Result<(), SyncError> {
        match EthernetField::ALL.iter().find(|f| !is_dotted_quad(self.field(**f))) {
            Some(field) => Err(SyncError::validation(field.invalid_message())),
            None => Ok(()),
        }
    }

    pub fn to_dto(&self) -> EthernetConfigDto {
        EthernetConfigDto {
            ip: self.ip.clone(),
            subnet: self.subnet.clone(),
            gateway: self.gateway.clone(),
            dns: self.dns.clone(),
        }
    }
}

impl From<&EthernetStatusDto> for NetworkConfigBo {
    fn from(dto: &EthernetStatusDto) -> Self {
        NetworkConfigBo {
            ip: dto.ip.clone().unwrap_or_default(),
            subnet: dto.subnet.clone().unwrap_or_default(),
            gateway: dto.gateway.clone().unwrap_or_default(),
            dns: dto.dns.clone().unwrap_or_default(),
        }
    }
}
