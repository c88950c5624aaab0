//! entities
//! - dto: wire payloads of the device endpoints
//! - bo: device mirrored values held by the sync components

pub mod dto;
pub mod bo;
