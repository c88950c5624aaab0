pub mod sensor_dto;
pub mod scan_dto;
pub mod sysinfo_dto;
pub mod ethernet_dto;
