pub mod state_bo;
pub mod network_config_bo;
