pub mod context;
pub mod cycle;
pub mod scheduler;
pub mod control;
pub mod sensor;
pub mod peers;
pub mod scanner;
pub mod sysinfo;
pub mod edit_guard;
pub mod ethernet;
pub mod dashboard;
