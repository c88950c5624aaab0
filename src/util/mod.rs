pub mod ip;
pub mod payload;
