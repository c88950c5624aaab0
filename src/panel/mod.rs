pub mod panel;
pub mod projection;
pub mod render;
pub mod tab;
