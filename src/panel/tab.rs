use std::fmt;
use std::str::FromStr;
use crate::common::error::SyncError;

/// panel tabs, only one is visible at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Controls,
    Scanner,
    SysInfo,
}

impl FromStr for Tab {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "controls" => Ok(Tab::Controls),
            "scanner" => Ok(Tab::Scanner),
            "sysinfo" => Ok(Tab::SysInfo),
            other => Err(SyncError::validation(format!("unknown tab '{}', expected controls, scanner or sysinfo", other))),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Tab::Controls => "controls",
            Tab::Scanner => "scanner",
            Tab::SysInfo => "sysinfo",
        };
        write!(f, "{}", name)
    }
}
