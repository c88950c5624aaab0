use crate::common::error::SyncError;
use crate::entity::bo::network_config_bo::EthernetField;
use crate::entity::bo::state_bo::AnalogOutputBo;
use crate::panel::tab::Tab;

pub const HELP: &str = "\
led on|off                  switch the LED
dac <0-255>                 set the DAC output
scan                        scan the I2C bus
tab controls|scanner|sysinfo
sysinfo                     refresh system information
eth refresh                 refresh ethernet status
eth focus|blur <field>      field: ip, subnet, gateway, dns
eth set <field> <value>     edit the ethernet form
eth save                    save the ethernet configuration
show                        print the panel
help
quit";

#[derive(Debug, Clone, PartialEq)]
pub enum PanelCommand {
    Led(bool),
    Dac(AnalogOutputBo),
    Scan,
    Tab(Tab),
    SysInfo,
    EthRefresh,
    EthFocus(EthernetField),
    EthBlur(EthernetField),
    EthSet(EthernetField, String),
    EthSave,
    Show,
    Help,
    Quit,
}

fn usage(msg: &str) -> SyncError {
    SyncError::validation(format!("usage: {}", msg))
}

/// one console line; a blank line is Ok(None)
pub fn parse(line: &str) -> Result<Option<PanelCommand>, SyncError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((head, args)) = words.split_first() else {
        return Ok(None);
    };
    let command = match (head.to_ascii_lowercase().as_str(), args) {
        ("led", [state]) => match state.to_ascii_lowercase().as_str() {
            "on" => PanelCommand::Led(true),
            "off" => PanelCommand::Led(false),
            _ => return Err(usage("led on|off")),
        },
        ("led", _) => return Err(usage("led on|off")),
        ("dac", [value]) => PanelCommand::Dac(AnalogOutputBo::parse(value)?),
        ("dac", _) => return Err(usage("dac <0-255>")),
        ("scan", []) => PanelCommand::Scan,
        ("tab", [tab]) => PanelCommand::Tab(tab.parse()?),
        ("tab", _) => return Err(usage("tab controls|scanner|sysinfo")),
        ("sysinfo", []) => PanelCommand::SysInfo,
        ("eth", rest) => parse_eth(rest)?,
        ("show", []) => PanelCommand::Show,
        ("help", _) => PanelCommand::Help,
        ("quit", []) | ("exit", []) => PanelCommand::Quit,
        (other, _) => return Err(SyncError::validation(format!("unknown command '{}', try help", other))),
    };
    Ok(Some(command))
}

fn parse_eth(args: &[&str]) -> Result<PanelCommand, SyncError> {
    match args {
        ["refresh"] => Ok(PanelCommand::EthRefresh),
        ["save"] => Ok(PanelCommand::EthSave),
        ["focus", field] => Ok(PanelCommand::EthFocus(field.parse()?)),
        ["blur", field] => Ok(PanelCommand::EthBlur(field.parse()?)),
        ["set", field, value] => Ok(PanelCommand::EthSet(field.parse()?, value.to_string())),
        // clearing a field
        ["set", field] => Ok(PanelCommand::EthSet(field.parse()?, String::new())),
        _ => Err(usage("eth refresh|save|focus <field>|blur <field>|set <field> <value>")),
    }
}
