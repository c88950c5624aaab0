//! operator console
//! reads one command per stdin line and hands it to the dashboard;
//! cycles run in the background so a slow scan never blocks input

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use crate::device_sync::dashboard::Dashboard;
use crate::panel::panel::lock_panel;
use crate::panel::render::render;
use crate::panel::tab::Tab;
use crate::{error, info};
use super::command::{parse, PanelCommand, HELP};

const LOG_TAG: &str = "console";

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn dispatch(dashboard: &Dashboard, command: PanelCommand) -> Flow {
    match command {
        PanelCommand::Led(on) => dashboard.set_led(on),
        PanelCommand::Dac(dac) => dashboard.set_dac(dac),
        PanelCommand::Scan => {
            if let Err(e) = dashboard.scan() {
                println!("{}", e.msg);
            }
        }
        PanelCommand::Tab(tab) => dashboard.activate_tab(tab),
        PanelCommand::SysInfo => dashboard.refresh_sysinfo(),
        PanelCommand::EthRefresh => dashboard.refresh_ethernet(),
        PanelCommand::EthFocus(field) => dashboard.ethernet.focus(field),
        PanelCommand::EthBlur(field) => dashboard.ethernet.blur(field),
        PanelCommand::EthSet(field, value) => dashboard.ethernet.edit(field, &value),
        PanelCommand::EthSave => dashboard.save_ethernet(),
        PanelCommand::Show => {
            let panel = dashboard.panel();
            let panel = lock_panel(&panel);
            println!("{}", render(&panel));
            if panel.active_tab == Tab::Scanner {
                println!("scan: {}", dashboard.scanner.phase());
            }
        }
        PanelCommand::Help => println!("{}", HELP),
        PanelCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn print_alerts(dashboard: &Dashboard) {
    let alerts = lock_panel(&dashboard.panel()).take_alerts();
    for alert in alerts {
        println!("ALERT: {}", alert);
    }
}

/// runs until quit, ctrl-c, or ctrl-c after stdin closes
pub async fn run_console(dashboard: Arc<Dashboard>, token: CancellationToken) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!(LOG_TAG, "console ready, type help for commands");
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    print_alerts(&dashboard);
                    match parse(&line) {
                        Ok(Some(command)) => {
                            if dispatch(&dashboard, command) == Flow::Quit {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(e) => println!("{}", e.msg),
                    }
                }
                Ok(None) => {
                    info!(LOG_TAG, "stdin closed, polling until ctrl-c");
                    token.cancelled().await;
                    break;
                }
                Err(e) => {
                    error!(LOG_TAG, "failed to read stdin: {}", e);
                    break;
                }
            }
        }
    }
    print_alerts(&dashboard);
}
