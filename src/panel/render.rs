//! plain text rendering of the panel for the console

use std::fmt::Write;
use super::panel::{Indicator, Panel};
use super::tab::Tab;

fn indicator(i: Indicator) -> &'static str {
    match i {
        Indicator::Green => "[green]",
        Indicator::Red => "[red]",
    }
}

pub fn render(panel: &Panel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", panel.active_tab);
    match panel.active_tab {
        Tab::Controls => render_controls(panel, &mut out),
        Tab::Scanner => render_scanner(panel, &mut out),
        Tab::SysInfo => render_sysinfo(panel, &mut out),
    }
    render_ethernet(panel, &mut out);
    out
}

fn render_controls(panel: &Panel, out: &mut String) {
    let c = &panel.controls;
    let _ = writeln!(out, "{}", c.led_status);
    let _ = writeln!(out, "{} (slider {})", c.dac_value, c.dac_slider);
    let _ = writeln!(out, "{}", c.voltage);
    let _ = writeln!(out, "Temperature: {} C  Humidity: {} %", c.temperature, c.humidity);
    let _ = writeln!(out, "Clients: {} {} {}", c.client_count, indicator(c.connection), c.connection_text);
}

fn render_scanner(panel: &Panel, out: &mut String) {
    let s = &panel.scanner;
    let button = if s.button_enabled { "enabled" } else { "disabled" };
    let _ = writeln!(out, "[{}] ({})", s.button_label, button);
    if !s.status.is_empty() {
        let _ = writeln!(out, "{}", s.status);
    }
    if s.table_visible {
        let _ = writeln!(out, "{:>8}  {}", "Address", "Hex");
        for row in &s.rows {
            let _ = writeln!(out, "{:>8}  {}", row.decimal, row.hex);
        }
    }
}

fn render_sysinfo(panel: &Panel, out: &mut String) {
    let n = &panel.sysinfo.network;
    let r = &panel.sysinfo.resources;
    let b = &panel.sysinfo.board;
    let bat = &panel.sysinfo.battery;
    let _ = writeln!(out, "Network");
    let _ = writeln!(out, "  Mode: {}  IP: {}  MAC: {}", n.wifi_mode, n.ip_address, n.mac_address);
    let _ = writeln!(out, "  SSID: {}  Signal: {}", n.wifi_ssid, n.wifi_rssi);
    let _ = writeln!(out, "Resources");
    let _ = writeln!(out, "  CPU: {}", r.cpu_freq);
    let _ = writeln!(out, "  Free RAM: {}  Used RAM: {}", r.free_ram, r.used_ram);
    let _ = writeln!(out, "  Flash: {}  Sketch: {}", r.flash_size, r.flash_usage);
    let _ = writeln!(out, "Board");
    let _ = writeln!(out, "  Chip: {} rev {}  SDK: {}", b.chip_model, b.chip_revision, b.sdk_version);
    let _ = writeln!(out, "  Uptime: {}", b.uptime);
    let _ = writeln!(out, "Battery");
    let _ = writeln!(out, "  Connected: {}  Level: {}  Voltage: {}", bat.connected, bat.percentage, bat.voltage);
    let _ = writeln!(out, "  Power: {}  Charging: {}", bat.power_source, bat.charging);
}

fn render_ethernet(panel: &Panel, out: &mut String) {
    let e = &panel.ethernet;
    let _ = writeln!(out, "-- ethernet --");
    let _ = writeln!(out, "{} {}", indicator(e.status.indicator), e.status.connection_text);
    let _ = writeln!(
        out,
        "  IP: {}  Subnet: {}  Gateway: {}  DNS: {}",
        e.status.ip_address, e.status.subnet_mask, e.status.gateway, e.status.dns_server
    );
    let _ = writeln!(
        out,
        "  form: ip={} subnet={} gateway={} dns={}",
        e.form.ip, e.form.subnet, e.form.gateway, e.form.dns
    );
    if let Some(message) = &e.message {
        let _ = writeln!(out, "  {}: {}", if message.success { "ok" } else { "error" }, message.text);
    }
}
