//! ethernet status and configuration
//! function:
//! - mirror `/api/ethernet/status` into the read-only status section
//! - copy the status into the form draft only while the edit guard lets go of it
//! - validate and save the draft to `/ethernet/config`, confirmed by the device

use std::sync::{Arc, Mutex};
use std::time::Duration;
use crate::common::error::SyncError;
use crate::entity::bo::network_config_bo::{EthernetField, NetworkConfigBo};
use crate::entity::dto::ethernet_dto::{EthernetSaveReplyDto, EthernetStatusDto};
use crate::panel::projection::{
    ethernet_save_failure_text, ethernet_status_failure_text, ethernet_status_section, ETHERNET_SAVED,
    ETHERNET_SAVED_BAD_REPLY, ETHERNET_SAVE_FAILED,
};
use crate::util::payload::parse_json;
use crate::{debug, info, warn};
use super::context::{lock_or_recover, SyncContext};
use super::cycle::CycleSlot;
use super::edit_guard::EditGuard;

const LOG_TAG: &str = "ethernet_sync";

const STATUS_PATH: &str = "api/ethernet/status";
const CONFIG_PATH: &str = "ethernet/config";

pub struct EthernetSync {
    ctx: SyncContext,
    slot: CycleSlot,
    guard: Arc<Mutex<EditGuard>>,
    blur_grace: Duration,
    mirror: Mutex<Option<NetworkConfigBo>>,
}

impl EthernetSync {
    pub fn new(ctx: SyncContext, blur_grace: Duration) -> Self {
        EthernetSync {
            ctx,
            slot: CycleSlot::new("ethernet"),
            guard: Arc::new(Mutex::new(EditGuard::default())),
            blur_grace,
            mirror: Mutex::new(None),
        }
    }

    /// last configuration reported by the device
    #[cfg(test)]
    pub fn mirror(&self) -> Option<NetworkConfigBo> {
        lock_or_recover(&self.mirror).clone()
    }

    #[cfg(test)]
    pub fn guard(&self) -> EditGuard {
        lock_or_recover(&self.guard).clone()
    }

    pub async fn refresh(&self) -> Result<EthernetStatusDto, SyncError> {
        let ticket = self.slot.begin();
        let timeout = self.ctx.timeouts.ethernet_status();
        let result = self
            .slot
            .run(&ticket, async {
                let body = self.ctx.api.get(STATUS_PATH, timeout).await?.success_body()?;
                parse_json::<EthernetStatusDto>(&body)
            })
            .await;

        let status = match result {
            Ok(status) => status,
            Err(e) => {
                if !e.is_superseded() {
                    warn!(LOG_TAG, "status refresh failed: {}", e);
                    self.ctx.panel().ethernet.show_message(ethernet_status_failure_text(&e), false);
                }
                return Err(e);
            }
        };

        let reported = NetworkConfigBo::from(&status);
        let section = ethernet_status_section(&status);
        self.slot.apply_if_current(&ticket, || {
            let previous = lock_or_recover(&self.mirror).replace(reported.clone());
            if previous.as_ref() != Some(&reported) {
                info!(LOG_TAG, "device reports ip {}, gateway {}", reported.ip, reported.gateway);
            }
            let hold = lock_or_recover(&self.guard).holds_form();
            let mut panel = self.ctx.panel();
            panel.ethernet.status = section;
            if hold {
                debug!(LOG_TAG, "form held by operator, draft left alone");
            } else {
                panel.ethernet.form = reported;
            }
        })?;
        debug!(LOG_TAG, "status applied, connected: {}", status.connected);
        Ok(status)
    }

    pub fn focus(&self, field: EthernetField) {
        lock_or_recover(&self.guard).focus(field);
    }

    /// editing ends only if no field is focused once the grace period is over
    pub fn blur(&self, field: EthernetField) {
        lock_or_recover(&self.guard).blur(field);
        let guard = Arc::clone(&self.guard);
        let grace = self.blur_grace;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            let still_editing = lock_or_recover(&guard).settle();
            debug!(LOG_TAG, "blur settled, editing: {}", still_editing);
        });
    }

    pub fn edit(&self, field: EthernetField, value: &str) {
        self.ctx.panel().ethernet.form.set_field(field, value);
        lock_or_recover(&self.guard).mark_changed();
    }

    pub fn draft(&self) -> NetworkConfigBo {
        self.ctx.panel().ethernet.form.clone()
    }

    /// validate the draft and send it; the dirty flag clears only on a 2xx reply
    /// and only if the form was not edited while the save was in flight
    pub async fn save(&self) -> Result<String, SyncError> {
        let revision = lock_or_recover(&self.guard).revision();
        let draft = self.draft();
        if let Err(e) = draft.validate() {
            self.ctx.panel().ethernet.show_message(&e.msg, false);
            return Err(e);
        }
        let body = serde_json::to_value(draft.to_dto())?;
        info!(LOG_TAG, "saving ethernet configuration: {}", body);

        let reply = match self.ctx.api.post_json(CONFIG_PATH, body, self.ctx.timeouts.default_timeout()).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(LOG_TAG, "save failed: {}", e);
                self.ctx.panel().ethernet.show_message(ethernet_save_failure_text(&e), false);
                return Err(e);
            }
        };

        if !reply.is_success() {
            let text = parse_json::<EthernetSaveReplyDto>(&reply.body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| ETHERNET_SAVE_FAILED.to_string());
            warn!(LOG_TAG, "device rejected configuration, status {}: {}", reply.status, text);
            self.ctx.panel().ethernet.show_message(&text, false);
            return Err(SyncError::http_status(reply.status, text));
        }

        let text = match parse_json::<EthernetSaveReplyDto>(&reply.body) {
            Ok(r) => r.message.unwrap_or_else(|| ETHERNET_SAVED.to_string()),
            Err(e) => {
                warn!(LOG_TAG, "save reply unreadable: {}", e);
                ETHERNET_SAVED_BAD_REPLY.to_string()
            }
        };
        if !lock_or_recover(&self.guard).mark_saved(revision) {
            info!(LOG_TAG, "form edited while saving, newer draft kept");
        }
        self.ctx.panel().ethernet.show_message(&text, true);
        info!(LOG_TAG, "configuration saved: {}", text);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::common::error::ErrorCode;
    use crate::common::http::mock::MockDeviceApi;
    use crate::common::setting::Timeout;
    use crate::panel::panel::{lock_panel, shared_panel, Indicator, PanelMessage};

    const STATUS_A: &str =
        r#"{"connected":true,"ip":"10.0.0.5","subnet":"255.255.255.0","gateway":"10.0.0.1","dns":"8.8.8.8"}"#;
    const STATUS_B: &str =
        r#"{"connected":true,"ip":"10.0.0.9","subnet":"255.255.255.0","gateway":"10.0.0.1","dns":"1.1.1.1"}"#;

    fn ethernet(api: &Arc<MockDeviceApi>) -> (EthernetSync, SyncContext) {
        let ctx = SyncContext::new(api.clone(), shared_panel(), Timeout::default());
        (EthernetSync::new(ctx.clone(), Duration::from_millis(20)), ctx)
    }

    fn message(ctx: &SyncContext) -> Option<PanelMessage> {
        lock_panel(&ctx.panel).ethernet.message.clone()
    }

    #[tokio::test]
    async fn test_status_fills_form_when_idle() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("api/ethernet/status", 200, STATUS_A);
        let (eth, ctx) = ethernet(&api);
        eth.refresh().await.unwrap();

        let panel = lock_panel(&ctx.panel);
        assert_eq!(panel.ethernet.status.indicator, Indicator::Green);
        assert_eq!(panel.ethernet.status.ip_address, "10.0.0.5");
        assert_eq!(panel.ethernet.form.ip, "10.0.0.5");
        assert_eq!(panel.ethernet.form.dns, "8.8.8.8");
        drop(panel);
        assert_eq!(api.requests()[0].timeout, Duration::from_millis(5000));
    }

    #[tokio::test]
    async fn test_focused_field_keeps_draft() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("api/ethernet/status", 200, STATUS_A).reply("api/ethernet/status", 200, STATUS_B);
        let (eth, ctx) = ethernet(&api);
        eth.refresh().await.unwrap();

        eth.focus(EthernetField::Ip);
        eth.refresh().await.unwrap();
        let panel = lock_panel(&ctx.panel);
        // status mirror moves, the draft does not
        assert_eq!(panel.ethernet.status.ip_address, "10.0.0.9");
        assert_eq!(panel.ethernet.form.ip, "10.0.0.5");
        drop(panel);
        assert_eq!(eth.mirror().map(|m| m.ip), Some("10.0.0.9".to_string()));
    }

    #[tokio::test]
    async fn test_blur_releases_form_after_grace() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("api/ethernet/status", 200, STATUS_B);
        let (eth, ctx) = ethernet(&api);
        eth.focus(EthernetField::Gateway);
        eth.blur(EthernetField::Gateway);
        assert!(eth.guard().is_editing());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!eth.guard().holds_form());

        eth.refresh().await.unwrap();
        assert_eq!(lock_panel(&ctx.panel).ethernet.form.ip, "10.0.0.9");
    }

    #[tokio::test]
    async fn test_edited_form_survives_until_saved() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("api/ethernet/status", 200, STATUS_A)
            .reply("api/ethernet/status", 200, STATUS_B)
            .reply("ethernet/config", 200, r#"{"message":"Saved, restarting"}"#);
        let (eth, ctx) = ethernet(&api);
        eth.refresh().await.unwrap();
        eth.edit(EthernetField::Ip, "10.0.0.77");
        eth.refresh().await.unwrap();
        assert_eq!(eth.draft().ip, "10.0.0.77");

        let text = eth.save().await.unwrap();
        assert_eq!(text, "Saved, restarting");
        assert_eq!(message(&ctx), Some(PanelMessage { text: text.clone(), success: true }));
        assert!(!eth.guard().has_unsaved_changes());

        let sent = api.requests().into_iter().find(|r| r.path == "ethernet/config").unwrap();
        assert_eq!(sent.method, "POST");
        assert_eq!(
            sent.body,
            Some(serde_json::json!({"ip":"10.0.0.77","subnet":"255.255.255.0","gateway":"10.0.0.1","dns":"8.8.8.8"}))
        );
    }

    #[tokio::test]
    async fn test_edit_during_save_keeps_form() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("api/ethernet/status", 200, STATUS_A)
            .reply("api/ethernet/status", 200, STATUS_B)
            .reply_after("ethernet/config", Duration::from_millis(40), 200, r#"{"message":"Saved"}"#);
        let (eth, ctx) = ethernet(&api);
        eth.refresh().await.unwrap();
        eth.edit(EthernetField::Ip, "10.0.0.77");

        let (saved, _) = tokio::join!(eth.save(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            eth.edit(EthernetField::Dns, "1.1.1.2");
        });
        assert_eq!(saved.unwrap(), "Saved");
        assert!(eth.guard().has_unsaved_changes());

        eth.refresh().await.unwrap();
        let panel = lock_panel(&ctx.panel);
        assert_eq!(panel.ethernet.status.ip_address, "10.0.0.9");
        assert_eq!(panel.ethernet.form.ip, "10.0.0.77");
        assert_eq!(panel.ethernet.form.dns, "1.1.1.2");
    }

    #[tokio::test]
    async fn test_invalid_ip_sends_nothing() {
        let api = Arc::new(MockDeviceApi::new());
        let (eth, ctx) = ethernet(&api);
        eth.edit(EthernetField::Ip, "999.1.1.1");
        eth.edit(EthernetField::Subnet, "255.255.255.0");
        eth.edit(EthernetField::Gateway, "10.0.0.1");
        eth.edit(EthernetField::Dns, "8.8.8.8");
        let err = eth.save().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            message(&ctx),
            Some(PanelMessage { text: "Invalid IP address format".to_string(), success: false })
        );
        assert!(api.requests().is_empty());
        assert!(eth.guard().has_unsaved_changes());
    }

    #[tokio::test]
    async fn test_rejected_save_shows_server_error() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("api/ethernet/status", 200, STATUS_A)
            .reply("ethernet/config", 400, r#"{"error":"Invalid gateway"}"#);
        let (eth, ctx) = ethernet(&api);
        eth.refresh().await.unwrap();
        eth.edit(EthernetField::Dns, "1.1.1.1");
        let err = eth.save().await.unwrap_err();
        assert_eq!(err.status, Some(400));
        assert_eq!(message(&ctx).map(|m| m.text), Some("Invalid gateway".to_string()));
        assert!(eth.guard().has_unsaved_changes());
    }

    #[tokio::test]
    async fn test_save_reply_without_json() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("api/ethernet/status", 200, STATUS_A).reply("ethernet/config", 200, "OK");
        let (eth, ctx) = ethernet(&api);
        eth.refresh().await.unwrap();
        assert_eq!(eth.save().await.unwrap(), ETHERNET_SAVED_BAD_REPLY);
        assert_eq!(message(&ctx).map(|m| m.success), Some(true));
    }

    #[tokio::test]
    async fn test_save_timeout_message() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("api/ethernet/status", 200, STATUS_A)
            .fail("ethernet/config", SyncError::timeout("timed out"));
        let (eth, ctx) = ethernet(&api);
        eth.refresh().await.unwrap();
        eth.save().await.unwrap_err();
        assert_eq!(
            message(&ctx).map(|m| m.text),
            Some("Request timed out while saving configuration".to_string())
        );
    }

    #[tokio::test]
    async fn test_status_failure_messages() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("api/ethernet/status", 200, STATUS_A)
            .reply("api/ethernet/status", 500, "")
            .fail("api/ethernet/status", SyncError::timeout("timed out"));
        let (eth, ctx) = ethernet(&api);
        eth.refresh().await.unwrap();

        eth.refresh().await.unwrap_err();
        assert_eq!(
            message(&ctx).map(|m| m.text),
            Some("Failed to fetch Ethernet status. Check if hardware is connected.".to_string())
        );
        eth.refresh().await.unwrap_err();
        assert_eq!(
            message(&ctx).map(|m| m.text),
            Some("Request timed out. Check hardware connection.".to_string())
        );
        // last known status stays on screen
        assert_eq!(lock_panel(&ctx.panel).ethernet.status.ip_address, "10.0.0.5");
    }

    #[tokio::test]
    async fn test_unreachable_and_garbled_status_messages() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("api/ethernet/status", 200, STATUS_A)
            .fail("api/ethernet/status", SyncError::transport("connection refused"))
            .reply("api/ethernet/status", 200, r#"{"connected":"#);
        let (eth, ctx) = ethernet(&api);
        eth.refresh().await.unwrap();

        assert_eq!(eth.refresh().await.unwrap_err().code, ErrorCode::TransportError);
        assert_eq!(
            message(&ctx),
            Some(PanelMessage { text: "Network error. Check hardware connection.".to_string(), success: false })
        );
        assert_eq!(eth.refresh().await.unwrap_err().code, ErrorCode::PayloadError);
        assert_eq!(
            message(&ctx).map(|m| m.text),
            Some("Error processing Ethernet status data".to_string())
        );
        let panel = lock_panel(&ctx.panel);
        assert_eq!(panel.ethernet.status.ip_address, "10.0.0.5");
        assert_eq!(panel.ethernet.form.ip, "10.0.0.5");
    }

    #[tokio::test]
    async fn test_save_network_error_keeps_draft_dirty() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("api/ethernet/status", 200, STATUS_A)
            .fail("ethernet/config", SyncError::transport("connection reset"));
        let (eth, ctx) = ethernet(&api);
        eth.refresh().await.unwrap();
        eth.edit(EthernetField::Gateway, "10.0.0.254");
        assert_eq!(eth.save().await.unwrap_err().code, ErrorCode::TransportError);
        assert_eq!(
            message(&ctx).map(|m| m.text),
            Some("Network error while saving configuration".to_string())
        );
        assert!(eth.guard().has_unsaved_changes());
    }
}
