//! Profile override form
//!
//! Two mutually exclusive override toggles (UID vs. entitlement list) with
//! their text inputs. Enabling one override disables and clears the other;
//! submit packages the active override and forwards it to the submit sink.

use std::sync::Arc;

use chrono::Utc;
use replay_core::config::AppInfo;
use replay_core::models::{OverridePayload, ProfileOverride};
use replay_services::ReplaySubmitSink;

pub struct OverrideForm {
    info: AppInfo,
    selection: ProfileOverride,
    sink: Arc<dyn ReplaySubmitSink>,
}

impl OverrideForm {
    pub fn new(info: AppInfo, sink: Arc<dyn ReplaySubmitSink>) -> Self {
        OverrideForm {
            info,
            selection: ProfileOverride::None,
            sink,
        }
    }

    /// Application info card shown next to the form.
    pub fn app_info(&self) -> &AppInfo {
        &self.info
    }

    pub fn selection(&self) -> &ProfileOverride {
        &self.selection
    }

    pub fn uid_enabled(&self) -> bool {
        matches!(self.selection, ProfileOverride::Uid(_))
    }

    pub fn entitlements_enabled(&self) -> bool {
        matches!(self.selection, ProfileOverride::Entitlements(_))
    }

    /// Toggle the UID override. Enabling it clears an active entitlements
    /// override; toggling it off leaves no override enabled.
    pub fn toggle_uid(&mut self) {
        self.selection = match self.selection {
            ProfileOverride::Uid(_) => ProfileOverride::None,
            _ => ProfileOverride::Uid(String::new()),
        };
    }

    /// Toggle the entitlements override, symmetric to [`Self::toggle_uid`].
    pub fn toggle_entitlements(&mut self) {
        self.selection = match self.selection {
            ProfileOverride::Entitlements(_) => ProfileOverride::None,
            _ => ProfileOverride::Entitlements(String::new()),
        };
    }

    /// Update the UID input. Ignored while the UID override is disabled,
    /// matching the disabled input field.
    pub fn set_uid_value(&mut self, value: impl Into<String>) {
        if let ProfileOverride::Uid(current) = &mut self.selection {
            *current = value.into();
        }
    }

    /// Update the entitlements input (raw comma-separated text). Ignored
    /// while the entitlements override is disabled.
    pub fn set_entitlements_value(&mut self, value: impl Into<String>) {
        if let ProfileOverride::Entitlements(current) = &mut self.selection {
            *current = value.into();
        }
    }

    /// Whether the submit action is reachable: at least one override enabled.
    pub fn can_submit(&self) -> bool {
        self.selection.is_active()
    }

    /// Package the active override and forward it to the submit sink.
    ///
    /// Returns the emitted payload, or `None` when no override is enabled.
    /// Values are submitted as-is; the only rule is toggle exclusivity. The
    /// sink is fire-and-forget: a failure is logged, not propagated.
    pub async fn submit(&mut self) -> Option<OverridePayload> {
        let payload = OverridePayload::from_override(&self.selection, Utc::now())?;

        tracing::info!(override_type = %payload.override_type, "Submitting profile override");
        if let Err(err) = self.sink.apply_override(payload.clone()).await {
            tracing::warn!(error = %err, "Override submit sink failed");
        }
        Some(payload)
    }
}
