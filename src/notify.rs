//! Capabilities the core calls into the presentation layer with
//!
//! Alerts, dialogs and map redraws are not performed here. The core hands a
//! [`Notice`] to a [`NotificationSink`] and lets the embedding application
//! decide how to show it.

use crate::types::{ContainmentVerdict, Polygon, Region};
use std::sync::Arc;

/// Something the presentation layer should show or redraw
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Result of a marker move, exactly one per move
    Verdict(ContainmentVerdict),
    /// The fence was (re)built around a new center
    FenceChanged { region: Region, fence: Arc<Polygon> },
    /// Location permission was refused; the default center stays in effect
    PermissionDenied(Dialog),
    /// The wake-up fix failed, location services are probably off
    LocationServicesDisabled(SettingsPrompt),
}

/// Receiver of user-facing notifications
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// Sink that drops every notice
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _notice: Notice) {}
}

/// A simple informational dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: &'static str,
    pub message: &'static str,
}

impl Dialog {
    pub const PERMISSION_DENIED: Self = Self {
        title: "Location Permission Denied",
        message: "Please enable location to use this app.",
    };
}

/// Prompt offering to open the system location settings
///
/// The prompt must be answered with one of its actions, it cannot be
/// dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub actions: [PromptAction; 2],
    pub cancelable: bool,
}

impl Default for SettingsPrompt {
    fn default() -> Self {
        Self {
            title: "Location Services Disabled",
            message: "Please enable location services to use this app.",
            actions: [PromptAction::OpenSettings, PromptAction::Cancel],
            cancelable: false,
        }
    }
}

/// User answer to a [`SettingsPrompt`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    OpenSettings,
    Cancel,
}

impl PromptAction {
    pub fn label(&self) -> &'static str {
        match self {
            PromptAction::OpenSettings => "Open Settings",
            PromptAction::Cancel => "Cancel",
        }
    }
}

/// Hook that deep-links into the system location settings
pub trait SettingsEscalation: Send + Sync {
    fn open_location_settings(&self);
}
