//! All possible UI actions. Actions are the sole mechanism for state mutation.

use routerdesk_core::{Command, Notification, RecordFilter, RecordId, RoutingProtocol};

use crate::screen::ScreenId;

/// Record types that have a create/edit dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Interface,
    Reservation,
    StaticRoute,
    OspfArea,
    BgpNeighbor,
    Vlan,
    SwitchPort,
    Vrf,
    FirewallRule,
    DeviceLimit,
}

impl RecordKind {
    /// Interfaces, switch ports and device limits are seeded and only edited.
    pub fn creatable(self) -> bool {
        !matches!(self, Self::Interface | Self::SwitchPort | Self::DeviceLimit)
    }
}

/// Which dialog to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRequest {
    Create(RecordKind),
    Edit(RecordKind, RecordId),
    DhcpSettings,
    VpnSettings,
    QosSettings,
    Protocol(RoutingProtocol),
    AssignInterface(RecordId),
    UnassignInterface(RecordId),
    Bandwidth(RecordId),
    AppendLog,
}

/// A command waiting for y/n.
#[derive(Debug, Clone)]
pub struct PendingConfirm {
    pub prompt: String,
    pub command: Command,
}

impl PendingConfirm {
    pub fn new(prompt: impl Into<String>, command: Command) -> Self {
        Self {
            prompt: prompt.into(),
            command,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,

    // ── Console ───────────────────────────────────────────────────
    Execute(Command),
    /// Run the export and write the entries to the configured file.
    ExportLogs(RecordFilter),
    ShowConfirm(PendingConfirm),
    ConfirmYes,
    ConfirmNo,

    // ── Dialogs ───────────────────────────────────────────────────
    OpenForm(FormRequest),
    SubmitForm,
    CancelForm,

    // ── Filter bar ────────────────────────────────────────────────
    OpenFilter,
    CloseFilter,
    /// Filter text changed; the active screen narrows its table.
    FilterChanged(String),
    ClearFilter,

    // ── Overlays ──────────────────────────────────────────────────
    ToggleHelp,
    TogglePreview,
    ScrollPreview(i16),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
