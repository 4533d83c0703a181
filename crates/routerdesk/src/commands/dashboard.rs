//! Overview counts across every panel.

use routerdesk_core::{Console, DashboardSummary};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

fn summary_detail(s: &DashboardSummary, color: bool) -> String {
    let protocols = s
        .enabled_protocols
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let qos = format!(
        "{}, {}% allocated",
        if s.qos_enabled { "enabled" } else { "disabled" },
        s.qos_allocated_percent
    );
    output::detail(&[
        ("Hostname", s.hostname.clone()),
        (
            "Interfaces",
            format!(
                "{} up, {} down, {} unconfigured",
                output::status(&s.interfaces_up.to_string(), true, color),
                output::status(&s.interfaces_down.to_string(), s.interfaces_down == 0, color),
                s.interfaces_unconfigured
            ),
        ),
        (
            "DHCP",
            format!(
                "{}, {} dynamic / {} reserved leases, {} reservations",
                if s.dhcp_enabled { "enabled" } else { "disabled" },
                s.dynamic_leases,
                s.reserved_leases,
                s.reservations
            ),
        ),
        ("Routing", output::or_dash(&protocols)),
        ("Static routes", s.static_routes.to_string()),
        ("VLANs", s.vlans.to_string()),
        ("VRFs", format!("{} of {} active", s.active_vrfs, s.total_vrfs)),
        (
            "Firewall",
            format!(
                "{} of {} rules active, {} devices blocked",
                s.active_firewall_rules, s.firewall_rules, s.blocked_devices
            ),
        ),
        ("VPN", if s.vpn_enabled { "enabled" } else { "disabled" }.to_string()),
        (
            "QoS",
            output::status(&qos, s.qos_allocated_percent <= 100, color),
        ),
        (
            "Resources",
            format!(
                "CPU {}, memory {}, {} interface errors",
                output::status(&s.cpu_usage.to_string(), s.cpu_usage.percent() < 80, color),
                output::status(&s.memory_usage.to_string(), s.memory_usage.percent() < 90, color),
                s.interface_errors
            ),
        ),
        (
            "Logs",
            format!("{} errors, {} warnings", s.log_errors, s.log_warnings),
        ),
    ])
}

pub fn handle(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let color = util::color(global);
    util::print_single(
        global,
        &console.dashboard(),
        |s| summary_detail(s, color),
        |s| s.hostname.clone(),
    )
}
