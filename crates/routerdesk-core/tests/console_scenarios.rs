//! End-to-end scenarios against a seeded console.
#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use routerdesk_core::{
    ActivityStatus, Command, CommandResult, Console, ConsoleConfig, CoreError,
    CreateReservationRequest, CreateVlanRequest, CreateVrfRequest, DuplicatePolicy,
    FormController, LinkStatus, NotificationLevel, RecordFilter, RecordId, RoutingProtocol,
    UpdateInterfaceRequest, UpdateProtocolRequest, UpdateQosSettingsRequest,
    UpdateVpnSettingsRequest, ValidationPolicy, VpnProtocol,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn console_with(policy: ValidationPolicy) -> Console {
    Console::in_memory(ConsoleConfig {
        validation: policy,
        ..ConsoleConfig::default()
    })
}

fn reject_duplicates() -> ValidationPolicy {
    ValidationPolicy {
        strict: false,
        duplicates: DuplicatePolicy::Reject,
    }
}

fn printer() -> CreateReservationRequest {
    CreateReservationRequest {
        hostname: "Printer".into(),
        mac: "AA:BB:CC:DD:EE:FF".into(),
        ip: "192.168.1.50".into(),
        ..CreateReservationRequest::default()
    }
}

// ── DHCP ────────────────────────────────────────────────────────────

#[test]
fn reservation_create_then_delete_restores_list() {
    let mut console = Console::default();
    let before = console.dhcp().reservations.to_vec();

    let CommandResult::Reservation(created) =
        console.execute(Command::CreateReservation(printer())).unwrap()
    else {
        panic!("expected a reservation");
    };
    assert_eq!(created.description, "");
    let matching = console
        .dhcp()
        .reservations
        .iter()
        .filter(|r| r.hostname == "Printer")
        .count();
    assert_eq!(matching, 1);

    console
        .execute(Command::DeleteReservation { id: created.id })
        .unwrap();
    assert_eq!(console.dhcp().reservations.to_vec(), before);
}

#[test]
fn release_lease_removes_by_ip() {
    let mut console = Console::default();
    let result = console
        .execute(Command::ReleaseLease {
            ip: "192.168.1.102".into(),
        })
        .unwrap();
    let CommandResult::Released(released) = result else {
        panic!("expected released leases");
    };
    assert_eq!(released[0].hostname, "iPhone-12");
    assert_eq!(console.dhcp().leases.len(), 4);

    let err = console
        .execute(Command::ReleaseLease {
            ip: "192.168.1.102".into(),
        })
        .unwrap_err();
    assert!(err.is_not_found());
}

// ── VRFs ────────────────────────────────────────────────────────────

#[test]
fn vrf_form_scenario() {
    let mut console = Console::default();
    let mut form = FormController::<CreateVrfRequest>::create();
    form.set_field("name", "CUSTOMER_C").unwrap();
    form.set_field("rd", "65001:400").unwrap();
    form.set_field("rt_import", "65001:400, 65001:999").unwrap();

    let vrf = console.commit_form(&mut form).unwrap();
    assert_eq!(vrf.rt_import, ["65001:400", "65001:999"]);
    assert_eq!(vrf.status, ActivityStatus::Inactive);
    assert!(vrf.interfaces.is_empty());
    assert!(vrf.routes.is_empty());
    assert_eq!(form.value("name"), "");

    let last = console.sink().last().unwrap();
    assert_eq!(last.level, NotificationLevel::Success);
    assert!(last.message.contains("CUSTOMER_C"));
}

#[test]
fn failed_form_keeps_draft_and_store() {
    let mut console = Console::default();
    let before = console.vlans().vlans.len();
    let mut form = FormController::<CreateVlanRequest>::create();
    form.set_field("vlan_id", "40").unwrap();
    form.set_field("name", "Lab").unwrap();

    let err = console.commit_form(&mut form).unwrap_err();
    assert_eq!(err.field(), Some("subnet"));
    assert_eq!(form.value("name"), "Lab");
    assert_eq!(console.vlans().vlans.len(), before);
    assert_eq!(
        console.sink().last().map(|n| n.level),
        Some(NotificationLevel::Error)
    );
}

#[test]
fn inactive_vrf_is_left_out_of_preview() {
    let mut console = Console::default();
    let preview = console.vrf_preview().to_string();
    assert!(preview.contains("vrf definition MGMT"));
    assert!(!preview.contains("INTERNET"));

    let internet = console
        .vrfs()
        .vrfs
        .find(|v| v.name == "INTERNET")
        .unwrap()
        .id;
    console.execute(Command::ToggleVrf { id: internet }).unwrap();
    assert!(console.vrf_preview().to_string().contains("vrf definition INTERNET"));
}

#[test]
fn assigning_an_interface_twice_conflicts() {
    let mut console = Console::default();
    let id = RecordId::new(4);
    console
        .execute(Command::AssignVrfInterface {
            id,
            interface: " Serial0/1/2 ".into(),
        })
        .unwrap();
    let err = console
        .execute(Command::AssignVrfInterface {
            id,
            interface: "Serial0/1/2".into(),
        })
        .unwrap_err();
    assert!(matches!(err, CoreError::Conflict { .. }));

    console
        .execute(Command::UnassignVrfInterface {
            id,
            interface: "Serial0/1/2".into(),
        })
        .unwrap();
    assert_eq!(console.vrfs().vrfs.get(id).unwrap().interfaces, ["Serial0/1/1"]);
}

// ── Interfaces ──────────────────────────────────────────────────────

#[test]
fn toggling_an_interface_down_removes_it_from_preview() {
    let mut console = Console::default();
    let id = RecordId::new(1);
    assert!(
        console
            .interface_preview()
            .commands()
            .any(|l| l == "interface GigabitEthernet0/0/1")
    );

    console.execute(Command::ToggleInterface { id }).unwrap();
    assert_eq!(
        console.interfaces().interfaces.get(id).unwrap().status,
        LinkStatus::Down
    );
    assert!(
        !console
            .interface_preview()
            .commands()
            .any(|l| l == "interface GigabitEthernet0/0/1")
    );

    console.execute(Command::ToggleInterface { id }).unwrap();
    assert_eq!(
        console.interfaces().interfaces.get(id).unwrap().status,
        LinkStatus::Up
    );
}

#[test]
fn update_changes_only_patched_fields() {
    let mut console = Console::default();
    let id = RecordId::new(2);
    let before = console.interfaces().interfaces.get(id).unwrap().clone();

    console
        .execute(Command::UpdateInterface {
            id,
            update: UpdateInterfaceRequest {
                description: Some("Servers".into()),
                ..UpdateInterfaceRequest::default()
            },
        })
        .unwrap();

    let after = console.interfaces().interfaces.get(id).unwrap();
    assert_eq!(after.description, "Servers");
    assert_eq!(after.ip, before.ip);
    assert_eq!(after.mask, before.mask);
    assert_eq!(after.status, before.status);
    assert_eq!(after.speed, before.speed);
}

// ── Routing ─────────────────────────────────────────────────────────

#[test]
fn enabling_ospf_renders_area_networks() {
    let mut console = Console::default();
    let mut update = UpdateProtocolRequest::new(RoutingProtocol::Ospf);
    update.enabled = Some(true);
    console.execute(Command::UpdateProtocol(update)).unwrap();

    let lines: Vec<_> = console.routing_preview().commands().map(str::to_owned).collect();
    assert!(lines.contains(&"router ospf 1".to_owned()));
    assert!(lines.contains(&"network 172.16.0.0 0.0.255.255 area 1".to_owned()));
    assert!(lines.contains(&"ip route 0.0.0.0 0.0.0.0 203.0.113.1 1".to_owned()));
}

#[test]
fn invalid_rip_version_leaves_settings_untouched() {
    let mut console = Console::default();
    let before = console.routing().protocols.clone();
    let mut update = UpdateProtocolRequest::new(RoutingProtocol::Rip);
    update.version = Some(3);
    assert!(console.execute(Command::UpdateProtocol(update)).is_err());
    assert_eq!(console.routing().protocols, before);
}

// ── Identity and duplicates ─────────────────────────────────────────

#[test]
fn ids_are_not_reused_after_delete() {
    let mut console = Console::default();
    let CommandResult::Reservation(first) =
        console.execute(Command::CreateReservation(printer())).unwrap()
    else {
        panic!("expected a reservation");
    };
    console
        .execute(Command::DeleteReservation { id: first.id })
        .unwrap();
    let CommandResult::Reservation(second) =
        console.execute(Command::CreateReservation(printer())).unwrap()
    else {
        panic!("expected a reservation");
    };
    assert!(second.id > first.id);
}

#[test]
fn duplicate_policy_decides_conflicts() {
    // Seed data already holds a reservation with this MAC.
    let mut allow = Console::default();
    assert!(allow.execute(Command::CreateReservation(printer())).is_ok());

    let mut reject = console_with(reject_duplicates());
    let err = reject
        .execute(Command::CreateReservation(printer()))
        .unwrap_err();
    assert!(matches!(err, CoreError::Conflict { ref field, .. } if field == "mac"));
}

#[test]
fn strict_mode_rejects_bad_vlan_range() {
    let mut console = console_with(ValidationPolicy {
        strict: true,
        duplicates: DuplicatePolicy::Allow,
    });
    let request = CreateVlanRequest {
        vlan_id: "5000".into(),
        name: "Too high".into(),
        subnet: "10.50.0.0/24".into(),
        ..CreateVlanRequest::default()
    };
    let err = console.execute(Command::CreateVlan(request)).unwrap_err();
    assert_eq!(err.field(), Some("vlan_id"));
}

// ── Filtering ───────────────────────────────────────────────────────

#[test]
fn command_reference_filter_finds_bgp_summary() {
    let console = Console::default();
    let filter = RecordFilter::new().category("Enrutamiento").query("bgp");
    let hits = filter.apply(console.terminal().reference.iter());
    let commands: Vec<_> = hits.iter().map(|c| c.command.as_str()).collect();
    assert_eq!(commands, ["show ip bgp summary"]);
}

#[test]
fn command_reference_category_is_case_sensitive() {
    let console = Console::default();
    let reference = &console.terminal().reference;
    assert!(
        RecordFilter::new()
            .category("ENRUTAMIENTO")
            .apply(reference.iter())
            .is_empty()
    );
    assert_eq!(
        RecordFilter::new()
            .category("Enrutamiento")
            .apply(reference.iter())
            .len(),
        4
    );
}

#[test]
fn empty_filter_is_identity_and_idempotent() {
    let console = Console::default();
    let logs: Vec<_> = console.logs().recent().collect();
    let identity = RecordFilter::new().category("all");
    assert_eq!(identity.apply(logs.iter().copied()), logs);

    let filter = RecordFilter::new().category("network").facet("level", "error");
    let once = filter.apply(logs.iter().copied());
    let twice = filter.apply(once.iter().copied());
    assert_eq!(once, twice);
    assert_eq!(once.len(), 1);
    assert_eq!(once[0].message, "Pérdida de conectividad WAN");
}

// ── Settings objects ────────────────────────────────────────────────

#[test]
fn vpn_update_merges_fields() {
    let mut console = Console::default();
    let update = UpdateVpnSettingsRequest {
        enabled: Some(true),
        protocol: Some(VpnProtocol::WireGuard),
        port: Some(51820),
        ..UpdateVpnSettingsRequest::default()
    };
    let CommandResult::VpnSettings(vpn) =
        console.execute(Command::UpdateVpnSettings(update)).unwrap()
    else {
        panic!("expected VPN settings");
    };
    assert!(vpn.enabled);
    assert_eq!(vpn.port, 51820);
    assert_eq!(vpn.encryption.to_string(), "AES-256");
    assert_eq!(console.security().vpn, vpn);
    let last = console.sink().last().unwrap();
    assert_eq!(last.message, "VPN settings saved (WireGuard on port 51820)");
}

#[test]
fn rejected_vpn_port_leaves_settings_untouched() {
    let mut console = Console::default();
    let before = console.security().vpn.clone();
    let update = UpdateVpnSettingsRequest {
        enabled: Some(true),
        port: Some(0),
        ..UpdateVpnSettingsRequest::default()
    };
    let err = console.execute(Command::UpdateVpnSettings(update)).unwrap_err();
    assert_eq!(err.field(), Some("port"));
    assert_eq!(console.security().vpn, before);
}

#[test]
fn qos_switch_keeps_measured_usage() {
    let mut console = Console::default();
    let usage = console.qos().settings.usage;
    let update = UpdateQosSettingsRequest {
        enabled: Some(false),
        ..UpdateQosSettingsRequest::default()
    };
    console.execute(Command::UpdateQosSettings(update)).unwrap();
    assert!(!console.qos().settings.enabled);
    assert_eq!(console.qos().settings.usage, usage);
    assert!(!console.dashboard().qos_enabled);
}

// ── Logs and monitoring ─────────────────────────────────────────────

#[test]
fn export_returns_filtered_entries_without_mutating() {
    let mut console = Console::default();
    let before = console.logs().entries.len();
    let filter = RecordFilter::new().facet("level", "error");
    let CommandResult::Exported(entries) = console.execute(Command::ExportLogs(filter)).unwrap()
    else {
        panic!("expected exported entries");
    };
    let messages: Vec<_> = entries.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        ["Intento de acceso bloqueado", "Pérdida de conectividad WAN"]
    );
    assert_eq!(console.logs().entries.len(), before);
    let last = console.sink().last().unwrap();
    assert_eq!(last.message, "2 log entries exported");
}

#[test]
fn monitoring_filters_by_exact_interface_name() {
    let console = Console::default();
    let monitoring = console.monitoring();
    assert_eq!(monitoring.stats_for("all").len(), 4);

    let serial = monitoring.stats_for("Serial0/1/0");
    assert_eq!(serial.len(), 1);
    assert_eq!(serial[0].utilization, 78);
    assert_eq!(serial[0].bandwidth, "1544 Kbps");

    assert!(monitoring.stats_for("serial0/1/0").is_empty());
    assert_eq!(monitoring.interfaces_up(), 3);
}

#[test]
fn refresh_restamps_resources_only() {
    let mut console = Console::default();
    let before = console.monitoring().resources.clone();
    let CommandResult::Monitoring(after) = console.execute(Command::RefreshMonitoring).unwrap()
    else {
        panic!("expected a resource snapshot");
    };
    assert_ne!(after.sampled_at, before.sampled_at);
    assert_eq!(after.cpu, before.cpu);
    assert_eq!(after.memory, before.memory);
    assert_eq!(
        console
            .monitoring()
            .resources
            .oversubscribed_pools()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>(),
        ["Driver"]
    );
}

// ── Notifications ───────────────────────────────────────────────────

#[test]
fn every_command_emits_exactly_one_notification() {
    let mut console = Console::default();
    console
        .execute(Command::ToggleFirewallRule { id: RecordId::new(1) })
        .unwrap();
    console
        .execute(Command::DeleteVlan { id: RecordId::new(99) })
        .unwrap_err();
    console.execute(Command::ClearLogs).unwrap();

    let levels: Vec<_> = console.sink().iter().map(|n| n.level).collect();
    assert_eq!(
        levels,
        [
            NotificationLevel::Success,
            NotificationLevel::Error,
            NotificationLevel::Success
        ]
    );
    assert!(console.logs().entries.is_empty());
}

#[test]
fn revision_moves_only_on_accepted_commands() {
    let mut console = Console::default();
    assert_eq!(console.revision(), 0);
    console
        .execute(Command::DeleteVlan { id: RecordId::new(99) })
        .unwrap_err();
    assert_eq!(console.revision(), 0);
    console
        .execute(Command::ToggleInterface { id: RecordId::new(1) })
        .unwrap();
    assert_eq!(console.revision(), 1);
}
