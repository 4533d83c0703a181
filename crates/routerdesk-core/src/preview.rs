// ── Command preview renderer ──
//
// Pure projections of console state into IOS-style configuration text.
// Each section keeps only the records that would actually be configured
// (interfaces that are up and addressed, active VRFs, enabled protocols,
// active firewall rules) and emits a fixed template per record.

use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

use crate::model::{
    BgpNeighbor, DhcpReservation, DhcpServerSettings, FirewallAction, FirewallProtocol,
    FirewallRule, NetworkInterface, OspfArea, PortMode, RoutingProtocols, StaticRoute,
    SwitchPort, Vlan, Vrf,
};

/// Name of the extended access list the firewall section renders into.
pub const FIREWALL_ACL: &str = "ROUTERDESK_FW";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewLine {
    pub indent: u8,
    pub text: String,
    pub comment: bool,
}

/// Ordered configuration lines. `Display` renders the IOS text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommandPreview {
    lines: Vec<PreviewLine>,
}

impl CommandPreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(0, text, true)
    }

    /// Top-level command.
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(0, text, false)
    }

    /// Command inside the current configuration mode.
    pub fn sub(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(1, text, false)
    }

    pub fn extend(&mut self, other: CommandPreview) {
        self.lines.extend(other.lines);
    }

    pub fn lines(&self) -> &[PreviewLine] {
        &self.lines
    }

    /// Command lines only, without indentation or comments.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|l| !l.comment)
            .map(|l| l.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn push(&mut self, indent: u8, text: impl Into<String>, comment: bool) -> &mut Self {
        self.lines.push(PreviewLine {
            indent,
            text: text.into(),
            comment,
        });
        self
    }
}

impl fmt::Display for CommandPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            for _ in 0..line.indent {
                f.write_str(" ")?;
            }
            if line.comment {
                f.write_str("# ")?;
            }
            writeln!(f, "{}", line.text)?;
        }
        Ok(())
    }
}

/// A record that renders its own configuration block.
pub trait RenderCommands {
    /// Whether the record belongs in the generated configuration.
    fn included(&self) -> bool {
        true
    }

    fn render(&self, out: &mut CommandPreview);
}

/// Title comment followed by every included record, or nothing at all.
fn render_section<'a, T, I>(title: &str, records: I) -> CommandPreview
where
    T: RenderCommands + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut out = CommandPreview::new();
    let mut body = CommandPreview::new();
    for record in records.into_iter().filter(|r| r.included()) {
        record.render(&mut body);
    }
    if !body.is_empty() {
        out.comment(title);
        out.extend(body);
    }
    out
}

// ── Interfaces ─────────────────────────────────────────────────────

impl RenderCommands for NetworkInterface {
    fn included(&self) -> bool {
        self.is_configured()
    }

    fn render(&self, out: &mut CommandPreview) {
        out.line(format!("interface {}", self.name));
        out.sub(format!("ip address {} {}", self.ip, self.mask));
        out.sub(format!("description {}", self.description));
        out.sub("no shutdown").sub("exit");
    }
}

pub fn interfaces<'a>(ifaces: impl IntoIterator<Item = &'a NetworkInterface>) -> CommandPreview {
    render_section("Active interface configuration", ifaces)
}

// ── VRFs ───────────────────────────────────────────────────────────

impl RenderCommands for Vrf {
    fn included(&self) -> bool {
        self.is_active()
    }

    fn render(&self, out: &mut CommandPreview) {
        out.line(format!("vrf definition {}", self.name));
        out.sub(format!("rd {}", self.rd));
        for rt in &self.rt_import {
            out.sub(format!("route-target import {rt}"));
        }
        for rt in &self.rt_export {
            out.sub(format!("route-target export {rt}"));
        }
        out.sub("address-family ipv4")
            .sub("exit-address-family")
            .sub("exit");
        out.comment(format!("Interface assignment for {}", self.name));
        for iface in &self.interfaces {
            out.line(format!("interface {iface}"));
            out.sub(format!("vrf forwarding {}", self.name)).sub("exit");
        }
    }
}

pub fn vrfs<'a>(vrfs: impl IntoIterator<Item = &'a Vrf>) -> CommandPreview {
    render_section("VRF configuration", vrfs)
}

// ── Routing ────────────────────────────────────────────────────────

impl RenderCommands for StaticRoute {
    fn render(&self, out: &mut CommandPreview) {
        out.line(format!(
            "ip route {} {} {} {}",
            self.network,
            self.mask,
            self.next_hop(),
            self.distance
        ));
    }
}

/// Enabled protocol processes followed by the static routes.
pub fn routing<'a>(
    protocols: &RoutingProtocols,
    areas: impl IntoIterator<Item = &'a OspfArea>,
    neighbors: impl IntoIterator<Item = &'a BgpNeighbor>,
    routes: impl IntoIterator<Item = &'a StaticRoute>,
) -> CommandPreview {
    let mut body = CommandPreview::new();

    if protocols.ospf.enabled {
        body.line(format!("router ospf {}", protocols.ospf.process_id));
        if !protocols.ospf.router_id.is_empty() {
            body.sub(format!("router-id {}", protocols.ospf.router_id));
        }
        for area in areas {
            for network in &area.networks {
                body.sub(format!("network {network} area {}", area.area_id));
            }
        }
        body.sub("exit");
    }
    if protocols.eigrp.enabled {
        body.line(format!("router eigrp {}", protocols.eigrp.asn));
        body.sub("exit");
    }
    if protocols.bgp.enabled {
        body.line(format!("router bgp {}", protocols.bgp.asn));
        if !protocols.bgp.router_id.is_empty() {
            body.sub(format!("bgp router-id {}", protocols.bgp.router_id));
        }
        for neighbor in neighbors {
            body.sub(format!(
                "neighbor {} remote-as {}",
                neighbor.ip, neighbor.remote_as
            ));
        }
        body.sub("exit");
    }
    if protocols.rip.enabled {
        body.line("router rip");
        body.sub(format!("version {}", protocols.rip.version));
        body.sub("exit");
    }

    let mut out = CommandPreview::new();
    if !body.is_empty() {
        out.comment("Routing protocols");
        out.extend(body);
    }
    out.extend(render_section("Static routes", routes));
    out
}

// ── VLANs ──────────────────────────────────────────────────────────

impl RenderCommands for Vlan {
    fn render(&self, out: &mut CommandPreview) {
        out.line(format!("vlan {}", self.vlan_id));
        out.sub(format!("name {}", self.name)).sub("exit");
    }
}

impl RenderCommands for SwitchPort {
    fn render(&self, out: &mut CommandPreview) {
        out.line(format!("interface {}", self.port));
        match self.mode {
            PortMode::Access => {
                out.sub("switchport mode access");
                out.sub(format!("switchport access vlan {}", self.vlans));
            }
            PortMode::Trunk => {
                out.sub("switchport mode trunk");
                out.sub(format!("switchport trunk allowed vlan {}", self.vlans));
            }
        }
        out.sub("exit");
    }
}

pub fn vlans<'a>(
    vlans: impl IntoIterator<Item = &'a Vlan>,
    ports: impl IntoIterator<Item = &'a SwitchPort>,
) -> CommandPreview {
    let mut out = render_section("VLAN database", vlans);
    out.extend(render_section("Switch port membership", ports));
    out
}

// ── DHCP ───────────────────────────────────────────────────────────

impl RenderCommands for DhcpReservation {
    fn render(&self, out: &mut CommandPreview) {
        out.line(format!("ip dhcp pool {}", self.hostname));
        out.sub(format!("host {} 255.255.255.255", self.ip));
        out.sub(format!("hardware-address {}", dotted_mac(&self.mac)));
        out.sub("exit");
    }
}

/// Server pool block (when enabled) plus one host pool per reservation.
pub fn dhcp<'a>(
    settings: &DhcpServerSettings,
    reservations: impl IntoIterator<Item = &'a DhcpReservation>,
) -> CommandPreview {
    let mut out = CommandPreview::new();
    if settings.enabled {
        out.comment(format!(
            "DHCP server pool {} - {}",
            settings.pool_start, settings.pool_end
        ));
        out.line("ip dhcp pool LAN");
        if !settings.gateway.is_empty() {
            out.sub(format!("default-router {}", settings.gateway));
        }
        let dns: Vec<&str> = [settings.dns_primary.as_str(), settings.dns_secondary.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !dns.is_empty() {
            out.sub(format!("dns-server {}", dns.join(" ")));
        }
        out.sub(format!(
            "lease {} {}",
            settings.lease_hours / 24,
            settings.lease_hours % 24
        ));
        out.sub("exit");
    }
    out.extend(render_section("DHCP reservations", reservations));
    out
}

/// `AA:BB:CC:DD:EE:FF` → `aabb.ccdd.eeff`; anything else is left as typed.
fn dotted_mac(mac: &str) -> String {
    let hex: String = mac
        .chars()
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let stripped_len = mac.chars().filter(|c| !matches!(c, ':' | '-' | '.')).count();
    if hex.len() != 12 || stripped_len != 12 {
        return mac.to_owned();
    }
    format!("{}.{}.{}", &hex[0..4], &hex[4..8], &hex[8..12])
}

// ── Firewall ───────────────────────────────────────────────────────

impl RenderCommands for FirewallRule {
    fn included(&self) -> bool {
        self.is_active()
    }

    fn render(&self, out: &mut CommandPreview) {
        let verb = match self.action {
            FirewallAction::Allow => "permit",
            FirewallAction::Deny | FirewallAction::Drop => "deny",
        };
        let protocol = match self.protocol {
            FirewallProtocol::Tcp => "tcp",
            FirewallProtocol::Udp => "udp",
            FirewallProtocol::Icmp => "icmp",
            FirewallProtocol::Any => "ip",
        };
        let mut entry = format!(
            "{verb} {protocol} {} {}",
            acl_address(&self.source),
            acl_address(&self.destination)
        );
        if matches!(self.protocol, FirewallProtocol::Tcp | FirewallProtocol::Udp) {
            if let Some(ports) = acl_ports(&self.port) {
                entry.push(' ');
                entry.push_str(&ports);
            }
        }
        out.sub(format!("remark {}", self.name));
        out.sub(entry);
    }
}

pub fn firewall<'a>(rules: impl IntoIterator<Item = &'a FirewallRule>) -> CommandPreview {
    let mut body = CommandPreview::new();
    for rule in rules.into_iter().filter(|r| r.included()) {
        rule.render(&mut body);
    }
    let mut out = CommandPreview::new();
    if !body.is_empty() {
        out.comment("Firewall access list");
        out.line(format!("ip access-list extended {FIREWALL_ACL}"));
        out.extend(body);
        out.sub("exit");
    }
    out
}

/// `Any` → `any`, host → `host A.B.C.D`, prefix → `net wildcard`.
fn acl_address(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("any") {
        return "any".into();
    }
    if let Ok(host) = text.parse::<Ipv4Addr>() {
        return format!("host {host}");
    }
    if let Some((net, len)) = text.split_once('/') {
        if let (Ok(net), Ok(len)) = (net.parse::<Ipv4Addr>(), len.parse::<u32>()) {
            if len <= 32 {
                let wildcard = u32::MAX.checked_shr(len).unwrap_or(0);
                return format!("{net} {}", Ipv4Addr::from(wildcard));
            }
        }
    }
    text.to_owned()
}

/// `22` → `eq 22`, `80,443` → `eq 80 443`, `6881-6889` → `range 6881 6889`.
fn acl_ports(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("any") {
        return None;
    }
    if let Some((lo, hi)) = text.split_once('-') {
        return Some(format!("range {} {}", lo.trim(), hi.trim()));
    }
    let ports: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    Some(format!("eq {}", ports.join(" ")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{ActivityStatus, LinkStatus};

    fn iface(name: &str, ip: &str, status: LinkStatus) -> NetworkInterface {
        NetworkInterface {
            name: name.into(),
            ip: ip.into(),
            mask: "255.255.255.0".into(),
            status,
            description: "LAN".into(),
            ..NetworkInterface::default()
        }
    }

    #[test]
    fn interface_section_skips_down_and_unaddressed() {
        let data = [
            iface("Gi0/0/1", "192.168.1.1", LinkStatus::Up),
            iface("Gi0/0/2", "10.0.0.1", LinkStatus::Down),
            iface("Gi0/0/3", "", LinkStatus::Up),
        ];
        assert_eq!(
            interfaces(&data).to_string(),
            "# Active interface configuration\n\
             interface Gi0/0/1\n \
             ip address 192.168.1.1 255.255.255.0\n \
             description LAN\n \
             no shutdown\n \
             exit\n"
        );
    }

    #[test]
    fn blank_description_still_renders_its_line() {
        let mut wan = iface("Gi0/0/0", "203.0.113.2", LinkStatus::Up);
        wan.description.clear();
        let preview = interfaces(&[wan]);
        assert_eq!(
            preview.commands().collect::<Vec<_>>(),
            [
                "interface Gi0/0/0",
                "ip address 203.0.113.2 255.255.255.0",
                "description ",
                "no shutdown",
                "exit",
            ]
        );
    }

    #[test]
    fn empty_section_renders_nothing() {
        let data = [iface("Gi0/0/2", "10.0.0.1", LinkStatus::Down)];
        assert!(interfaces(&data).is_empty());
    }

    #[test]
    fn vrf_block_lists_targets_and_interfaces() {
        let vrf = Vrf {
            name: "MGMT".into(),
            rd: "65001:999".into(),
            rt_import: vec!["65001:999".into()],
            rt_export: vec!["65001:999".into()],
            interfaces: vec!["Loopback1".into()],
            status: ActivityStatus::Active,
            ..Vrf::default()
        };
        let text = vrfs([&vrf]).to_string();
        assert_eq!(
            text,
            "# VRF configuration\n\
             vrf definition MGMT\n \
             rd 65001:999\n \
             route-target import 65001:999\n \
             route-target export 65001:999\n \
             address-family ipv4\n \
             exit-address-family\n \
             exit\n\
             # Interface assignment for MGMT\n\
             interface Loopback1\n \
             vrf forwarding MGMT\n \
             exit\n"
        );
    }

    #[test]
    fn static_route_uses_interface_without_gateway() {
        let route = StaticRoute {
            network: "10.20.0.0".into(),
            mask: "255.255.0.0".into(),
            interface: "Serial0/1/0".into(),
            distance: 5,
            ..StaticRoute::default()
        };
        let preview = routing(&RoutingProtocols::default(), [], [], [&route]);
        assert_eq!(
            preview.commands().collect::<Vec<_>>(),
            ["ip route 10.20.0.0 255.255.0.0 Serial0/1/0 5"]
        );
    }

    #[test]
    fn enabled_protocols_render_processes() {
        let mut protocols = RoutingProtocols::default();
        protocols.ospf.enabled = true;
        protocols.ospf.router_id = "1.1.1.1".into();
        protocols.bgp.enabled = true;
        let area = OspfArea {
            area_id: "0".into(),
            networks: vec!["192.168.1.0 0.0.0.255".into()],
            ..OspfArea::default()
        };
        let neighbor = BgpNeighbor {
            ip: "203.0.113.10".into(),
            remote_as: 65002,
            ..BgpNeighbor::default()
        };
        let preview = routing(&protocols, [&area], [&neighbor], []);
        assert_eq!(
            preview.commands().collect::<Vec<_>>(),
            [
                "router ospf 1",
                "router-id 1.1.1.1",
                "network 192.168.1.0 0.0.0.255 area 0",
                "exit",
                "router bgp 65001",
                "neighbor 203.0.113.10 remote-as 65002",
                "exit",
            ]
        );
    }

    #[test]
    fn firewall_rules_map_to_extended_acl() {
        let rules = [
            FirewallRule {
                name: "Allow SSH".into(),
                source: "192.168.1.0/24".into(),
                destination: "192.168.1.10".into(),
                port: "22".into(),
                status: ActivityStatus::Active,
                ..FirewallRule::default()
            },
            FirewallRule {
                name: "Block Torrent".into(),
                source: "Any".into(),
                destination: "Any".into(),
                port: "6881-6889".into(),
                action: FirewallAction::Deny,
                status: ActivityStatus::Active,
                ..FirewallRule::default()
            },
            FirewallRule {
                name: "Disabled".into(),
                source: "Any".into(),
                destination: "Any".into(),
                status: ActivityStatus::Inactive,
                ..FirewallRule::default()
            },
        ];
        assert_eq!(
            firewall(&rules).commands().collect::<Vec<_>>(),
            [
                "ip access-list extended ROUTERDESK_FW",
                "remark Allow SSH",
                "permit tcp 192.168.1.0 0.0.0.255 host 192.168.1.10 eq 22",
                "remark Block Torrent",
                "deny tcp any any range 6881 6889",
                "exit",
            ]
        );
    }

    #[test]
    fn trunk_and_access_ports() {
        let ports = [
            SwitchPort {
                port: "1".into(),
                vlans: "10".into(),
                ..SwitchPort::default()
            },
            SwitchPort {
                port: "4".into(),
                mode: PortMode::Trunk,
                vlans: "1,10,20".into(),
                ..SwitchPort::default()
            },
        ];
        let text: Vec<_> = vlans([], &ports).commands().map(str::to_owned).collect();
        assert!(text.contains(&"switchport access vlan 10".to_owned()));
        assert!(text.contains(&"switchport trunk allowed vlan 1,10,20".to_owned()));
    }

    #[test]
    fn dhcp_host_pools_use_dotted_mac() {
        let settings = DhcpServerSettings::default();
        let reservation = DhcpReservation {
            hostname: "Printer".into(),
            mac: "AA:BB:CC:DD:EE:FF".into(),
            ip: "192.168.1.50".into(),
            ..DhcpReservation::default()
        };
        let preview = dhcp(&settings, [&reservation]);
        assert!(
            preview
                .commands()
                .any(|l| l == "hardware-address aabb.ccdd.eeff")
        );
        assert_eq!(dotted_mac("not-a-mac"), "not-a-mac");
    }
}
