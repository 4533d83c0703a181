// ── Dialog drafts ──
//
// The `Create*Request` structs are both the payload of create commands and
// the buffers behind the create/edit dialogs. Every field is kept as the
// text the user typed; list fields are comma-separated.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::form::{Draft, FieldSpec, typed, typed_choice};
use crate::model::{
    BgpNeighbor, DeviceLimit, DhcpReservation, Duplex, FirewallAction, FirewallProtocol,
    FirewallRule, InterfaceKind, LinkStatus, NetworkInterface, OspfArea, OspfAreaKind, PortMode,
    Priority, StaticRoute, SwitchPort, Vlan, Vrf,
};
use crate::validate::{choice, number, split_list};

const INTERFACE_KINDS: &[&str] = &["Ethernet", "Serial", "Loopback"];
const LINK_STATES: &[&str] = &["up", "down"];
const DUPLEX_MODES: &[&str] = &["auto", "full", "half", "n/a"];
const AREA_KINDS: &[&str] = &["Standard", "Stub", "NSSA"];
const PORT_MODES: &[&str] = &["access", "trunk"];
const PROTOCOLS: &[&str] = &["TCP", "UDP", "ICMP", "Any"];
const ACTIONS: &[&str] = &["ALLOW", "DENY", "DROP"];
const PRIORITIES: &[&str] = &["high", "medium", "low"];

fn unknown<D: Draft>(name: &str) -> CoreError {
    CoreError::unknown_field(<D::Record as crate::store::Record>::KIND, name)
}

fn text(value: &str) -> String {
    value.trim().to_owned()
}

// ── Interfaces ─────────────────────────────────────────────────────

/// Edit dialog for an interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceForm {
    pub name: String,
    pub kind: String,
    pub ip: String,
    pub mask: String,
    pub status: String,
    pub description: String,
    pub duplex: String,
    pub speed: String,
}

impl InterfaceForm {
    fn write(&self, iface: &mut NetworkInterface) -> Result<(), CoreError> {
        iface.name = self.name.clone();
        if !self.kind.is_empty() {
            iface.kind = choice("kind", &self.kind, "Ethernet, Serial, Loopback")?;
        }
        if !self.status.is_empty() {
            iface.status = choice("status", &self.status, "up, down")?;
        }
        if !self.duplex.is_empty() {
            iface.duplex = choice("duplex", &self.duplex, "auto, full, half, n/a")?;
        }
        iface.ip = self.ip.clone();
        iface.mask = self.mask.clone();
        iface.description = self.description.clone();
        iface.speed = self.speed.clone();
        Ok(())
    }
}

impl Draft for InterfaceForm {
    type Record = NetworkInterface;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name", "Name").required(),
        FieldSpec::text("kind", "Type").choices(INTERFACE_KINDS),
        FieldSpec::text("ip", "IP address"),
        FieldSpec::text("mask", "Subnet mask"),
        FieldSpec::text("status", "Status").choices(LINK_STATES),
        FieldSpec::text("description", "Description"),
        FieldSpec::text("duplex", "Duplex").choices(DUPLEX_MODES),
        FieldSpec::text("speed", "Speed"),
    ];

    const CREATABLE: bool = false;

    fn field(&self, name: &str) -> Option<&str> {
        let value: &str = match name {
            "name" => &self.name,
            "kind" => &self.kind,
            "ip" => &self.ip,
            "mask" => &self.mask,
            "status" => &self.status,
            "description" => &self.description,
            "duplex" => &self.duplex,
            "speed" => &self.speed,
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        match name {
            "name" => self.name = text(value),
            "kind" => {
                self.kind = typed_choice::<InterfaceKind>(name, value, "Ethernet, Serial, Loopback")?;
            }
            "ip" => self.ip = text(value),
            "mask" => self.mask = text(value),
            "status" => self.status = typed_choice::<LinkStatus>(name, value, "up, down")?,
            "description" => self.description = text(value),
            "duplex" => self.duplex = typed_choice::<Duplex>(name, value, "auto, full, half, n/a")?,
            "speed" => self.speed = text(value),
            _ => return Err(unknown::<Self>(name)),
        }
        Ok(())
    }

    fn from_record(iface: &NetworkInterface) -> Self {
        Self {
            name: iface.name.clone(),
            kind: iface.kind.to_string(),
            ip: iface.ip.clone(),
            mask: iface.mask.clone(),
            status: iface.status.to_string(),
            description: iface.description.clone(),
            duplex: iface.duplex.to_string(),
            speed: iface.speed.clone(),
        }
    }

    fn build(&self) -> Result<NetworkInterface, CoreError> {
        let mut iface = NetworkInterface::default();
        self.write(&mut iface)?;
        Ok(iface)
    }

    fn merge_into(&self, iface: &mut NetworkInterface) -> Result<(), CoreError> {
        self.write(iface)
    }
}

// ── DHCP reservations ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateReservationRequest {
    pub hostname: String,
    pub mac: String,
    pub ip: String,
    pub description: String,
}

impl Draft for CreateReservationRequest {
    type Record = DhcpReservation;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("hostname", "Hostname").required(),
        FieldSpec::text("mac", "MAC address").required(),
        FieldSpec::text("ip", "IP address").required(),
        FieldSpec::text("description", "Description"),
    ];

    fn field(&self, name: &str) -> Option<&str> {
        let value: &str = match name {
            "hostname" => &self.hostname,
            "mac" => &self.mac,
            "ip" => &self.ip,
            "description" => &self.description,
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        match name {
            "hostname" => self.hostname = text(value),
            "mac" => self.mac = text(value),
            "ip" => self.ip = text(value),
            "description" => self.description = text(value),
            _ => return Err(unknown::<Self>(name)),
        }
        Ok(())
    }

    fn from_record(r: &DhcpReservation) -> Self {
        Self {
            hostname: r.hostname.clone(),
            mac: r.mac.clone(),
            ip: r.ip.clone(),
            description: r.description.clone(),
        }
    }

    fn build(&self) -> Result<DhcpReservation, CoreError> {
        let mut r = DhcpReservation::default();
        self.merge_into(&mut r)?;
        Ok(r)
    }

    fn merge_into(&self, r: &mut DhcpReservation) -> Result<(), CoreError> {
        r.hostname = self.hostname.clone();
        r.mac = self.mac.clone();
        r.ip = self.ip.clone();
        r.description = self.description.clone();
        Ok(())
    }
}

// ── Static routes ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateStaticRouteRequest {
    pub network: String,
    pub mask: String,
    pub gateway: String,
    pub interface: String,
    pub distance: String,
    pub description: String,
}

impl Default for CreateStaticRouteRequest {
    fn default() -> Self {
        Self {
            network: String::new(),
            mask: String::new(),
            gateway: String::new(),
            interface: String::new(),
            distance: "1".into(),
            description: String::new(),
        }
    }
}

impl Draft for CreateStaticRouteRequest {
    type Record = StaticRoute;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("network", "Network").required(),
        FieldSpec::text("mask", "Mask").required(),
        FieldSpec::text("gateway", "Gateway"),
        FieldSpec::text("interface", "Exit interface"),
        FieldSpec::text("distance", "Administrative distance"),
        FieldSpec::text("description", "Description"),
    ];

    fn field(&self, name: &str) -> Option<&str> {
        let value: &str = match name {
            "network" => &self.network,
            "mask" => &self.mask,
            "gateway" => &self.gateway,
            "interface" => &self.interface,
            "distance" => &self.distance,
            "description" => &self.description,
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        match name {
            "network" => self.network = text(value),
            "mask" => self.mask = text(value),
            "gateway" => self.gateway = text(value),
            "interface" => self.interface = text(value),
            "distance" => self.distance = typed::<u8>(name, value)?,
            "description" => self.description = text(value),
            _ => return Err(unknown::<Self>(name)),
        }
        Ok(())
    }

    fn from_record(route: &StaticRoute) -> Self {
        Self {
            network: route.network.clone(),
            mask: route.mask.clone(),
            gateway: route.gateway.clone(),
            interface: route.interface.clone(),
            distance: route.distance.to_string(),
            description: route.description.clone(),
        }
    }

    fn build(&self) -> Result<StaticRoute, CoreError> {
        let mut route = StaticRoute::default();
        self.merge_into(&mut route)?;
        Ok(route)
    }

    fn merge_into(&self, route: &mut StaticRoute) -> Result<(), CoreError> {
        route.network = self.network.clone();
        route.mask = self.mask.clone();
        route.gateway = self.gateway.clone();
        route.interface = self.interface.clone();
        route.distance = if self.distance.is_empty() {
            1
        } else {
            number("distance", &self.distance)?
        };
        route.description = self.description.clone();
        Ok(())
    }
}

// ── OSPF areas ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateOspfAreaRequest {
    pub area_id: String,
    pub kind: String,
    /// Comma-separated `network wildcard` pairs.
    pub networks: String,
}

impl Draft for CreateOspfAreaRequest {
    type Record = OspfArea;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("area_id", "Area ID").required(),
        FieldSpec::text("kind", "Area type").choices(AREA_KINDS),
        FieldSpec::text("networks", "Networks (comma separated)"),
    ];

    fn field(&self, name: &str) -> Option<&str> {
        let value: &str = match name {
            "area_id" => &self.area_id,
            "kind" => &self.kind,
            "networks" => &self.networks,
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        match name {
            "area_id" => self.area_id = text(value),
            "kind" => {
                self.kind = typed_choice::<OspfAreaKind>(name, value, "Standard, Stub, NSSA")?;
            }
            "networks" => self.networks = text(value),
            _ => return Err(unknown::<Self>(name)),
        }
        Ok(())
    }

    fn from_record(area: &OspfArea) -> Self {
        Self {
            area_id: area.area_id.clone(),
            kind: area.kind.to_string(),
            networks: area.networks.join(", "),
        }
    }

    fn build(&self) -> Result<OspfArea, CoreError> {
        let mut area = OspfArea::default();
        self.merge_into(&mut area)?;
        Ok(area)
    }

    fn merge_into(&self, area: &mut OspfArea) -> Result<(), CoreError> {
        area.area_id = self.area_id.clone();
        if !self.kind.is_empty() {
            area.kind = choice("kind", &self.kind, "Standard, Stub, NSSA")?;
        }
        area.networks = split_list(&self.networks);
        Ok(())
    }
}

// ── BGP neighbors ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateBgpNeighborRequest {
    pub ip: String,
    pub remote_as: String,
    pub description: String,
}

impl Draft for CreateBgpNeighborRequest {
    type Record = BgpNeighbor;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("ip", "Neighbor IP").required(),
        FieldSpec::text("remote_as", "Remote AS").required(),
        FieldSpec::text("description", "Description"),
    ];

    fn field(&self, name: &str) -> Option<&str> {
        let value: &str = match name {
            "ip" => &self.ip,
            "remote_as" => &self.remote_as,
            "description" => &self.description,
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        match name {
            "ip" => self.ip = text(value),
            "remote_as" => self.remote_as = typed::<u32>(name, value)?,
            "description" => self.description = text(value),
            _ => return Err(unknown::<Self>(name)),
        }
        Ok(())
    }

    fn from_record(n: &BgpNeighbor) -> Self {
        Self {
            ip: n.ip.clone(),
            remote_as: n.remote_as.to_string(),
            description: n.description.clone(),
        }
    }

    fn build(&self) -> Result<BgpNeighbor, CoreError> {
        let mut n = BgpNeighbor::default();
        self.merge_into(&mut n)?;
        Ok(n)
    }

    fn merge_into(&self, n: &mut BgpNeighbor) -> Result<(), CoreError> {
        n.ip = self.ip.clone();
        n.remote_as = number("remote_as", &self.remote_as)?;
        n.description = self.description.clone();
        Ok(())
    }
}

// ── VLANs ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateVlanRequest {
    pub vlan_id: String,
    pub name: String,
    pub description: String,
    pub subnet: String,
    /// Comma-separated port names.
    pub ports: String,
}

impl Draft for CreateVlanRequest {
    type Record = Vlan;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("vlan_id", "VLAN ID").required(),
        FieldSpec::text("name", "Name").required(),
        FieldSpec::text("description", "Description"),
        FieldSpec::text("subnet", "Subnet (CIDR)").required(),
        FieldSpec::text("ports", "Ports (comma separated)"),
    ];

    fn field(&self, name: &str) -> Option<&str> {
        let value: &str = match name {
            "vlan_id" => &self.vlan_id,
            "name" => &self.name,
            "description" => &self.description,
            "subnet" => &self.subnet,
            "ports" => &self.ports,
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        match name {
            "vlan_id" => self.vlan_id = typed::<u16>(name, value)?,
            "name" => self.name = text(value),
            "description" => self.description = text(value),
            "subnet" => self.subnet = text(value),
            "ports" => self.ports = text(value),
            _ => return Err(unknown::<Self>(name)),
        }
        Ok(())
    }

    fn from_record(v: &Vlan) -> Self {
        Self {
            vlan_id: v.vlan_id.to_string(),
            name: v.name.clone(),
            description: v.description.clone(),
            subnet: v.subnet.clone(),
            ports: v.ports.join(", "),
        }
    }

    fn build(&self) -> Result<Vlan, CoreError> {
        let mut v = Vlan::default();
        self.merge_into(&mut v)?;
        Ok(v)
    }

    fn merge_into(&self, v: &mut Vlan) -> Result<(), CoreError> {
        v.vlan_id = number("vlan_id", &self.vlan_id)?;
        v.name = self.name.clone();
        v.description = self.description.clone();
        v.subnet = self.subnet.clone();
        v.ports = split_list(&self.ports);
        Ok(())
    }
}

// ── Switch ports ───────────────────────────────────────────────────

/// Edit dialog for a switch port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchPortForm {
    pub port: String,
    pub mode: String,
    pub vlans: String,
    pub description: String,
}

impl Draft for SwitchPortForm {
    type Record = SwitchPort;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("port", "Port").required(),
        FieldSpec::text("mode", "Mode").choices(PORT_MODES),
        FieldSpec::text("vlans", "VLAN(s)"),
        FieldSpec::text("description", "Description"),
    ];

    const CREATABLE: bool = false;

    fn field(&self, name: &str) -> Option<&str> {
        let value: &str = match name {
            "port" => &self.port,
            "mode" => &self.mode,
            "vlans" => &self.vlans,
            "description" => &self.description,
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        match name {
            "port" => self.port = text(value),
            "mode" => self.mode = typed_choice::<PortMode>(name, value, "access, trunk")?,
            "vlans" => self.vlans = text(value),
            "description" => self.description = text(value),
            _ => return Err(unknown::<Self>(name)),
        }
        Ok(())
    }

    fn from_record(p: &SwitchPort) -> Self {
        Self {
            port: p.port.clone(),
            mode: p.mode.to_string(),
            vlans: p.vlans.clone(),
            description: p.description.clone(),
        }
    }

    fn build(&self) -> Result<SwitchPort, CoreError> {
        let mut p = SwitchPort::default();
        self.merge_into(&mut p)?;
        Ok(p)
    }

    fn merge_into(&self, p: &mut SwitchPort) -> Result<(), CoreError> {
        p.port = self.port.clone();
        if !self.mode.is_empty() {
            p.mode = choice("mode", &self.mode, "access, trunk")?;
        }
        p.vlans = self.vlans.clone();
        p.description = self.description.clone();
        Ok(())
    }
}

// ── VRFs ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateVrfRequest {
    pub name: String,
    pub rd: String,
    /// Comma-separated route targets.
    pub rt_import: String,
    pub rt_export: String,
    pub description: String,
}

impl Draft for CreateVrfRequest {
    type Record = Vrf;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name", "Name").required(),
        FieldSpec::text("rd", "Route distinguisher").required(),
        FieldSpec::text("rt_import", "Import route targets"),
        FieldSpec::text("rt_export", "Export route targets"),
        FieldSpec::text("description", "Description"),
    ];

    fn field(&self, name: &str) -> Option<&str> {
        let value: &str = match name {
            "name" => &self.name,
            "rd" => &self.rd,
            "rt_import" => &self.rt_import,
            "rt_export" => &self.rt_export,
            "description" => &self.description,
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        match name {
            "name" => self.name = text(value),
            "rd" => self.rd = text(value),
            "rt_import" => self.rt_import = text(value),
            "rt_export" => self.rt_export = text(value),
            "description" => self.description = text(value),
            _ => return Err(unknown::<Self>(name)),
        }
        Ok(())
    }

    fn from_record(vrf: &Vrf) -> Self {
        Self {
            name: vrf.name.clone(),
            rd: vrf.rd.clone(),
            rt_import: vrf.rt_import.join(", "),
            rt_export: vrf.rt_export.join(", "),
            description: vrf.description.clone(),
        }
    }

    /// New VRFs start inactive with no interfaces or routes.
    fn build(&self) -> Result<Vrf, CoreError> {
        let mut vrf = Vrf::default();
        self.merge_into(&mut vrf)?;
        Ok(vrf)
    }

    fn merge_into(&self, vrf: &mut Vrf) -> Result<(), CoreError> {
        vrf.name = self.name.clone();
        vrf.rd = self.rd.clone();
        vrf.rt_import = split_list(&self.rt_import);
        vrf.rt_export = split_list(&self.rt_export);
        vrf.description = self.description.clone();
        Ok(())
    }
}

// ── Firewall rules ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateFirewallRuleRequest {
    pub name: String,
    pub source: String,
    pub destination: String,
    pub port: String,
    pub protocol: String,
    pub action: String,
}

impl Default for CreateFirewallRuleRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            source: String::new(),
            destination: String::new(),
            port: String::new(),
            protocol: "TCP".into(),
            action: "ALLOW".into(),
        }
    }
}

impl Draft for CreateFirewallRuleRequest {
    type Record = FirewallRule;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name", "Rule name").required(),
        FieldSpec::text("source", "Source").required(),
        FieldSpec::text("destination", "Destination").required(),
        FieldSpec::text("port", "Port(s)"),
        FieldSpec::text("protocol", "Protocol").choices(PROTOCOLS),
        FieldSpec::text("action", "Action").choices(ACTIONS),
    ];

    fn field(&self, name: &str) -> Option<&str> {
        let value: &str = match name {
            "name" => &self.name,
            "source" => &self.source,
            "destination" => &self.destination,
            "port" => &self.port,
            "protocol" => &self.protocol,
            "action" => &self.action,
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        match name {
            "name" => self.name = text(value),
            "source" => self.source = text(value),
            "destination" => self.destination = text(value),
            "port" => self.port = text(value),
            "protocol" => {
                self.protocol = typed_choice::<FirewallProtocol>(name, value, "TCP, UDP, ICMP, Any")?;
            }
            "action" => {
                self.action = typed_choice::<FirewallAction>(name, value, "ALLOW, DENY, DROP")?;
            }
            _ => return Err(unknown::<Self>(name)),
        }
        Ok(())
    }

    fn from_record(rule: &FirewallRule) -> Self {
        Self {
            name: rule.name.clone(),
            source: rule.source.clone(),
            destination: rule.destination.clone(),
            port: rule.port.clone(),
            protocol: rule.protocol.to_string(),
            action: rule.action.to_string(),
        }
    }

    /// New rules are active immediately.
    fn build(&self) -> Result<FirewallRule, CoreError> {
        let mut rule = FirewallRule {
            status: crate::model::ActivityStatus::Active,
            ..FirewallRule::default()
        };
        self.merge_into(&mut rule)?;
        Ok(rule)
    }

    fn merge_into(&self, rule: &mut FirewallRule) -> Result<(), CoreError> {
        rule.name = self.name.clone();
        rule.source = self.source.clone();
        rule.destination = self.destination.clone();
        rule.port = self.port.clone();
        if !self.protocol.is_empty() {
            rule.protocol = choice("protocol", &self.protocol, "TCP, UDP, ICMP, Any")?;
        }
        if !self.action.is_empty() {
            rule.action = choice("action", &self.action, "ALLOW, DENY, DROP")?;
        }
        Ok(())
    }
}

// ── Device limits ──────────────────────────────────────────────────

/// Edit dialog for a per-device bandwidth limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceLimitForm {
    pub device: String,
    pub ip: String,
    pub upload_mbps: String,
    pub download_mbps: String,
    pub priority: String,
}

impl Draft for DeviceLimitForm {
    type Record = DeviceLimit;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("device", "Device").required(),
        FieldSpec::text("ip", "IP address"),
        FieldSpec::text("upload_mbps", "Upload (Mbps)"),
        FieldSpec::text("download_mbps", "Download (Mbps)"),
        FieldSpec::text("priority", "Priority").choices(PRIORITIES),
    ];

    const CREATABLE: bool = false;

    fn field(&self, name: &str) -> Option<&str> {
        let value: &str = match name {
            "device" => &self.device,
            "ip" => &self.ip,
            "upload_mbps" => &self.upload_mbps,
            "download_mbps" => &self.download_mbps,
            "priority" => &self.priority,
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        match name {
            "device" => self.device = text(value),
            "ip" => self.ip = text(value),
            "upload_mbps" => self.upload_mbps = typed::<u32>(name, value)?,
            "download_mbps" => self.download_mbps = typed::<u32>(name, value)?,
            "priority" => {
                self.priority = typed_choice::<Priority>(name, value, "high, medium, low")?;
            }
            _ => return Err(unknown::<Self>(name)),
        }
        Ok(())
    }

    fn from_record(d: &DeviceLimit) -> Self {
        Self {
            device: d.device.clone(),
            ip: d.ip.clone(),
            upload_mbps: d.upload_mbps.to_string(),
            download_mbps: d.download_mbps.to_string(),
            priority: d.priority.to_string(),
        }
    }

    fn build(&self) -> Result<DeviceLimit, CoreError> {
        let mut d = DeviceLimit::default();
        self.merge_into(&mut d)?;
        Ok(d)
    }

    fn merge_into(&self, d: &mut DeviceLimit) -> Result<(), CoreError> {
        d.device = self.device.clone();
        d.ip = self.ip.clone();
        if !self.upload_mbps.is_empty() {
            d.upload_mbps = number("upload_mbps", &self.upload_mbps)?;
        }
        if !self.download_mbps.is_empty() {
            d.download_mbps = number("download_mbps", &self.download_mbps)?;
        }
        if !self.priority.is_empty() {
            d.priority = choice("priority", &self.priority, "high, medium, low")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::form::FormController;
    use crate::model::{ActivityStatus, RecordId};
    use crate::store::RecordStore;

    #[test]
    fn vrf_draft_splits_and_trims_route_targets() {
        let mut form = FormController::<CreateVrfRequest>::create();
        form.set_field("name", "CUSTOMER_C").unwrap();
        form.set_field("rd", "65001:400").unwrap();
        form.set_field("rt_import", "65001:400,  65001:999").unwrap();

        let mut store = RecordStore::new();
        let vrf = form.commit(&mut store).unwrap();
        assert_eq!(vrf.rt_import, ["65001:400", "65001:999"]);
        assert!(vrf.rt_export.is_empty());
        assert_eq!(vrf.status, ActivityStatus::Inactive);
        assert!(vrf.interfaces.is_empty() && vrf.routes.is_empty());
    }

    #[test]
    fn missing_required_field_keeps_draft() {
        let mut form = FormController::<CreateVlanRequest>::create();
        form.set_field("vlan_id", "40").unwrap();
        form.set_field("name", "Lab").unwrap();

        let mut store = RecordStore::new();
        let err = form.commit(&mut store).unwrap_err();
        assert_eq!(err.field(), Some("subnet"));
        assert_eq!(form.value("name"), "Lab");
        assert!(store.is_empty());
    }

    #[test]
    fn unparseable_and_unknown_fields_are_rejected() {
        let mut form = FormController::<CreateVlanRequest>::create();
        assert!(matches!(
            form.set_field("vlan_id", "forty"),
            Err(CoreError::Validation { .. })
        ));
        assert!(matches!(
            form.set_field("colour", "red"),
            Err(CoreError::UnknownField { .. })
        ));
        assert_eq!(form.value("vlan_id"), "");
    }

    #[test]
    fn edit_then_commit_merges_and_resets() {
        let mut store = RecordStore::new();
        let id = store
            .add(FirewallRule {
                name: "Allow SSH".into(),
                source: "Any".into(),
                destination: "192.168.1.10".into(),
                port: "22".into(),
                status: ActivityStatus::Active,
                ..FirewallRule::default()
            })
            .unwrap()
            .id;

        let mut form = FormController::<CreateFirewallRuleRequest>::edit(&store, id).unwrap();
        assert_eq!(form.value("protocol"), "TCP");
        form.set_field("port", "2222").unwrap();
        let saved = form.commit(&mut store).unwrap();

        assert_eq!(saved.port, "2222");
        assert_eq!(saved.status, ActivityStatus::Active);
        assert_eq!(store.len(), 1);
        assert_eq!(form.value("name"), "");
    }

    #[test]
    fn edit_unknown_id_is_not_found() {
        let store: RecordStore<Vlan> = RecordStore::new();
        assert!(
            FormController::<CreateVlanRequest>::edit(&store, RecordId::new(5))
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn edit_only_forms_refuse_create() {
        let mut form = FormController::<InterfaceForm>::create();
        form.set_field("name", "Loopback9").unwrap();
        let mut store = RecordStore::new();
        assert!(form.commit(&mut store).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn static_route_distance_defaults_to_one() {
        let mut form = FormController::<CreateStaticRouteRequest>::create();
        assert_eq!(form.value("distance"), "1");
        form.set_field("network", "10.20.0.0").unwrap();
        form.set_field("mask", "255.255.0.0").unwrap();
        form.set_field("interface", "Serial0/1/0").unwrap();
        let mut store = RecordStore::new();
        assert_eq!(form.commit(&mut store).unwrap().distance, 1);
    }
}
