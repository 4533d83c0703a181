// ── Seed data ──
//
// The state a fresh console starts from. Ids are fixed here; each store's
// counter resumes after the highest seeded id.

use crate::model::{
    AccessControlEntry, AccessState, ActivityStatus, ApplicationRule, BgpNeighbor, Capacity,
    CommandHistoryEntry, CommandReference, CommandStatus, CpuUsage, DeviceLimit, DhcpLease,
    DhcpReservation, DhcpServerSettings, Duplex, FirewallAction, FirewallProtocol, FirewallRule,
    InterfaceKind, InterfaceStats, LeaseKind, LinkStatus, LogEntry, LogLevel, MemoryPool,
    MemoryUsage, NetworkInterface, OspfArea, OspfAreaKind, Permille, PortMode, Priority,
    ProcessUsage, QosSettings, QosUsage, RecordId, RouteSource, RoutingProtocols, StaticRoute,
    StorageUsage, SwitchPort, SystemResources, TrafficClass, Vlan, VpnSettings, Vrf, VrfRoute,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

// ── Interfaces ──────────────────────────────────────────────────────

pub fn interfaces() -> Vec<NetworkInterface> {
    let row = |id: u64,
               name: &str,
               kind: InterfaceKind,
               addr: (&str, &str),
               status: LinkStatus,
               description: &str,
               duplex: Duplex,
               speed: &str| NetworkInterface {
        id: RecordId::new(id),
        name: name.into(),
        kind,
        ip: addr.0.into(),
        mask: addr.1.into(),
        status,
        description: description.into(),
        duplex,
        speed: speed.into(),
    };
    vec![
        row(
            1,
            "GigabitEthernet0/0/1",
            InterfaceKind::Ethernet,
            ("192.168.1.1", "255.255.255.0"),
            LinkStatus::Up,
            "LAN Principal",
            Duplex::Full,
            "1000",
        ),
        row(
            2,
            "GigabitEthernet0/0/2",
            InterfaceKind::Ethernet,
            ("10.0.0.1", "255.255.255.0"),
            LinkStatus::Up,
            "Red Servidores",
            Duplex::Full,
            "1000",
        ),
        row(
            3,
            "Serial0/1/0",
            InterfaceKind::Serial,
            ("203.0.113.2", "255.255.255.252"),
            LinkStatus::Up,
            "WAN Principal",
            Duplex::Full,
            "1544",
        ),
        row(
            4,
            "GigabitEthernet0/0/3",
            InterfaceKind::Ethernet,
            ("", ""),
            LinkStatus::Down,
            "Sin configurar",
            Duplex::Auto,
            "auto",
        ),
        row(
            5,
            "Loopback0",
            InterfaceKind::Loopback,
            ("1.1.1.1", "255.255.255.255"),
            LinkStatus::Up,
            "Router ID",
            Duplex::NotApplicable,
            "N/A",
        ),
    ]
}

// ── DHCP ────────────────────────────────────────────────────────────

pub fn dhcp_settings() -> DhcpServerSettings {
    DhcpServerSettings {
        enabled: true,
        pool_start: "192.168.1.100".into(),
        pool_end: "192.168.1.200".into(),
        lease_hours: 24,
        gateway: "192.168.1.1".into(),
        dns_primary: "8.8.8.8".into(),
        dns_secondary: "8.8.4.4".into(),
    }
}

pub fn reservations() -> Vec<DhcpReservation> {
    [
        (1, "Servidor-Principal", "AA:BB:CC:DD:EE:FF", "192.168.1.10", "Servidor web"),
        (2, "Impresora-Oficina", "11:22:33:44:55:66", "192.168.1.20", "Impresora HP LaserJet"),
        (3, "NAS-Storage", "77:88:99:AA:BB:CC", "192.168.1.30", "Almacenamiento de red"),
    ]
    .into_iter()
    .map(|(id, hostname, mac, ip, description)| DhcpReservation {
        id: RecordId::new(id),
        hostname: hostname.into(),
        mac: mac.into(),
        ip: ip.into(),
        description: description.into(),
    })
    .collect()
}

pub fn leases() -> Vec<DhcpLease> {
    use LeaseKind::{Dynamic, Reserved};
    [
        (1, "MacBook-Pro", "AB:CD:EF:12:34:56", "192.168.1.101", "12h 30m", Dynamic),
        (2, "iPhone-12", "12:34:56:78:90:AB", "192.168.1.102", "18h 45m", Dynamic),
        (3, "Windows-PC", "56:78:90:AB:CD:EF", "192.168.1.103", "6h 15m", Dynamic),
        (4, "Servidor-Principal", "AA:BB:CC:DD:EE:FF", "192.168.1.10", "Permanente", Reserved),
        (5, "Smart-TV", "CD:EF:12:34:56:78", "192.168.1.104", "23h 10m", Dynamic),
    ]
    .into_iter()
    .map(|(id, hostname, mac, ip, lease, kind)| DhcpLease {
        id: RecordId::new(id),
        hostname: hostname.into(),
        mac: mac.into(),
        ip: ip.into(),
        lease: lease.into(),
        kind,
    })
    .collect()
}

// ── Routing ─────────────────────────────────────────────────────────

pub fn routing_protocols() -> RoutingProtocols {
    let mut protocols = RoutingProtocols::default();
    protocols.ospf.router_id = "1.1.1.1".into();
    protocols.bgp.router_id = "1.1.1.1".into();
    protocols
}

pub fn static_routes() -> Vec<StaticRoute> {
    [
        (1, "0.0.0.0", "0.0.0.0", "203.0.113.1", "Serial0/1/0", "Ruta por defecto"),
        (2, "172.16.0.0", "255.255.0.0", "192.168.1.254", "GigabitEthernet0/0/1", "Red remota"),
        (
            3,
            "10.10.0.0",
            "255.255.0.0",
            "10.0.0.254",
            "GigabitEthernet0/0/2",
            "Red servidores remotos",
        ),
    ]
    .into_iter()
    .map(
        |(id, network, mask, gateway, interface, description)| StaticRoute {
            id: RecordId::new(id),
            network: network.into(),
            mask: mask.into(),
            gateway: gateway.into(),
            interface: interface.into(),
            distance: 1,
            description: description.into(),
        },
    )
    .collect()
}

pub fn ospf_areas() -> Vec<OspfArea> {
    vec![
        OspfArea {
            id: RecordId::new(1),
            area_id: "0".into(),
            kind: OspfAreaKind::Standard,
            networks: strings(&["192.168.1.0 0.0.0.255", "10.0.0.0 0.0.0.255"]),
        },
        OspfArea {
            id: RecordId::new(2),
            area_id: "1".into(),
            kind: OspfAreaKind::Stub,
            networks: strings(&["172.16.0.0 0.0.255.255"]),
        },
    ]
}

pub fn bgp_neighbors() -> Vec<BgpNeighbor> {
    [
        (1, "203.0.113.10", 65002, "ISP Principal"),
        (2, "203.0.113.20", 65003, "ISP Backup"),
    ]
    .into_iter()
    .map(|(id, ip, remote_as, description)| BgpNeighbor {
        id: RecordId::new(id),
        ip: ip.into(),
        remote_as,
        description: description.into(),
    })
    .collect()
}

// ── VLANs ───────────────────────────────────────────────────────────

pub fn vlans() -> Vec<Vlan> {
    [
        (1, 10, "Administración", "Red administrativa", "192.168.10.0/24", &["1", "2"][..]),
        (2, 20, "Invitados", "Red para invitados", "192.168.20.0/24", &["3", "4"][..]),
        (3, 30, "Servidores", "Red de servidores", "192.168.30.0/24", &["5"][..]),
        (4, 100, "IoT", "Dispositivos IoT", "192.168.100.0/24", &["WiFi"][..]),
    ]
    .into_iter()
    .map(|(id, vlan_id, name, description, subnet, ports)| Vlan {
        id: RecordId::new(id),
        vlan_id,
        name: name.into(),
        description: description.into(),
        subnet: subnet.into(),
        ports: strings(ports),
    })
    .collect()
}

pub fn switch_ports() -> Vec<SwitchPort> {
    use PortMode::{Access, Trunk};
    [
        (1, "1", Access, "10", "Puerto administrativo"),
        (2, "2", Access, "10", "Puerto administrativo"),
        (3, "3", Access, "20", "Puerto invitados"),
        (4, "4", Trunk, "1,10,20", "Trunk principal"),
        (5, "5", Access, "30", "Puerto servidores"),
    ]
    .into_iter()
    .map(|(id, port, mode, vlans, description)| SwitchPort {
        id: RecordId::new(id),
        port: port.into(),
        mode,
        vlans: vlans.into(),
        description: description.into(),
    })
    .collect()
}

// ── VRFs ────────────────────────────────────────────────────────────

fn route(network: &str, next_hop: &str, source: RouteSource) -> VrfRoute {
    VrfRoute {
        network: network.into(),
        next_hop: next_hop.into(),
        source,
    }
}

pub fn vrfs() -> Vec<Vrf> {
    vec![
        Vrf {
            id: RecordId::new(1),
            name: "CUSTOMER_A".into(),
            rd: "65001:100".into(),
            rt_import: strings(&["65001:100", "65001:999"]),
            rt_export: strings(&["65001:100"]),
            description: "Cliente A - Red Corporativa".into(),
            interfaces: strings(&["GigabitEthernet0/0/1.100", "Serial0/1/0"]),
            status: ActivityStatus::Active,
            routes: vec![
                route("10.100.0.0/24", "10.100.0.1", RouteSource::Connected),
                route("172.16.100.0/24", "10.100.0.254", RouteSource::Static),
            ],
        },
        Vrf {
            id: RecordId::new(2),
            name: "CUSTOMER_B".into(),
            rd: "65001:200".into(),
            rt_import: strings(&["65001:200", "65001:999"]),
            rt_export: strings(&["65001:200"]),
            description: "Cliente B - Red Privada".into(),
            interfaces: strings(&["GigabitEthernet0/0/2.200"]),
            status: ActivityStatus::Active,
            routes: vec![
                route("10.200.0.0/24", "10.200.0.1", RouteSource::Connected),
                route("192.168.200.0/24", "10.200.0.254", RouteSource::Ospf),
            ],
        },
        Vrf {
            id: RecordId::new(3),
            name: "MGMT".into(),
            rd: "65001:999".into(),
            rt_import: strings(&["65001:999"]),
            rt_export: strings(&["65001:999"]),
            description: "Red de Administración".into(),
            interfaces: strings(&["Loopback1"]),
            status: ActivityStatus::Active,
            routes: vec![route(
                "192.168.255.0/24",
                "192.168.255.1",
                RouteSource::Connected,
            )],
        },
        Vrf {
            id: RecordId::new(4),
            name: "INTERNET".into(),
            rd: "65001:300".into(),
            rt_import: strings(&["65001:300"]),
            rt_export: strings(&["65001:300"]),
            description: "Acceso a Internet compartido".into(),
            interfaces: strings(&["Serial0/1/1"]),
            status: ActivityStatus::Inactive,
            routes: Vec::new(),
        },
    ]
}

// ── Security ────────────────────────────────────────────────────────

pub fn firewall_rules() -> Vec<FirewallRule> {
    use FirewallAction::{Allow, Deny};
    use FirewallProtocol::{Any, Tcp};
    [
        (1, "Bloquear Torrent", "Any", "Any", "6881-6889", Tcp, Deny),
        (2, "Permitir SSH", "192.168.1.0/24", "192.168.1.10", "22", Tcp, Allow),
        (3, "Bloquear Malware", "Any", "blacklist.db", "Any", Any, Deny),
        (4, "Permitir HTTP/HTTPS", "Any", "Any", "80,443", Tcp, Allow),
    ]
    .into_iter()
    .map(
        |(id, name, source, destination, port, protocol, action)| FirewallRule {
            id: RecordId::new(id),
            name: name.into(),
            source: source.into(),
            destination: destination.into(),
            port: port.into(),
            protocol,
            action,
            status: ActivityStatus::Active,
        },
    )
    .collect()
}

pub fn access_control() -> Vec<AccessControlEntry> {
    use AccessState::{Allowed, Restricted};
    [
        (1, "MacBook Pro", "AA:BB:CC:DD:EE:FF", "Siempre", Allowed, false),
        (2, "iPhone Kids", "11:22:33:44:55:66", "08:00-20:00", Restricted, true),
        (3, "Smart TV", "77:88:99:AA:BB:CC", "Siempre", Allowed, false),
        (4, "Gaming Console", "DD:EE:FF:11:22:33", "16:00-22:00", Restricted, true),
    ]
    .into_iter()
    .map(
        |(id, device, mac, time_restriction, access, parental_control)| AccessControlEntry {
            id: RecordId::new(id),
            device: device.into(),
            mac: mac.into(),
            time_restriction: time_restriction.into(),
            access,
            parental_control,
        },
    )
    .collect()
}

/// The remote-access server ships configured but switched off.
pub fn vpn_settings() -> VpnSettings {
    VpnSettings::default()
}

// ── QoS ─────────────────────────────────────────────────────────────

pub fn qos_settings() -> QosSettings {
    QosSettings {
        enabled: true,
        total_bandwidth_mbps: 1000,
        usage: QosUsage {
            high: 25,
            medium: 45,
            low: 15,
        },
    }
}

pub fn traffic_classes() -> Vec<TrafficClass> {
    [
        (1, "Alta Prioridad", Priority::High, 40, "VoIP/Gaming"),
        (2, "Media Prioridad", Priority::Medium, 35, "Video Streaming"),
        (3, "Baja Prioridad", Priority::Low, 25, "Navegación Web"),
    ]
    .into_iter()
    .map(
        |(id, name, priority, bandwidth_percent, protocol)| TrafficClass {
            id: RecordId::new(id),
            name: name.into(),
            priority,
            bandwidth_percent,
            protocol: protocol.into(),
        },
    )
    .collect()
}

pub fn application_rules() -> Vec<ApplicationRule> {
    [
        (1, "Netflix", "Video Streaming", Priority::Medium, "50 Mbps"),
        (2, "Zoom", "Videoconferencia", Priority::High, "20 Mbps"),
        (3, "Steam", "Gaming", Priority::High, "100 Mbps"),
        (4, "YouTube", "Video Streaming", Priority::Medium, "30 Mbps"),
        (5, "Torrent", "P2P", Priority::Low, "10 Mbps"),
    ]
    .into_iter()
    .map(|(id, name, kind, priority, bandwidth)| ApplicationRule {
        id: RecordId::new(id),
        name: name.into(),
        kind: kind.into(),
        priority,
        bandwidth: bandwidth.into(),
        status: ActivityStatus::Active,
    })
    .collect()
}

pub fn device_limits() -> Vec<DeviceLimit> {
    [
        (1, "MacBook Pro", "192.168.1.101", 50, 200, Priority::High),
        (2, "Smart TV", "192.168.1.102", 10, 100, Priority::Medium),
        (3, "Tablet iPad", "192.168.1.103", 20, 80, Priority::Medium),
        (4, "Servidor NAS", "192.168.1.30", 100, 300, Priority::High),
    ]
    .into_iter()
    .map(
        |(id, device, ip, upload_mbps, download_mbps, priority)| DeviceLimit {
            id: RecordId::new(id),
            device: device.into(),
            ip: ip.into(),
            upload_mbps,
            download_mbps,
            priority,
        },
    )
    .collect()
}

// ── Logs ────────────────────────────────────────────────────────────

/// Oldest first; listings reverse the store.
pub fn logs() -> Vec<LogEntry> {
    use LogLevel::{Debug, Error, Info, Warning};
    [
        (
            "14:12:30",
            Error,
            "network",
            "wan",
            "Pérdida de conectividad WAN",
            "Timeout en gateway 203.0.113.1, intentando reconexión",
        ),
        (
            "14:15:55",
            Info,
            "vlan",
            "bridge",
            "VLAN 100 configurada",
            "Puerto 3 asignado a VLAN 100 (IoT)",
        ),
        (
            "14:18:07",
            Warning,
            "system",
            "temperature",
            "Temperatura elevada detectada",
            "CPU a 78°C, ventiladores a máxima velocidad",
        ),
        (
            "14:20:33",
            Debug,
            "qos",
            "tc",
            "Regla QoS aplicada",
            "Límite de ancho de banda aplicado a 192.168.1.101",
        ),
        (
            "14:22:18",
            Info,
            "wifi",
            "hostapd",
            "Cliente conectado a WiFi",
            "MAC: AA:BB:CC:DD:EE:FF conectado a SSID: RouterWiFi",
        ),
        (
            "14:25:42",
            Error,
            "security",
            "firewall",
            "Intento de acceso bloqueado",
            "IP: 203.0.113.45 intentó acceder al puerto 22",
        ),
        (
            "14:28:15",
            Warning,
            "network",
            "dhcp",
            "Pool de IPs DHCP al 85%",
            "Quedan 15 direcciones IP disponibles de 100",
        ),
        (
            "14:30:25",
            Info,
            "system",
            "kernel",
            "Sistema iniciado correctamente",
            "Bootloader cargado, drivers inicializados",
        ),
    ]
    .into_iter()
    .zip(1..)
    .map(
        |((time, level, category, source, message, details), id)| LogEntry {
            id: RecordId::new(id),
            timestamp: format!("2024-01-15 {time}"),
            level,
            category: category.into(),
            source: source.into(),
            message: message.into(),
            details: details.into(),
        },
    )
    .collect()
}

// ── Terminal ────────────────────────────────────────────────────────

pub fn command_reference() -> Vec<CommandReference> {
    const SYSTEM: &str = "Información del Sistema";
    const INTERFACES: &str = "Interfaces";
    const ROUTING: &str = "Enrutamiento";
    const CONFIG: &str = "Configuración";
    const DIAGNOSTICS: &str = "Diagnóstico";
    [
        (
            SYSTEM,
            "show version",
            "Muestra información del hardware y software del router",
            "show version",
            "Router#show version",
        ),
        (
            SYSTEM,
            "show running-config",
            "Muestra la configuración actual en memoria",
            "show running-config",
            "Router#show running-config",
        ),
        (
            SYSTEM,
            "show startup-config",
            "Muestra la configuración guardada en NVRAM",
            "show startup-config",
            "Router#show startup-config",
        ),
        (
            INTERFACES,
            "show interfaces",
            "Muestra estadísticas detalladas de todas las interfaces",
            "show interfaces [interface-name]",
            "Router#show interfaces GigabitEthernet0/0/1",
        ),
        (
            INTERFACES,
            "show interfaces brief",
            "Muestra un resumen de todas las interfaces",
            "show interfaces brief",
            "Router#show interfaces brief",
        ),
        (
            INTERFACES,
            "show ip interface brief",
            "Muestra el estado IP de las interfaces",
            "show ip interface brief",
            "Router#show ip interface brief",
        ),
        (
            ROUTING,
            "show ip route",
            "Muestra la tabla de enrutamiento IP",
            "show ip route [network]",
            "Router#show ip route 192.168.1.0",
        ),
        (
            ROUTING,
            "show ip protocols",
            "Muestra información de los protocolos de enrutamiento",
            "show ip protocols",
            "Router#show ip protocols",
        ),
        (
            ROUTING,
            "show ip ospf database",
            "Muestra la base de datos OSPF",
            "show ip ospf database",
            "Router#show ip ospf database",
        ),
        (
            ROUTING,
            "show ip bgp summary",
            "Muestra un resumen de las sesiones BGP",
            "show ip bgp summary",
            "Router#show ip bgp summary",
        ),
        (
            CONFIG,
            "configure terminal",
            "Entra al modo de configuración global",
            "configure terminal",
            "Router#configure terminal\nRouter(config)#",
        ),
        (
            CONFIG,
            "interface [interface-name]",
            "Entra al modo de configuración de interfaz",
            "interface interface-name",
            "Router(config)#interface GigabitEthernet0/0/1\nRouter(config-if)#",
        ),
        (
            CONFIG,
            "copy running-config startup-config",
            "Guarda la configuración actual en NVRAM",
            "copy running-config startup-config",
            "Router#copy running-config startup-config",
        ),
        (
            CONFIG,
            "write memory",
            "Comando alternativo para guardar configuración",
            "write memory",
            "Router#write memory",
        ),
        (
            DIAGNOSTICS,
            "ping",
            "Prueba de conectividad ICMP",
            "ping ip-address",
            "Router#ping 8.8.8.8",
        ),
        (
            DIAGNOSTICS,
            "traceroute",
            "Muestra la ruta hacia un destino",
            "traceroute ip-address",
            "Router#traceroute 8.8.8.8",
        ),
        (
            DIAGNOSTICS,
            "show processes cpu",
            "Muestra el uso de CPU por procesos",
            "show processes cpu",
            "Router#show processes cpu",
        ),
        (
            DIAGNOSTICS,
            "show memory",
            "Muestra información de memoria del sistema",
            "show memory",
            "Router#show memory",
        ),
    ]
    .into_iter()
    .zip(1..)
    .map(
        |((category, command, description, usage, example), id)| CommandReference {
            id: RecordId::new(id),
            category: category.into(),
            command: command.into(),
            description: description.into(),
            usage: usage.into(),
            example: example.into(),
        },
    )
    .collect()
}

/// Oldest first, like the log store.
pub fn command_history() -> Vec<CommandHistoryEntry> {
    [
        "14:28:30 show running-config",
        "14:30:45 configure terminal",
        "14:32:10 show interfaces brief",
        "14:35:25 show ip route",
    ]
    .into_iter()
    .zip(1..)
    .filter_map(|(line, id)| {
        let (timestamp, command) = line.split_once(' ')?;
        Some(CommandHistoryEntry {
            id: RecordId::new(id),
            command: command.into(),
            timestamp: timestamp.into(),
            status: CommandStatus::Success,
        })
    })
    .collect()
}

// ── Monitoring ──────────────────────────────────────────────────────

pub fn interface_stats() -> Vec<InterfaceStats> {
    [
        (
            1,
            "GigabitEthernet0/0/1",
            LinkStatus::Up,
            [2_453_892_114, 1_892_337_445, 3_445_221, 2_887_334],
            [0, 0, 0, 0],
            35,
            "1000 Mbps",
        ),
        (
            2,
            "GigabitEthernet0/0/2",
            LinkStatus::Up,
            [1_234_567_890, 987_654_321, 1_876_543, 1_543_210],
            [2, 0, 1, 0],
            22,
            "1000 Mbps",
        ),
        (
            3,
            "Serial0/1/0",
            LinkStatus::Up,
            [445_782_361, 523_891_247, 892_445, 934_567],
            [0, 0, 0, 0],
            78,
            "1544 Kbps",
        ),
        (
            4,
            "GigabitEthernet0/0/3",
            LinkStatus::Down,
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            0,
            "1000 Mbps",
        ),
    ]
    .into_iter()
    .map(
        |(id, interface, status, traffic, errors, utilization, bandwidth)| {
            let [in_octets, out_octets, in_packets, out_packets] = traffic;
            let [in_errors, out_errors, crc_errors, collisions] = errors;
            InterfaceStats {
                id: RecordId::new(id),
                interface: interface.into(),
                status,
                in_octets,
                out_octets,
                in_packets,
                out_packets,
                in_errors,
                out_errors,
                crc_errors,
                collisions,
                utilization,
                bandwidth: bandwidth.into(),
            }
        },
    )
    .collect()
}

pub fn system_resources() -> SystemResources {
    let process = |name: &str, cpu: u16| ProcessUsage {
        name: name.into(),
        cpu: Permille(cpu),
    };
    let pool = |name: &str, used_mb: u64, total_mb: u64| MemoryPool {
        name: name.into(),
        capacity: Capacity::mb(used_mb, total_mb),
    };
    SystemResources {
        cpu: CpuUsage {
            usage: Permille(450),
            processes: vec![
                process("OSPF Hello", 123),
                process("BGP Scanner", 87),
                process("IP Input", 62),
                process("DHCP Server", 41),
            ],
        },
        memory: MemoryUsage {
            total: Capacity::mb(387, 512),
            pools: vec![
                pool("Processor", 145, 256),
                pool("I/O", 89, 128),
                pool("Driver", 153, 128),
            ],
        },
        storage: StorageUsage {
            flash: Capacity::mb(89, 256),
            nvram: Capacity::kb(142, 512),
        },
        sampled_at: "2024-01-15 14:35:12".into(),
    }
}

/// What the terminal shows before the first command runs.
pub fn terminal_banner() -> Vec<String> {
    strings(&[
        "Router#show ip route",
        "Codes: L - local, C - connected, S - static, R - RIP, M - mobile, B - BGP",
        "       D - EIGRP, EX - EIGRP external, O - OSPF, IA - OSPF inter area",
        "       N1 - OSPF NSSA external type 1, N2 - OSPF NSSA external type 2",
        "       E1 - OSPF external type 1, E2 - OSPF external type 2",
        "",
        "Gateway of last resort is 203.0.113.1 to network 0.0.0.0",
        "",
        "S*    0.0.0.0/0 [1/0] via 203.0.113.1",
        "C     192.168.1.0/24 is directly connected, GigabitEthernet0/0/1",
        "L     192.168.1.1/32 is directly connected, GigabitEthernet0/0/1",
        "C     10.0.0.0/24 is directly connected, GigabitEthernet0/0/2",
        "L     10.0.0.1/32 is directly connected, GigabitEthernet0/0/2",
        "Router#",
    ])
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_are_unique_per_collection() {
        fn unique(ids: impl IntoIterator<Item = RecordId>) -> bool {
            let ids: Vec<_> = ids.into_iter().collect();
            ids.iter().collect::<HashSet<_>>().len() == ids.len()
        }
        assert!(unique(interfaces().iter().map(|r| r.id)));
        assert!(unique(logs().iter().map(|r| r.id)));
        assert!(unique(command_reference().iter().map(|r| r.id)));
        assert!(unique(vrfs().iter().map(|r| r.id)));
        assert!(unique(interface_stats().iter().map(|r| r.id)));
    }

    #[test]
    fn every_monitored_interface_exists() {
        let names: HashSet<_> = interfaces().into_iter().map(|i| i.name).collect();
        assert!(
            interface_stats()
                .iter()
                .all(|s| names.contains(&s.interface))
        );
    }

    #[test]
    fn catalog_covers_five_categories() {
        let categories: HashSet<_> = command_reference()
            .into_iter()
            .map(|c| c.category)
            .collect();
        assert_eq!(categories.len(), 5);
    }

    #[test]
    fn history_is_oldest_first() {
        let history = command_history();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].command, "show running-config");
        assert_eq!(history[3].timestamp, "14:35:25");
    }
}
