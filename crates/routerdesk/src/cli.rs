//! Clap derive structures for the `routerdesk` CLI.
//!
//! Defines the complete command tree, global flags, and shared value enums.
//! Only depends on clap so `build.rs` can compile it on its own.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// routerdesk -- a simulated router console for the terminal
#[derive(Debug, Parser)]
#[command(
    name = "routerdesk",
    version,
    about = "Configure a simulated router from the command line",
    long_about = "Browse and edit a simulated router: interfaces, DHCP, routing, VLANs,\n\
        VRFs, firewall, QoS and logs, with IOS-style command previews.\n\n\
        Every invocation starts from the seeded lab state. Use `routerdesk shell`\n\
        to keep one console alive across several commands.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Clone, Args)]
pub struct GlobalOpts {
    /// Output format [default: table, or defaults.output from config]
    #[arg(long, short = 'o', env = "ROUTERDESK_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Check address, MAC, VLAN range and RD/RT formats
    #[arg(long, global = true)]
    pub strict: bool,

    /// What to do when a unique key (VLAN id, MAC, VRF name...) is taken
    #[arg(long, global = true)]
    pub duplicates: Option<DuplicateMode>,

    /// Config file to load instead of the platform default
    #[arg(long, env = "ROUTERDESK_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GlobalOpts {
    pub fn output_format(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.clone().unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicateMode {
    /// Accept records whose unique key is already taken
    Allow,
    /// Fail with a conflict error
    Reject,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect and edit network interfaces
    #[command(alias = "if", alias = "int")]
    Interfaces(InterfacesArgs),

    /// DHCP server settings, reservations and leases
    Dhcp(DhcpArgs),

    /// Routing protocols, static routes, OSPF areas and BGP neighbors
    #[command(alias = "route")]
    Routing(RoutingArgs),

    /// VLANs and switch port membership
    #[command(alias = "vlan")]
    Vlans(VlansArgs),

    /// VRF instances
    #[command(alias = "vrf")]
    Vrfs(VrfsArgs),

    /// Firewall rules, device access control and the VPN server
    #[command(alias = "fw")]
    Firewall(FirewallArgs),

    /// QoS switch, traffic classes, application rules and device limits
    Qos(QosArgs),

    /// System log viewer and export
    #[command(alias = "log")]
    Logs(LogsArgs),

    /// Interface counters and CPU, memory and storage usage
    #[command(alias = "mon")]
    Monitoring(MonitoringArgs),

    /// Command reference, simulated terminal and history
    #[command(alias = "cmd", alias = "term")]
    Commands(CommandsArgs),

    /// Print the generated IOS-style configuration
    Preview(PreviewArgs),

    /// Headline counts across every panel
    #[command(alias = "dash")]
    Dashboard,

    /// Interactive session that keeps one console across commands
    Shell,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Shared filtering arguments for list commands.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive text search
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only show this category (interface kind, lease kind, rule action...)
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INTERFACES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct InterfacesArgs {
    #[command(subcommand)]
    pub command: InterfacesCommand,
}

#[derive(Debug, Subcommand)]
pub enum InterfacesCommand {
    /// List interfaces
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one interface
    Get {
        /// Interface ID
        id: u64,
    },

    /// Change interface settings
    Update {
        /// Interface ID
        id: u64,

        /// IPv4 address (empty string clears it)
        #[arg(long)]
        ip: Option<String>,

        /// Subnet mask
        #[arg(long)]
        mask: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Administrative status
        #[arg(long, value_enum)]
        status: Option<LinkState>,

        #[arg(long, value_enum)]
        duplex: Option<DuplexArg>,

        /// Speed label, e.g. "1000 Mbps"
        #[arg(long)]
        speed: Option<String>,
    },

    /// Bring an interface up or down
    Toggle {
        /// Interface ID
        id: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LinkState {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DuplexArg {
    Auto,
    Full,
    Half,
    /// Not applicable (serial, loopback)
    Na,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DHCP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DhcpArgs {
    #[command(subcommand)]
    pub command: DhcpCommand,
}

#[derive(Debug, Subcommand)]
pub enum DhcpCommand {
    /// Show DHCP server settings
    Settings,

    /// Change DHCP server settings
    Configure {
        /// Enable or disable the server
        #[arg(long, action = clap::ArgAction::Set)]
        enabled: Option<bool>,

        #[arg(long)]
        pool_start: Option<String>,

        #[arg(long)]
        pool_end: Option<String>,

        /// Lease time in hours
        #[arg(long)]
        lease_hours: Option<u32>,

        #[arg(long)]
        gateway: Option<String>,

        #[arg(long)]
        dns_primary: Option<String>,

        #[arg(long)]
        dns_secondary: Option<String>,
    },

    /// Manage static reservations
    #[command(alias = "res")]
    Reservations(ReservationsArgs),

    /// View and release active leases
    Leases(LeasesArgs),
}

#[derive(Debug, Args)]
pub struct ReservationsArgs {
    #[command(subcommand)]
    pub command: ReservationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReservationsCommand {
    /// List reservations
    #[command(alias = "ls")]
    List(ListArgs),

    /// Reserve an address for a MAC
    Create {
        #[arg(long)]
        hostname: Option<String>,

        /// MAC address (AA:BB:CC:DD:EE:FF)
        #[arg(long)]
        mac: Option<String>,

        #[arg(long)]
        ip: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Change a reservation
    Update {
        /// Reservation ID
        id: u64,

        #[arg(long)]
        hostname: Option<String>,

        #[arg(long)]
        mac: Option<String>,

        #[arg(long)]
        ip: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a reservation
    #[command(alias = "rm")]
    Delete {
        /// Reservation ID
        id: u64,
    },
}

#[derive(Debug, Args)]
pub struct LeasesArgs {
    #[command(subcommand)]
    pub command: LeasesCommand,
}

#[derive(Debug, Subcommand)]
pub enum LeasesCommand {
    /// List active leases
    #[command(alias = "ls")]
    List(ListArgs),

    /// Release every lease held by an address
    Release {
        /// Leased IPv4 address
        ip: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ROUTING
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RoutingArgs {
    #[command(subcommand)]
    pub command: RoutingCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoutingCommand {
    /// Show routing protocol settings
    Protocols,

    /// Change one routing protocol
    #[command(disable_version_flag = true)]
    Protocol {
        #[arg(value_enum)]
        protocol: RoutingProtocolArg,

        /// Enable or disable the protocol
        #[arg(long, action = clap::ArgAction::Set)]
        enabled: Option<bool>,

        /// OSPF process ID
        #[arg(long)]
        process_id: Option<u16>,

        /// Router ID (OSPF, BGP)
        #[arg(long)]
        router_id: Option<String>,

        /// Autonomous system number (EIGRP, BGP)
        #[arg(long)]
        asn: Option<u32>,

        /// RIP version (1 or 2)
        #[arg(long)]
        version: Option<u8>,
    },

    /// Manage static routes
    Routes(RoutesArgs),

    /// Manage OSPF areas
    #[command(name = "ospf-areas", alias = "areas")]
    OspfAreas(OspfAreasArgs),

    /// Manage BGP neighbors
    #[command(name = "bgp-neighbors", alias = "neighbors")]
    BgpNeighbors(BgpNeighborsArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoutingProtocolArg {
    Ospf,
    Eigrp,
    Bgp,
    Rip,
}

#[derive(Debug, Args)]
pub struct RoutesArgs {
    #[command(subcommand)]
    pub command: RoutesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoutesCommand {
    /// List static routes
    #[command(alias = "ls")]
    List(ListArgs),

    /// Add a static route
    Create {
        /// Destination network
        #[arg(long)]
        network: Option<String>,

        #[arg(long)]
        mask: Option<String>,

        /// Next-hop address (or use --interface)
        #[arg(long)]
        gateway: Option<String>,

        /// Exit interface (or use --gateway)
        #[arg(long)]
        interface: Option<String>,

        /// Administrative distance [default: 1]
        #[arg(long)]
        distance: Option<u8>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Change a static route
    Update {
        /// Route ID
        id: u64,

        #[arg(long)]
        network: Option<String>,

        #[arg(long)]
        mask: Option<String>,

        #[arg(long)]
        gateway: Option<String>,

        #[arg(long)]
        interface: Option<String>,

        #[arg(long)]
        distance: Option<u8>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a static route
    #[command(alias = "rm")]
    Delete {
        /// Route ID
        id: u64,
    },
}

#[derive(Debug, Args)]
pub struct OspfAreasArgs {
    #[command(subcommand)]
    pub command: OspfAreasCommand,
}

#[derive(Debug, Subcommand)]
pub enum OspfAreasCommand {
    /// List OSPF areas
    #[command(alias = "ls")]
    List(ListArgs),

    /// Add an OSPF area
    Create {
        /// Area ID, e.g. 0 or 0.0.0.1
        #[arg(long)]
        area_id: Option<String>,

        #[arg(long, value_enum, default_value = "standard")]
        kind: OspfAreaKindArg,

        /// Comma-separated "network wildcard" entries
        #[arg(long)]
        networks: Option<String>,
    },

    /// Delete an OSPF area
    #[command(alias = "rm")]
    Delete {
        /// Area record ID
        id: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OspfAreaKindArg {
    Standard,
    Stub,
    Nssa,
}

#[derive(Debug, Args)]
pub struct BgpNeighborsArgs {
    #[command(subcommand)]
    pub command: BgpNeighborsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BgpNeighborsCommand {
    /// List BGP neighbors
    #[command(alias = "ls")]
    List(ListArgs),

    /// Add a BGP neighbor
    Create {
        /// Neighbor address
        #[arg(long)]
        ip: Option<String>,

        /// Neighbor AS number
        #[arg(long)]
        remote_as: Option<u32>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a BGP neighbor
    #[command(alias = "rm")]
    Delete {
        /// Neighbor ID
        id: u64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VLANS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VlansArgs {
    #[command(subcommand)]
    pub command: VlansCommand,
}

#[derive(Debug, Subcommand)]
pub enum VlansCommand {
    /// List VLANs
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one VLAN
    Get {
        /// VLAN record ID
        id: u64,
    },

    /// Create a VLAN
    Create {
        /// VLAN number (1-4094)
        #[arg(long)]
        vlan_id: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Subnet in CIDR notation
        #[arg(long)]
        subnet: Option<String>,

        /// Comma-separated member ports
        #[arg(long)]
        ports: Option<String>,
    },

    /// Change a VLAN
    Update {
        /// VLAN record ID
        id: u64,

        #[arg(long)]
        vlan_id: Option<u16>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        subnet: Option<String>,

        /// Comma-separated member ports (replaces the list)
        #[arg(long)]
        ports: Option<String>,
    },

    /// Delete a VLAN
    #[command(alias = "rm")]
    Delete {
        /// VLAN record ID
        id: u64,
    },

    /// List switch ports
    Ports(ListArgs),

    /// Change a switch port's mode or VLANs
    Port {
        /// Switch port ID
        id: u64,

        #[arg(long, value_enum)]
        mode: Option<PortModeArg>,

        /// Access VLAN or trunk allowed list
        #[arg(long)]
        vlans: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PortModeArg {
    Access,
    Trunk,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VRFS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VrfsArgs {
    #[command(subcommand)]
    pub command: VrfsCommand,
}

#[derive(Debug, Subcommand)]
pub enum VrfsCommand {
    /// List VRFs
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one VRF with its interfaces and routes
    Get {
        /// VRF ID
        id: u64,
    },

    /// Create a VRF (starts inactive)
    Create {
        #[arg(long)]
        name: Option<String>,

        /// Route distinguisher, ASN:index
        #[arg(long)]
        rd: Option<String>,

        /// Comma-separated import route targets
        #[arg(long)]
        rt_import: Option<String>,

        /// Comma-separated export route targets
        #[arg(long)]
        rt_export: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Change a VRF
    Update {
        /// VRF ID
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        rd: Option<String>,

        #[arg(long)]
        rt_import: Option<String>,

        #[arg(long)]
        rt_export: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a VRF
    #[command(alias = "rm")]
    Delete {
        /// VRF ID
        id: u64,
    },

    /// Activate or deactivate a VRF
    Toggle {
        /// VRF ID
        id: u64,
    },

    /// Assign an interface to a VRF
    Assign {
        /// VRF ID
        id: u64,

        /// Interface name, e.g. GigabitEthernet0/1/0
        interface: String,
    },

    /// Remove an interface from a VRF
    Unassign {
        /// VRF ID
        id: u64,

        interface: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FIREWALL
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FirewallArgs {
    #[command(subcommand)]
    pub command: FirewallCommand,
}

#[derive(Debug, Subcommand)]
pub enum FirewallCommand {
    /// List firewall rules
    #[command(alias = "ls")]
    List(ListArgs),

    /// Create a firewall rule (starts active)
    Create {
        #[arg(long)]
        name: Option<String>,

        /// Source address, CIDR or "Any"
        #[arg(long)]
        source: Option<String>,

        /// Destination address, CIDR or "Any"
        #[arg(long)]
        destination: Option<String>,

        /// Port, comma list or range ("22", "80,443", "1000-2000")
        #[arg(long)]
        port: Option<String>,

        #[arg(long, value_enum, default_value = "tcp")]
        protocol: FirewallProtocolArg,

        #[arg(long, value_enum, default_value = "allow")]
        action: FirewallActionArg,
    },

    /// Change a firewall rule
    Update {
        /// Rule ID
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        source: Option<String>,

        #[arg(long)]
        destination: Option<String>,

        #[arg(long)]
        port: Option<String>,

        #[arg(long, value_enum)]
        protocol: Option<FirewallProtocolArg>,

        #[arg(long, value_enum)]
        action: Option<FirewallActionArg>,
    },

    /// Delete a firewall rule
    #[command(alias = "rm")]
    Delete {
        /// Rule ID
        id: u64,
    },

    /// Activate or deactivate a rule
    Toggle {
        /// Rule ID
        id: u64,
    },

    /// List device access control entries
    Access(ListArgs),

    /// Block or allow a device
    Block {
        /// Access entry ID
        id: u64,
    },

    /// Switch parental control on or off for a device
    Parental {
        /// Access entry ID
        id: u64,
    },

    /// Remote-access VPN server settings
    Vpn(VpnArgs),
}

#[derive(Debug, Args)]
pub struct VpnArgs {
    #[command(subcommand)]
    pub command: VpnCommand,
}

#[derive(Debug, Subcommand)]
pub enum VpnCommand {
    /// Show VPN server settings
    Show,

    /// Change VPN server settings
    Configure {
        /// Enable or disable the server
        #[arg(long, action = clap::ArgAction::Set)]
        enabled: Option<bool>,

        #[arg(long, value_enum)]
        protocol: Option<VpnProtocolArg>,

        /// Listening port (1-65535)
        #[arg(long)]
        port: Option<u16>,

        #[arg(long, value_enum)]
        encryption: Option<VpnEncryptionArg>,

        #[arg(long, value_enum)]
        authentication: Option<VpnAuthArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VpnProtocolArg {
    #[value(name = "openvpn")]
    OpenVpn,
    #[value(name = "wireguard")]
    WireGuard,
    #[value(name = "l2tp")]
    L2tp,
    #[value(name = "pptp")]
    Pptp,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VpnEncryptionArg {
    #[value(name = "aes256")]
    Aes256,
    #[value(name = "aes128")]
    Aes128,
    #[value(name = "chacha20")]
    ChaCha20,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VpnAuthArg {
    #[value(name = "sha256")]
    Sha256,
    #[value(name = "sha1")]
    Sha1,
    #[value(name = "md5")]
    Md5,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FirewallProtocolArg {
    Tcp,
    Udp,
    Icmp,
    Any,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FirewallActionArg {
    Allow,
    Deny,
    Drop,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  QOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct QosArgs {
    #[command(subcommand)]
    pub command: QosCommand,
}

#[derive(Debug, Subcommand)]
pub enum QosCommand {
    /// Show the QoS switch, total bandwidth and current usage
    Settings,

    /// Turn QoS on or off, or change the total bandwidth
    Configure {
        #[arg(long, action = clap::ArgAction::Set)]
        enabled: Option<bool>,

        /// Uplink bandwidth in Mbps
        #[arg(long)]
        total_bandwidth: Option<u32>,
    },

    /// List traffic classes and their bandwidth share
    Classes(ListArgs),

    /// Set a traffic class's bandwidth share
    Bandwidth {
        /// Traffic class ID
        id: u64,

        /// Percent of link bandwidth (0-100)
        percent: u8,
    },

    /// List application rules
    Apps(ListArgs),

    /// Activate or deactivate an application rule
    ToggleApp {
        /// Application rule ID
        id: u64,
    },

    /// List per-device limits
    Limits(ListArgs),

    /// Change a device limit
    Limit {
        /// Device limit ID
        id: u64,

        /// Upload cap in Mbps
        #[arg(long)]
        upload: Option<u32>,

        /// Download cap in Mbps
        #[arg(long)]
        download: Option<u32>,

        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LogsArgs {
    #[command(subcommand)]
    pub command: LogsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LogsCommand {
    /// List log entries, most recent first
    #[command(alias = "ls")]
    List {
        /// Log type (system, network, security, dhcp...)
        #[arg(long, short = 't', value_name = "TYPE")]
        category: Option<String>,

        #[arg(long, short = 'l', value_enum)]
        level: Option<LogLevelArg>,

        /// Search message and source
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Append a log entry stamped with the current time
    Append {
        #[arg(long, value_enum, default_value = "info")]
        level: LogLevelArg,

        #[arg(long, default_value = "system")]
        category: String,

        #[arg(long, default_value = "cli")]
        source: String,

        /// Log message
        message: String,

        #[arg(long, default_value = "")]
        details: String,
    },

    /// Remove every log entry
    Clear,

    /// Export log entries, most recent first, as JSON
    Export {
        #[arg(long, short = 't', value_name = "TYPE")]
        category: Option<String>,

        #[arg(long, short = 'l', value_enum)]
        level: Option<LogLevelArg>,

        #[arg(long, short = 's')]
        search: Option<String>,

        /// Write to this file instead of stdout
        #[arg(long, short = 'f', value_name = "PATH")]
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Info,
    Warning,
    Error,
    Debug,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MONITORING
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MonitoringArgs {
    #[command(subcommand)]
    pub command: MonitoringCommand,
}

#[derive(Debug, Subcommand)]
pub enum MonitoringCommand {
    /// Traffic and error counters per interface
    #[command(alias = "if")]
    Interfaces {
        /// Only this interface (exact name, or "all")
        #[arg(long, short = 'i')]
        interface: Option<String>,
    },

    /// CPU, memory pools and storage usage
    Resources,

    /// Take a fresh resource snapshot
    Refresh,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMMANDS (reference + terminal)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CommandsArgs {
    #[command(subcommand)]
    pub command: CommandsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CommandsCommand {
    /// Browse the command reference
    #[command(alias = "ref")]
    Reference(ListArgs),

    /// Run a line in the simulated terminal
    Run {
        /// Command line, e.g. `show ip route`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },

    /// Show terminal history, most recent first
    History,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PREVIEW
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Section to render
    #[arg(value_enum, default_value = "all")]
    pub section: PreviewSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewSection {
    /// Every section, in running-config order
    All,
    Interfaces,
    Vrfs,
    Routing,
    Vlans,
    Dhcp,
    Firewall,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display the resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Set a configuration value
    Set {
        /// Dotted key, e.g. "validation.duplicates"
        key: String,

        /// Value to set
        value: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
