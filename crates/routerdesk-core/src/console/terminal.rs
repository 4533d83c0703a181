// ── Simulated terminal ──
//
// Every command line lands in the history. A handful of `show` commands
// render from live console state; anything else gets the canned
// "executed" screen.

use std::net::Ipv4Addr;

use chrono::Local;

use super::Console;
use crate::error::CoreError;
use crate::model::{CommandHistoryEntry, CommandStatus, LinkStatus, RecordId};
use crate::notify::NotificationSink;

/// `show` commands with a state-backed renderer.
pub const KNOWN_SHOW_COMMANDS: &[&str] = &[
    "show ip route",
    "show interfaces brief",
    "show ip interface brief",
    "show running-config",
    "show vlan brief",
    "show vrf",
];

impl<S: NotificationSink> Console<S> {
    pub(super) fn run_command(&mut self, line: &str) -> Result<Vec<String>, CoreError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CoreError::required("command"));
        }

        self.terminal.history.add(CommandHistoryEntry {
            id: RecordId::default(),
            command: line.to_owned(),
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            status: CommandStatus::Success,
        })?;

        let prompt = format!("{}#", self.config.hostname);
        let normalized = line
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();

        let body = match normalized.as_str() {
            "show ip route" => self.show_ip_route(),
            "show interfaces brief" | "show ip interface brief" => self.show_interfaces_brief(),
            "show running-config" => self.show_running_config(),
            "show vlan brief" => self.show_vlan_brief(),
            "show vrf" => self.show_vrf(),
            _ => vec![
                "Command executed successfully".to_owned(),
                "Output would appear here...".to_owned(),
            ],
        };

        let mut output = Vec::with_capacity(body.len() + 2);
        output.push(format!("{prompt}{line}"));
        output.extend(body);
        output.push(prompt);
        self.terminal.output.clone_from(&output);
        Ok(output)
    }

    fn show_ip_route(&self) -> Vec<String> {
        let mut out = vec![
            "Codes: L - local, C - connected, S - static, R - RIP, M - mobile, B - BGP".to_owned(),
            "       D - EIGRP, EX - EIGRP external, O - OSPF, IA - OSPF inter area".to_owned(),
            "       N1 - OSPF NSSA external type 1, N2 - OSPF NSSA external type 2".to_owned(),
            "       E1 - OSPF external type 1, E2 - OSPF external type 2".to_owned(),
            String::new(),
        ];

        let routes = &self.routing.static_routes;
        match routes.find(|r| r.is_default_route()) {
            Some(default) => out.push(format!(
                "Gateway of last resort is {} to network 0.0.0.0",
                default.next_hop()
            )),
            None => out.push("Gateway of last resort is not set".to_owned()),
        }
        out.push(String::new());

        for route in routes.iter() {
            let code = if route.is_default_route() { "S*" } else { "S " };
            out.push(format!(
                "{code}    {}/{} [{}/0] via {}",
                route.network,
                prefix_len(&route.mask),
                route.distance,
                route.next_hop()
            ));
        }
        for iface in self.interfaces.interfaces.iter().filter(|i| i.is_configured()) {
            let (Ok(ip), Ok(mask)) = (iface.ip.parse::<Ipv4Addr>(), iface.mask.parse::<Ipv4Addr>())
            else {
                continue;
            };
            let network = Ipv4Addr::from(u32::from(ip) & u32::from(mask));
            out.push(format!(
                "C     {network}/{} is directly connected, {}",
                prefix_len(&iface.mask),
                iface.name
            ));
            out.push(format!("L     {ip}/32 is directly connected, {}", iface.name));
        }
        out
    }

    fn show_interfaces_brief(&self) -> Vec<String> {
        let mut out = vec![format!(
            "{:<24}{:<16}{:<5}{:<8}{:<22}{}",
            "Interface", "IP-Address", "OK?", "Method", "Status", "Protocol"
        )];
        for iface in self.interfaces.interfaces.iter() {
            let ip = if iface.has_address() {
                iface.ip.as_str()
            } else {
                "unassigned"
            };
            let method = if iface.has_address() { "manual" } else { "unset" };
            let (status, protocol) = match iface.status {
                LinkStatus::Up => ("up", "up"),
                LinkStatus::Down => ("administratively down", "down"),
            };
            out.push(format!(
                "{:<24}{:<16}{:<5}{:<8}{:<22}{}",
                iface.name, ip, "YES", method, status, protocol
            ));
        }
        out
    }

    fn show_running_config(&self) -> Vec<String> {
        let mut out = vec![
            "Building configuration...".to_owned(),
            String::new(),
            format!("hostname {}", self.config.hostname),
            "!".to_owned(),
        ];
        out.extend(self.running_config().to_string().lines().map(str::to_owned));
        out.push("end".to_owned());
        out
    }

    fn show_vlan_brief(&self) -> Vec<String> {
        let mut out = vec![
            format!("{:<5}{:<33}{:<10}{}", "VLAN", "Name", "Status", "Ports"),
            format!("{:-<4} {:-<32} {:-<9} {:-<30}", "", "", "", ""),
        ];
        for vlan in self.vlans.vlans.iter() {
            out.push(format!(
                "{:<5}{:<33}{:<10}{}",
                vlan.vlan_id,
                vlan.name,
                "active",
                vlan.ports.join(", ")
            ));
        }
        out
    }

    fn show_vrf(&self) -> Vec<String> {
        let mut out = vec![format!(
            "  {:<32}{:<21}{:<11}{}",
            "Name", "Default RD", "Protocols", "Interfaces"
        )];
        for vrf in self.vrfs.vrfs.iter() {
            let protocols = if vrf.is_active() { "ipv4" } else { "" };
            let mut interfaces = vrf.interfaces.iter();
            out.push(format!(
                "  {:<32}{:<21}{:<11}{}",
                vrf.name,
                vrf.rd,
                protocols,
                interfaces.next().map_or("", String::as_str)
            ));
            for iface in interfaces {
                out.push(format!("  {:<64}{iface}", ""));
            }
        }
        out
    }
}

/// Dotted mask to prefix length; anything unparseable counts as /0.
fn prefix_len(mask: &str) -> u32 {
    mask.parse::<Ipv4Addr>()
        .map_or(0, |m| u32::from(m).count_ones())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::command::{Command, CommandResult};

    fn run(console: &mut Console, line: &str) -> Vec<String> {
        match console
            .execute(Command::RunCommand { line: line.into() })
            .unwrap()
        {
            CommandResult::Terminal(lines) => lines,
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn blank_command_is_rejected_without_history() {
        let mut console = Console::default();
        let before = console.terminal().history.len();
        let err = console
            .execute(Command::RunCommand { line: "   ".into() })
            .unwrap_err();
        assert_eq!(err.field(), Some("command"));
        assert_eq!(console.terminal().history.len(), before);
    }

    #[test]
    fn unknown_command_gets_canned_output() {
        let mut console = Console::default();
        let out = run(&mut console, "ping 8.8.8.8");
        assert_eq!(
            out,
            [
                "Router#ping 8.8.8.8",
                "Command executed successfully",
                "Output would appear here...",
                "Router#",
            ]
        );
        let latest = console.terminal().recent_history().next().unwrap();
        assert_eq!(latest.command, "ping 8.8.8.8");
        assert_eq!(latest.status, CommandStatus::Success);
    }

    #[test]
    fn show_ip_route_reflects_seeded_routes() {
        let mut console = Console::default();
        let out = run(&mut console, "SHOW  ip route");
        assert!(out.contains(&"Gateway of last resort is 203.0.113.1 to network 0.0.0.0".to_owned()));
        assert!(out.contains(&"S*    0.0.0.0/0 [1/0] via 203.0.113.1".to_owned()));
        assert!(
            out.contains(&"C     192.168.1.0/24 is directly connected, GigabitEthernet0/0/1".to_owned())
        );
    }

    #[test]
    fn interface_brief_marks_down_ports() {
        let mut console = Console::default();
        let out = run(&mut console, "show ip interface brief");
        let gi3 = out
            .iter()
            .find(|l| l.starts_with("GigabitEthernet0/0/3"))
            .unwrap();
        assert!(gi3.contains("unassigned"));
        assert!(gi3.contains("administratively down"));
    }

    #[test]
    fn prefix_lengths() {
        assert_eq!(prefix_len("255.255.255.0"), 24);
        assert_eq!(prefix_len("255.255.255.252"), 30);
        assert_eq!(prefix_len("0.0.0.0"), 0);
        assert_eq!(prefix_len("bogus"), 0);
    }
}
