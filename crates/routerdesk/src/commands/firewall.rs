//! Firewall rule and access-control command handlers.

use tabled::Tabled;

use routerdesk_core::{
    AccessControlEntry, AccessState, Command as CoreCommand, CommandResult, Console,
    CreateFirewallRuleRequest, FirewallAction, FirewallProtocol, FirewallRule,
    UpdateFirewallRuleRequest, UpdateVpnSettingsRequest, VpnAuthentication, VpnEncryption,
    VpnProtocol, VpnSettings,
};

use crate::cli::{
    FirewallActionArg, FirewallArgs, FirewallCommand, FirewallProtocolArg, GlobalOpts,
    VpnAuthArg, VpnCommand, VpnEncryptionArg, VpnProtocolArg,
};
use crate::error::CliError;
use crate::output;

use super::util;

fn map_protocol(p: FirewallProtocolArg) -> FirewallProtocol {
    match p {
        FirewallProtocolArg::Tcp => FirewallProtocol::Tcp,
        FirewallProtocolArg::Udp => FirewallProtocol::Udp,
        FirewallProtocolArg::Icmp => FirewallProtocol::Icmp,
        FirewallProtocolArg::Any => FirewallProtocol::Any,
    }
}

fn map_action(a: FirewallActionArg) -> FirewallAction {
    match a {
        FirewallActionArg::Allow => FirewallAction::Allow,
        FirewallActionArg::Deny => FirewallAction::Deny,
        FirewallActionArg::Drop => FirewallAction::Drop,
    }
}

fn map_vpn_protocol(p: VpnProtocolArg) -> VpnProtocol {
    match p {
        VpnProtocolArg::OpenVpn => VpnProtocol::OpenVpn,
        VpnProtocolArg::WireGuard => VpnProtocol::WireGuard,
        VpnProtocolArg::L2tp => VpnProtocol::L2tpIpsec,
        VpnProtocolArg::Pptp => VpnProtocol::Pptp,
    }
}

fn map_encryption(e: VpnEncryptionArg) -> VpnEncryption {
    match e {
        VpnEncryptionArg::Aes256 => VpnEncryption::Aes256,
        VpnEncryptionArg::Aes128 => VpnEncryption::Aes128,
        VpnEncryptionArg::ChaCha20 => VpnEncryption::ChaCha20,
    }
}

fn map_auth(a: VpnAuthArg) -> VpnAuthentication {
    match a {
        VpnAuthArg::Sha256 => VpnAuthentication::Sha256,
        VpnAuthArg::Sha1 => VpnAuthentication::Sha1,
        VpnAuthArg::Md5 => VpnAuthentication::Md5,
    }
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Proto")]
    protocol: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl RuleRow {
    fn new(r: &FirewallRule, color: bool) -> Self {
        Self {
            id: r.id.to_string(),
            name: r.name.clone(),
            source: r.source.clone(),
            destination: r.destination.clone(),
            port: output::or_dash(&r.port),
            protocol: r.protocol.to_string(),
            action: output::status(
                &r.action.to_string(),
                r.action == FirewallAction::Allow,
                color,
            ),
            status: output::status(&r.status.to_string(), r.is_active(), color),
        }
    }
}

fn rule_detail(r: &FirewallRule) -> String {
    output::detail(&[
        ("ID", r.id.to_string()),
        ("Name", r.name.clone()),
        ("Source", r.source.clone()),
        ("Destination", r.destination.clone()),
        ("Port", output::or_dash(&r.port)),
        ("Protocol", r.protocol.to_string()),
        ("Action", r.action.to_string()),
        ("Status", r.status.to_string()),
    ])
}

#[derive(Tabled)]
struct AccessRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Schedule")]
    schedule: String,
    #[tabled(rename = "Access")]
    access: String,
    #[tabled(rename = "Parental")]
    parental: String,
}

impl AccessRow {
    fn new(e: &AccessControlEntry, color: bool) -> Self {
        Self {
            id: e.id.to_string(),
            device: e.device.clone(),
            mac: e.mac.clone(),
            schedule: output::or_dash(&e.time_restriction),
            access: output::status(
                &e.access.to_string(),
                e.access != AccessState::Blocked,
                color,
            ),
            parental: output::yes_no(e.parental_control),
        }
    }
}

fn access_detail(e: &AccessControlEntry) -> String {
    output::detail(&[
        ("ID", e.id.to_string()),
        ("Device", e.device.clone()),
        ("MAC", e.mac.clone()),
        ("Schedule", output::or_dash(&e.time_restriction)),
        ("Access", e.access.to_string()),
        ("Parental control", output::yes_no(e.parental_control)),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(
    console: &mut Console,
    args: FirewallArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = util::color(global);
    match args.command {
        FirewallCommand::List(list) => {
            let rows = util::filter(&list).apply(console.security().firewall.iter());
            util::print_list(global, &rows, |r| RuleRow::new(r, color), |r| r.id.to_string())
        }

        FirewallCommand::Create {
            name,
            source,
            destination,
            port,
            protocol,
            action,
        } => {
            // The draft parses protocol and action back from their display form.
            let request = CreateFirewallRuleRequest {
                name: name.unwrap_or_default(),
                source: source.unwrap_or_default(),
                destination: destination.unwrap_or_default(),
                port: port.unwrap_or_default(),
                protocol: map_protocol(protocol).to_string(),
                action: map_action(action).to_string(),
            };
            let result = console.execute(CoreCommand::CreateFirewallRule(request))?;
            print_rule(&result, global)
        }

        FirewallCommand::Update {
            id,
            name,
            source,
            destination,
            port,
            protocol,
            action,
        } => {
            let update = UpdateFirewallRuleRequest {
                name,
                source,
                destination,
                port,
                protocol: protocol.map(map_protocol),
                action: action.map(map_action),
            };
            let result = console.execute(CoreCommand::UpdateFirewallRule {
                id: util::id(id),
                update,
            })?;
            print_rule(&result, global)
        }

        FirewallCommand::Delete { id } => {
            let name = console.security().firewall.require(util::id(id))?.name.clone();
            if !util::confirm(&format!("Delete firewall rule '{name}'?"), global.yes)? {
                return Ok(());
            }
            let result = console.execute(CoreCommand::DeleteFirewallRule { id: util::id(id) })?;
            util::print_removed(&result, global)
        }

        FirewallCommand::Toggle { id } => {
            let result = console.execute(CoreCommand::ToggleFirewallRule { id: util::id(id) })?;
            print_rule(&result, global)
        }

        FirewallCommand::Access(list) => {
            let rows = util::filter(&list).apply(console.security().access.iter());
            util::print_list(
                global,
                &rows,
                |e| AccessRow::new(e, color),
                |e| e.mac.clone(),
            )
        }

        FirewallCommand::Block { id } => {
            let result = console.execute(CoreCommand::ToggleAccess { id: util::id(id) })?;
            print_access(&result, global)
        }

        FirewallCommand::Parental { id } => {
            let result =
                console.execute(CoreCommand::ToggleParentalControl { id: util::id(id) })?;
            print_access(&result, global)
        }

        FirewallCommand::Vpn(vpn) => handle_vpn(console, vpn.command, global),
    }
}

fn vpn_detail(v: &VpnSettings) -> String {
    output::detail(&[
        ("Enabled", output::yes_no(v.enabled)),
        ("Protocol", v.protocol.to_string()),
        ("Port", v.port.to_string()),
        ("Encryption", v.encryption.to_string()),
        ("Authentication", v.authentication.to_string()),
    ])
}

fn handle_vpn(console: &mut Console, cmd: VpnCommand, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        VpnCommand::Show => util::print_single(global, &console.security().vpn, vpn_detail, |v| {
            output::yes_no(v.enabled)
        }),

        VpnCommand::Configure {
            enabled,
            protocol,
            port,
            encryption,
            authentication,
        } => {
            let update = UpdateVpnSettingsRequest {
                enabled,
                protocol: protocol.map(map_vpn_protocol),
                port,
                encryption: encryption.map(map_encryption),
                authentication: authentication.map(map_auth),
            };
            let result = console.execute(CoreCommand::UpdateVpnSettings(update))?;
            if let CommandResult::VpnSettings(settings) = result {
                util::print_single(global, &settings, vpn_detail, |v| output::yes_no(v.enabled))?;
            }
            Ok(())
        }
    }
}

fn print_rule(result: &CommandResult, global: &GlobalOpts) -> Result<(), CliError> {
    match result {
        CommandResult::FirewallRule(rule) => {
            util::print_single(global, rule, rule_detail, |r| r.id.to_string())
        }
        _ => Ok(()),
    }
}

fn print_access(result: &CommandResult, global: &GlobalOpts) -> Result<(), CliError> {
    match result {
        CommandResult::AccessEntry(entry) => {
            util::print_single(global, entry, access_detail, |e| e.access.to_string())
        }
        _ => Ok(()),
    }
}
