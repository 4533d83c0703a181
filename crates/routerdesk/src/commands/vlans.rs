//! VLAN command handlers (VLANs + switch ports).

use tabled::Tabled;

use routerdesk_core::{
    Command as CoreCommand, CommandResult, Console, CreateVlanRequest, PortMode, SwitchPort,
    UpdateSwitchPortRequest, UpdateVlanRequest, Vlan,
};

use crate::cli::{GlobalOpts, PortModeArg, VlansArgs, VlansCommand};
use crate::error::CliError;
use crate::output;

use super::util;

fn map_mode(m: PortModeArg) -> PortMode {
    match m {
        PortModeArg::Access => PortMode::Access,
        PortModeArg::Trunk => PortMode::Trunk,
    }
}

// ── VLAN table row ──────────────────────────────────────────────────

#[derive(Tabled)]
struct VlanRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "VLAN")]
    vlan_id: u16,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Subnet")]
    subnet: String,
    #[tabled(rename = "Ports")]
    ports: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Vlan> for VlanRow {
    fn from(v: &Vlan) -> Self {
        Self {
            id: v.id.to_string(),
            vlan_id: v.vlan_id,
            name: v.name.clone(),
            subnet: v.subnet.clone(),
            ports: output::or_dash(&v.ports.join(", ")),
            description: output::or_dash(&v.description),
        }
    }
}

fn vlan_detail(v: &Vlan) -> String {
    output::detail(&[
        ("ID", v.id.to_string()),
        ("VLAN", v.vlan_id.to_string()),
        ("Name", v.name.clone()),
        ("Subnet", v.subnet.clone()),
        ("Ports", output::or_dash(&v.ports.join(", "))),
        ("Description", output::or_dash(&v.description)),
    ])
}

// ── Switch port table row ───────────────────────────────────────────

#[derive(Tabled)]
struct PortRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "VLANs")]
    vlans: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&SwitchPort> for PortRow {
    fn from(p: &SwitchPort) -> Self {
        Self {
            id: p.id.to_string(),
            port: p.port.clone(),
            mode: p.mode.to_string(),
            vlans: p.vlans.clone(),
            description: output::or_dash(&p.description),
        }
    }
}

fn port_detail(p: &SwitchPort) -> String {
    output::detail(&[
        ("ID", p.id.to_string()),
        ("Port", p.port.clone()),
        ("Mode", p.mode.to_string()),
        ("VLANs", p.vlans.clone()),
        ("Description", output::or_dash(&p.description)),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(console: &mut Console, args: VlansArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        VlansCommand::List(list) => {
            let rows = util::filter(&list).apply(console.vlans().vlans.iter());
            util::print_list(global, &rows, |v| VlanRow::from(*v), |v| v.id.to_string())
        }

        VlansCommand::Get { id } => {
            let vlan = console.vlans().vlans.require(util::id(id))?;
            util::print_single(global, vlan, vlan_detail, |v| v.vlan_id.to_string())
        }

        VlansCommand::Create {
            vlan_id,
            name,
            description,
            subnet,
            ports,
        } => {
            let request = CreateVlanRequest {
                vlan_id: vlan_id.unwrap_or_default(),
                name: name.unwrap_or_default(),
                description: description.unwrap_or_default(),
                subnet: subnet.unwrap_or_default(),
                ports: ports.unwrap_or_default(),
            };
            let result = console.execute(CoreCommand::CreateVlan(request))?;
            print_vlan(&result, global)
        }

        VlansCommand::Update {
            id,
            vlan_id,
            name,
            description,
            subnet,
            ports,
        } => {
            let update = UpdateVlanRequest {
                vlan_id,
                name,
                description,
                subnet,
                ports: util::list_flag(ports),
            };
            let result = console.execute(CoreCommand::UpdateVlan {
                id: util::id(id),
                update,
            })?;
            print_vlan(&result, global)
        }

        VlansCommand::Delete { id } => {
            let name = console.vlans().vlans.require(util::id(id))?.name.clone();
            if !util::confirm(&format!("Delete VLAN '{name}'?"), global.yes)? {
                return Ok(());
            }
            let result = console.execute(CoreCommand::DeleteVlan { id: util::id(id) })?;
            util::print_removed(&result, global)
        }

        VlansCommand::Ports(list) => {
            let rows = util::filter(&list).apply(console.vlans().ports.iter());
            util::print_list(global, &rows, |p| PortRow::from(*p), |p| p.port.clone())
        }

        VlansCommand::Port {
            id,
            mode,
            vlans,
            description,
        } => {
            let update = UpdateSwitchPortRequest {
                mode: mode.map(map_mode),
                vlans,
                description,
            };
            let result = console.execute(CoreCommand::UpdateSwitchPort {
                id: util::id(id),
                update,
            })?;
            if let CommandResult::SwitchPort(port) = result {
                util::print_single(global, &port, port_detail, |p| p.port.clone())?;
            }
            Ok(())
        }
    }
}

fn print_vlan(result: &CommandResult, global: &GlobalOpts) -> Result<(), CliError> {
    match result {
        CommandResult::Vlan(vlan) => {
            util::print_single(global, vlan, vlan_detail, |v| v.vlan_id.to_string())
        }
        _ => Ok(()),
    }
}
