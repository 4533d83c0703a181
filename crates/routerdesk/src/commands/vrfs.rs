//! VRF command handlers.

use tabled::Tabled;

use routerdesk_core::{
    Command as CoreCommand, CommandResult, Console, CreateVrfRequest, UpdateVrfRequest, Vrf,
};

use crate::cli::{GlobalOpts, VrfsArgs, VrfsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct VrfRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "RD")]
    rd: String,
    #[tabled(rename = "Interfaces")]
    interfaces: String,
    #[tabled(rename = "Routes")]
    routes: usize,
    #[tabled(rename = "Status")]
    status: String,
}

impl VrfRow {
    fn new(v: &Vrf, color: bool) -> Self {
        Self {
            id: v.id.to_string(),
            name: v.name.clone(),
            rd: v.rd.clone(),
            interfaces: output::or_dash(&v.interfaces.join(", ")),
            routes: v.routes.len(),
            status: output::status(&v.status.to_string(), v.is_active(), color),
        }
    }
}

fn vrf_detail(v: &Vrf) -> String {
    let mut out = output::detail(&[
        ("ID", v.id.to_string()),
        ("Name", v.name.clone()),
        ("RD", v.rd.clone()),
        ("RT import", output::or_dash(&v.rt_import.join(", "))),
        ("RT export", output::or_dash(&v.rt_export.join(", "))),
        ("Interfaces", output::or_dash(&v.interfaces.join(", "))),
        ("Status", v.status.to_string()),
        ("Description", output::or_dash(&v.description)),
    ]);
    if !v.routes.is_empty() {
        out.push_str("\n\nRoutes:");
        for route in &v.routes {
            out.push_str(&format!(
                "\n  {:<20} via {:<16} [{}]",
                route.network, route.next_hop, route.source
            ));
        }
    }
    out
}

pub fn handle(console: &mut Console, args: VrfsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = util::color(global);
    match args.command {
        VrfsCommand::List(list) => {
            let rows = util::filter(&list).apply(console.vrfs().vrfs.iter());
            util::print_list(global, &rows, |v| VrfRow::new(v, color), |v| v.name.clone())
        }

        VrfsCommand::Get { id } => {
            let vrf = console.vrfs().vrfs.require(util::id(id))?;
            util::print_single(global, vrf, vrf_detail, |v| v.name.clone())
        }

        VrfsCommand::Create {
            name,
            rd,
            rt_import,
            rt_export,
            description,
        } => {
            let request = CreateVrfRequest {
                name: name.unwrap_or_default(),
                rd: rd.unwrap_or_default(),
                rt_import: rt_import.unwrap_or_default(),
                rt_export: rt_export.unwrap_or_default(),
                description: description.unwrap_or_default(),
            };
            let result = console.execute(CoreCommand::CreateVrf(request))?;
            print_vrf(&result, global)
        }

        VrfsCommand::Update {
            id,
            name,
            rd,
            rt_import,
            rt_export,
            description,
        } => {
            let update = UpdateVrfRequest {
                name,
                rd,
                rt_import: util::list_flag(rt_import),
                rt_export: util::list_flag(rt_export),
                description,
            };
            let result = console.execute(CoreCommand::UpdateVrf {
                id: util::id(id),
                update,
            })?;
            print_vrf(&result, global)
        }

        VrfsCommand::Delete { id } => {
            let name = console.vrfs().vrfs.require(util::id(id))?.name.clone();
            if !util::confirm(&format!("Delete VRF '{name}'?"), global.yes)? {
                return Ok(());
            }
            let result = console.execute(CoreCommand::DeleteVrf { id: util::id(id) })?;
            util::print_removed(&result, global)
        }

        VrfsCommand::Toggle { id } => {
            let result = console.execute(CoreCommand::ToggleVrf { id: util::id(id) })?;
            print_vrf(&result, global)
        }

        VrfsCommand::Assign { id, interface } => {
            let result = console.execute(CoreCommand::AssignVrfInterface {
                id: util::id(id),
                interface,
            })?;
            print_vrf(&result, global)
        }

        VrfsCommand::Unassign { id, interface } => {
            let result = console.execute(CoreCommand::UnassignVrfInterface {
                id: util::id(id),
                interface,
            })?;
            print_vrf(&result, global)
        }
    }
}

fn print_vrf(result: &CommandResult, global: &GlobalOpts) -> Result<(), CliError> {
    match result {
        CommandResult::Vrf(vrf) => util::print_single(global, vrf, vrf_detail, |v| v.name.clone()),
        _ => Ok(()),
    }
}
