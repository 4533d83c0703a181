//! Interface command handlers.

use tabled::Tabled;

use routerdesk_core::{
    Command as CoreCommand, CommandResult, Console, Duplex, LinkStatus, NetworkInterface,
    UpdateInterfaceRequest,
};

use crate::cli::{DuplexArg, GlobalOpts, InterfacesArgs, InterfacesCommand, LinkState};
use crate::error::CliError;
use crate::output;

use super::util;

fn map_status(s: LinkState) -> LinkStatus {
    match s {
        LinkState::Up => LinkStatus::Up,
        LinkState::Down => LinkStatus::Down,
    }
}

fn map_duplex(d: DuplexArg) -> Duplex {
    match d {
        DuplexArg::Auto => Duplex::Auto,
        DuplexArg::Full => Duplex::Full,
        DuplexArg::Half => Duplex::Half,
        DuplexArg::Na => Duplex::NotApplicable,
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Speed")]
    speed: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl InterfaceRow {
    fn new(i: &NetworkInterface, color: bool) -> Self {
        let address = if i.has_address() {
            format!("{}/{}", i.ip, i.mask)
        } else {
            output::muted("unassigned", color)
        };
        Self {
            id: i.id.to_string(),
            name: i.name.clone(),
            kind: i.kind.to_string(),
            address,
            status: output::status(&i.status.to_string(), i.is_up(), color),
            speed: output::or_dash(&i.speed),
            description: output::or_dash(&i.description),
        }
    }
}

fn interface_detail(i: &NetworkInterface) -> String {
    output::detail(&[
        ("ID", i.id.to_string()),
        ("Name", i.name.clone()),
        ("Type", i.kind.to_string()),
        ("IP", output::or_dash(&i.ip)),
        ("Mask", output::or_dash(&i.mask)),
        ("Status", i.status.to_string()),
        ("Duplex", i.duplex.to_string()),
        ("Speed", output::or_dash(&i.speed)),
        ("Description", output::or_dash(&i.description)),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    console: &mut Console,
    args: InterfacesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = util::color(global);
    match args.command {
        InterfacesCommand::List(list) => {
            let rows = util::filter(&list).apply(console.interfaces().interfaces.iter());
            util::print_list(
                global,
                &rows,
                |i| InterfaceRow::new(i, color),
                |i| i.id.to_string(),
            )
        }

        InterfacesCommand::Get { id } => {
            let iface = console.interfaces().interfaces.require(util::id(id))?;
            util::print_single(global, iface, interface_detail, |i| i.name.clone())
        }

        InterfacesCommand::Update {
            id,
            ip,
            mask,
            description,
            status,
            duplex,
            speed,
        } => {
            let update = UpdateInterfaceRequest {
                ip,
                mask,
                description,
                status: status.map(map_status),
                duplex: duplex.map(map_duplex),
                speed,
            };
            let result = console.execute(CoreCommand::UpdateInterface {
                id: util::id(id),
                update,
            })?;
            print_interface(&result, global)
        }

        InterfacesCommand::Toggle { id } => {
            let result = console.execute(CoreCommand::ToggleInterface { id: util::id(id) })?;
            print_interface(&result, global)
        }
    }
}

fn print_interface(result: &CommandResult, global: &GlobalOpts) -> Result<(), CliError> {
    match result {
        CommandResult::Interface(iface) => {
            util::print_single(global, iface, interface_detail, |i| i.name.clone())
        }
        _ => Ok(()),
    }
}
