//! Routing command handlers (protocols, static routes, OSPF areas, BGP neighbors).

use tabled::Tabled;

use routerdesk_core::{
    BgpNeighbor, Command as CoreCommand, CommandResult, Console, CreateBgpNeighborRequest,
    CreateOspfAreaRequest, CreateStaticRouteRequest, OspfArea, OspfAreaKind, RoutingProtocol,
    RoutingProtocols, StaticRoute, UpdateProtocolRequest, UpdateStaticRouteRequest,
};

use crate::cli::{
    BgpNeighborsCommand, GlobalOpts, OspfAreaKindArg, OspfAreasCommand, RoutesCommand,
    RoutingArgs, RoutingCommand, RoutingProtocolArg,
};
use crate::error::CliError;
use crate::output;

use super::util;

fn map_protocol(p: RoutingProtocolArg) -> RoutingProtocol {
    match p {
        RoutingProtocolArg::Ospf => RoutingProtocol::Ospf,
        RoutingProtocolArg::Eigrp => RoutingProtocol::Eigrp,
        RoutingProtocolArg::Bgp => RoutingProtocol::Bgp,
        RoutingProtocolArg::Rip => RoutingProtocol::Rip,
    }
}

fn map_area_kind(k: OspfAreaKindArg) -> OspfAreaKind {
    match k {
        OspfAreaKindArg::Standard => OspfAreaKind::Standard,
        OspfAreaKindArg::Stub => OspfAreaKind::Stub,
        OspfAreaKindArg::Nssa => OspfAreaKind::Nssa,
    }
}

// ── Protocol summary ────────────────────────────────────────────────

/// One line per protocol; the settings object itself is what JSON emits.
#[derive(Tabled)]
struct ProtocolRow {
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Settings")]
    settings: String,
}

fn protocol_rows(p: &RoutingProtocols, color: bool) -> Vec<ProtocolRow> {
    let row = |name: &str, enabled: bool, settings: String| ProtocolRow {
        protocol: name.into(),
        enabled: output::status(&output::yes_no(enabled), enabled, color),
        settings,
    };
    vec![
        row(
            "OSPF",
            p.ospf.enabled,
            format!(
                "process {}, router-id {}",
                p.ospf.process_id,
                output::or_dash(&p.ospf.router_id)
            ),
        ),
        row("EIGRP", p.eigrp.enabled, format!("AS {}", p.eigrp.asn)),
        row(
            "BGP",
            p.bgp.enabled,
            format!(
                "AS {}, router-id {}",
                p.bgp.asn,
                output::or_dash(&p.bgp.router_id)
            ),
        ),
        row("RIP", p.rip.enabled, format!("version {}", p.rip.version)),
    ]
}

fn print_protocols(
    protocols: &RoutingProtocols,
    global: &GlobalOpts,
    color: bool,
) -> Result<(), CliError> {
    util::print_single(
        global,
        protocols,
        |p| {
            tabled::Table::new(protocol_rows(p, color))
                .with(tabled::settings::Style::rounded())
                .to_string()
        },
        |p| {
            protocol_rows(p, false)
                .into_iter()
                .filter(|r| r.enabled == "yes")
                .map(|r| r.protocol)
                .collect::<Vec<_>>()
                .join("\n")
        },
    )
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Mask")]
    mask: String,
    #[tabled(rename = "Next Hop")]
    next_hop: String,
    #[tabled(rename = "AD")]
    distance: u8,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&StaticRoute> for RouteRow {
    fn from(r: &StaticRoute) -> Self {
        Self {
            id: r.id.to_string(),
            network: r.network.clone(),
            mask: r.mask.clone(),
            next_hop: r.next_hop().to_owned(),
            distance: r.distance,
            description: output::or_dash(&r.description),
        }
    }
}

fn route_detail(r: &StaticRoute) -> String {
    output::detail(&[
        ("ID", r.id.to_string()),
        ("Network", format!("{} {}", r.network, r.mask)),
        ("Gateway", output::or_dash(&r.gateway)),
        ("Interface", output::or_dash(&r.interface)),
        ("Distance", r.distance.to_string()),
        ("Description", output::or_dash(&r.description)),
    ])
}

#[derive(Tabled)]
struct AreaRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Area")]
    area_id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Networks")]
    networks: String,
}

impl From<&OspfArea> for AreaRow {
    fn from(a: &OspfArea) -> Self {
        Self {
            id: a.id.to_string(),
            area_id: a.area_id.clone(),
            kind: a.kind.to_string(),
            networks: a.networks.join("\n"),
        }
    }
}

fn area_detail(a: &OspfArea) -> String {
    output::detail(&[
        ("ID", a.id.to_string()),
        ("Area", a.area_id.clone()),
        ("Type", a.kind.to_string()),
        ("Networks", a.networks.join(", ")),
    ])
}

#[derive(Tabled)]
struct NeighborRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Neighbor")]
    ip: String,
    #[tabled(rename = "Remote AS")]
    remote_as: u32,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&BgpNeighbor> for NeighborRow {
    fn from(n: &BgpNeighbor) -> Self {
        Self {
            id: n.id.to_string(),
            ip: n.ip.clone(),
            remote_as: n.remote_as,
            description: output::or_dash(&n.description),
        }
    }
}

fn neighbor_detail(n: &BgpNeighbor) -> String {
    output::detail(&[
        ("ID", n.id.to_string()),
        ("Neighbor", n.ip.clone()),
        ("Remote AS", n.remote_as.to_string()),
        ("Description", output::or_dash(&n.description)),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    console: &mut Console,
    args: RoutingArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = util::color(global);
    match args.command {
        RoutingCommand::Protocols => print_protocols(&console.routing().protocols, global, color),

        RoutingCommand::Protocol {
            protocol,
            enabled,
            process_id,
            router_id,
            asn,
            version,
        } => {
            let mut update = UpdateProtocolRequest::new(map_protocol(protocol));
            update.enabled = enabled;
            update.process_id = process_id;
            update.router_id = router_id;
            update.asn = asn;
            update.version = version;
            let result = console.execute(CoreCommand::UpdateProtocol(update))?;
            if let CommandResult::Protocols(protocols) = result {
                print_protocols(&protocols, global, color)?;
            }
            Ok(())
        }

        RoutingCommand::Routes(rargs) => handle_routes(console, rargs.command, global),
        RoutingCommand::OspfAreas(aargs) => handle_areas(console, aargs.command, global),
        RoutingCommand::BgpNeighbors(nargs) => handle_neighbors(console, nargs.command, global),
    }
}

fn handle_routes(
    console: &mut Console,
    cmd: RoutesCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        RoutesCommand::List(list) => {
            let rows = util::filter(&list).apply(console.routing().static_routes.iter());
            util::print_list(global, &rows, |r| RouteRow::from(*r), |r| r.id.to_string())
        }

        RoutesCommand::Create {
            network,
            mask,
            gateway,
            interface,
            distance,
            description,
        } => {
            let request = CreateStaticRouteRequest {
                network: network.unwrap_or_default(),
                mask: mask.unwrap_or_default(),
                gateway: gateway.unwrap_or_default(),
                interface: interface.unwrap_or_default(),
                distance: distance.map(|d| d.to_string()).unwrap_or_default(),
                description: description.unwrap_or_default(),
            };
            let result = console.execute(CoreCommand::CreateStaticRoute(request))?;
            print_route(&result, global)
        }

        RoutesCommand::Update {
            id,
            network,
            mask,
            gateway,
            interface,
            distance,
            description,
        } => {
            let update = UpdateStaticRouteRequest {
                network,
                mask,
                gateway,
                interface,
                distance,
                description,
            };
            let result = console.execute(CoreCommand::UpdateStaticRoute {
                id: util::id(id),
                update,
            })?;
            print_route(&result, global)
        }

        RoutesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete static route {id}?"), global.yes)? {
                return Ok(());
            }
            let result = console.execute(CoreCommand::DeleteStaticRoute { id: util::id(id) })?;
            util::print_removed(&result, global)
        }
    }
}

fn handle_areas(
    console: &mut Console,
    cmd: OspfAreasCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        OspfAreasCommand::List(list) => {
            let rows = util::filter(&list).apply(console.routing().ospf_areas.iter());
            util::print_list(global, &rows, |a| AreaRow::from(*a), |a| a.id.to_string())
        }

        OspfAreasCommand::Create {
            area_id,
            kind,
            networks,
        } => {
            let request = CreateOspfAreaRequest {
                area_id: area_id.unwrap_or_default(),
                kind: map_area_kind(kind).to_string(),
                networks: networks.unwrap_or_default(),
            };
            let result = console.execute(CoreCommand::CreateOspfArea(request))?;
            if let CommandResult::OspfArea(area) = result {
                util::print_single(global, &area, area_detail, |a| a.id.to_string())?;
            }
            Ok(())
        }

        OspfAreasCommand::Delete { id } => {
            if !util::confirm(&format!("Delete OSPF area {id}?"), global.yes)? {
                return Ok(());
            }
            let result = console.execute(CoreCommand::DeleteOspfArea { id: util::id(id) })?;
            util::print_removed(&result, global)
        }
    }
}

fn handle_neighbors(
    console: &mut Console,
    cmd: BgpNeighborsCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        BgpNeighborsCommand::List(list) => {
            let rows = util::filter(&list).apply(console.routing().bgp_neighbors.iter());
            util::print_list(
                global,
                &rows,
                |n| NeighborRow::from(*n),
                |n| n.id.to_string(),
            )
        }

        BgpNeighborsCommand::Create {
            ip,
            remote_as,
            description,
        } => {
            let request = CreateBgpNeighborRequest {
                ip: ip.unwrap_or_default(),
                remote_as: remote_as.map(|asn| asn.to_string()).unwrap_or_default(),
                description: description.unwrap_or_default(),
            };
            let result = console.execute(CoreCommand::CreateBgpNeighbor(request))?;
            if let CommandResult::BgpNeighbor(neighbor) = result {
                util::print_single(global, &neighbor, neighbor_detail, |n| n.id.to_string())?;
            }
            Ok(())
        }

        BgpNeighborsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete BGP neighbor {id}?"), global.yes)? {
                return Ok(());
            }
            let result = console.execute(CoreCommand::DeleteBgpNeighbor { id: util::id(id) })?;
            util::print_removed(&result, global)
        }
    }
}

fn print_route(result: &CommandResult, global: &GlobalOpts) -> Result<(), CliError> {
    match result {
        CommandResult::StaticRoute(route) => {
            util::print_single(global, route, route_detail, |r| r.id.to_string())
        }
        _ => Ok(()),
    }
}
