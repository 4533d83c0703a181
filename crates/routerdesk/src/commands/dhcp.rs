//! DHCP command handlers (server settings, reservations, leases).

use tabled::Tabled;

use routerdesk_core::{
    Command as CoreCommand, CommandResult, Console, CreateReservationRequest, DhcpLease,
    DhcpReservation, DhcpServerSettings, LeaseKind, UpdateDhcpSettingsRequest,
    UpdateReservationRequest,
};

use crate::cli::{DhcpArgs, DhcpCommand, GlobalOpts, LeasesCommand, ReservationsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReservationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&DhcpReservation> for ReservationRow {
    fn from(r: &DhcpReservation) -> Self {
        Self {
            id: r.id.to_string(),
            hostname: r.hostname.clone(),
            mac: r.mac.clone(),
            ip: r.ip.clone(),
            description: output::or_dash(&r.description),
        }
    }
}

fn reservation_detail(r: &DhcpReservation) -> String {
    output::detail(&[
        ("ID", r.id.to_string()),
        ("Hostname", r.hostname.clone()),
        ("MAC", r.mac.clone()),
        ("IP", r.ip.clone()),
        ("Description", output::or_dash(&r.description)),
    ])
}

#[derive(Tabled)]
struct LeaseRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Lease")]
    lease: String,
    #[tabled(rename = "Type")]
    kind: String,
}

impl LeaseRow {
    fn new(l: &DhcpLease, color: bool) -> Self {
        let kind = match l.kind {
            LeaseKind::Reserved => output::muted(&l.kind.to_string(), color),
            LeaseKind::Dynamic => l.kind.to_string(),
        };
        Self {
            hostname: l.hostname.clone(),
            mac: l.mac.clone(),
            ip: l.ip.clone(),
            lease: l.lease.clone(),
            kind,
        }
    }
}

fn settings_detail(s: &DhcpServerSettings) -> String {
    output::detail(&[
        ("Enabled", output::yes_no(s.enabled)),
        ("Pool", format!("{} - {}", s.pool_start, s.pool_end)),
        ("Lease", format!("{} hours", s.lease_hours)),
        ("Gateway", output::or_dash(&s.gateway)),
        ("Primary DNS", output::or_dash(&s.dns_primary)),
        ("Secondary DNS", output::or_dash(&s.dns_secondary)),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(console: &mut Console, args: DhcpArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        DhcpCommand::Settings => util::print_single(
            global,
            &console.dhcp().settings,
            settings_detail,
            |s| output::yes_no(s.enabled),
        ),

        DhcpCommand::Configure {
            enabled,
            pool_start,
            pool_end,
            lease_hours,
            gateway,
            dns_primary,
            dns_secondary,
        } => {
            let update = UpdateDhcpSettingsRequest {
                enabled,
                pool_start,
                pool_end,
                lease_hours,
                gateway,
                dns_primary,
                dns_secondary,
            };
            let result = console.execute(CoreCommand::UpdateDhcpSettings(update))?;
            if let CommandResult::DhcpSettings(settings) = result {
                util::print_single(global, &settings, settings_detail, |s| {
                    output::yes_no(s.enabled)
                })?;
            }
            Ok(())
        }

        DhcpCommand::Reservations(rargs) => handle_reservations(console, rargs.command, global),
        DhcpCommand::Leases(largs) => handle_leases(console, largs.command, global),
    }
}

fn handle_reservations(
    console: &mut Console,
    cmd: ReservationsCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        ReservationsCommand::List(list) => {
            let rows = util::filter(&list).apply(console.dhcp().reservations.iter());
            util::print_list(
                global,
                &rows,
                |r| ReservationRow::from(*r),
                |r| r.id.to_string(),
            )
        }

        ReservationsCommand::Create {
            hostname,
            mac,
            ip,
            description,
        } => {
            let request = CreateReservationRequest {
                hostname: hostname.unwrap_or_default(),
                mac: mac.unwrap_or_default(),
                ip: ip.unwrap_or_default(),
                description: description.unwrap_or_default(),
            };
            let result = console.execute(CoreCommand::CreateReservation(request))?;
            print_reservation(&result, global)
        }

        ReservationsCommand::Update {
            id,
            hostname,
            mac,
            ip,
            description,
        } => {
            let update = UpdateReservationRequest {
                hostname,
                mac,
                ip,
                description,
            };
            let result = console.execute(CoreCommand::UpdateReservation {
                id: util::id(id),
                update,
            })?;
            print_reservation(&result, global)
        }

        ReservationsCommand::Delete { id } => {
            let label = console
                .dhcp()
                .reservations
                .require(util::id(id))?
                .hostname
                .clone();
            if !util::confirm(&format!("Delete reservation for {label}?"), global.yes)? {
                return Ok(());
            }
            let result = console.execute(CoreCommand::DeleteReservation { id: util::id(id) })?;
            util::print_removed(&result, global)
        }
    }
}

fn handle_leases(
    console: &mut Console,
    cmd: LeasesCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = util::color(global);
    match cmd {
        LeasesCommand::List(list) => {
            let rows = util::filter(&list).apply(console.dhcp().leases.iter());
            util::print_list(global, &rows, |l| LeaseRow::new(l, color), |l| l.ip.clone())
        }

        LeasesCommand::Release { ip } => {
            let result = console.execute(CoreCommand::ReleaseLease { ip })?;
            if let CommandResult::Released(released) = result {
                util::print_list(
                    global,
                    &released,
                    |l| LeaseRow::new(l, color),
                    |l| l.ip.clone(),
                )?;
            }
            Ok(())
        }
    }
}

fn print_reservation(result: &CommandResult, global: &GlobalOpts) -> Result<(), CliError> {
    match result {
        CommandResult::Reservation(r) => {
            util::print_single(global, r, reservation_detail, |r| r.id.to_string())
        }
        _ => Ok(()),
    }
}
