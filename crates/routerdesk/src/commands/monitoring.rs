//! Monitoring command handlers: interface counters and system resources.

use tabled::Tabled;

use routerdesk_core::{
    Command as CoreCommand, CommandResult, Console, InterfaceStats, LinkStatus, Permille,
    SystemResources,
};

use crate::cli::{GlobalOpts, MonitoringArgs, MonitoringCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "In (bytes)")]
    in_octets: String,
    #[tabled(rename = "Out (bytes)")]
    out_octets: String,
    #[tabled(rename = "Errors")]
    errors: String,
    #[tabled(rename = "Util")]
    utilization: String,
    #[tabled(rename = "Bandwidth")]
    bandwidth: String,
}

impl StatsRow {
    fn new(s: &InterfaceStats, color: bool) -> Self {
        let errors = s.total_errors();
        Self {
            interface: s.interface.clone(),
            status: output::status(&s.status.to_string(), s.status == LinkStatus::Up, color),
            in_octets: s.in_octets.to_string(),
            out_octets: s.out_octets.to_string(),
            errors: output::status(&errors.to_string(), errors == 0, color),
            utilization: format!("{}%", s.utilization),
            bandwidth: s.bandwidth.clone(),
        }
    }
}

fn gauge(usage: Permille, warn_at: u16, color: bool) -> String {
    output::status(&usage.to_string(), usage.percent() < warn_at, color)
}

fn resources_detail(r: &SystemResources, color: bool) -> String {
    let mut pairs = vec![
        ("Sampled", r.sampled_at.clone()),
        ("CPU", gauge(r.cpu.usage, 80, color)),
    ];
    let processes: Vec<String> = r
        .cpu
        .processes
        .iter()
        .map(|p| format!("{} {}", p.name, p.cpu))
        .collect();
    pairs.push(("Top processes", output::or_dash(&processes.join(", "))));
    pairs.push((
        "Memory",
        format!(
            "{} ({})",
            r.memory.total,
            gauge(r.memory.total.usage(), 90, color)
        ),
    ));
    for pool in &r.memory.pools {
        pairs.push((
            pool.name.as_str(),
            format!(
                "{} ({})",
                pool.capacity,
                gauge(pool.capacity.usage(), 100, color)
            ),
        ));
    }
    pairs.push((
        "Flash",
        format!(
            "{} ({})",
            r.storage.flash,
            gauge(r.storage.flash.usage(), 90, color)
        ),
    ));
    pairs.push((
        "NVRAM",
        format!(
            "{} ({})",
            r.storage.nvram,
            gauge(r.storage.nvram.usage(), 90, color)
        ),
    ));
    output::detail(&pairs)
}

fn warn_oversubscribed(r: &SystemResources) {
    for pool in r.oversubscribed_pools() {
        tracing::warn!(
            pool = %pool.name,
            usage = %pool.capacity.usage(),
            "memory pool is oversubscribed"
        );
    }
}

pub fn handle(
    console: &mut Console,
    args: MonitoringArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = util::color(global);
    match args.command {
        MonitoringCommand::Interfaces { interface } => {
            let rows = console.monitoring().stats_for(interface.as_deref());
            util::print_list(
                global,
                &rows,
                |s| StatsRow::new(s, color),
                |s| s.interface.clone(),
            )
        }

        MonitoringCommand::Resources => {
            let resources = &console.monitoring().resources;
            warn_oversubscribed(resources);
            util::print_single(
                global,
                resources,
                |r| resources_detail(r, color),
                |r| r.sampled_at.clone(),
            )
        }

        MonitoringCommand::Refresh => {
            let result = console.execute(CoreCommand::RefreshMonitoring)?;
            if let CommandResult::Monitoring(resources) = result {
                util::print_single(
                    global,
                    &resources,
                    |r| resources_detail(r, color),
                    |r| r.sampled_at.clone(),
                )?;
            }
            Ok(())
        }
    }
}
