//! QoS command handlers (switch, traffic classes, application rules, device limits).

use tabled::Tabled;

use routerdesk_core::{
    ApplicationRule, Command as CoreCommand, CommandResult, Console, DeviceLimit, Priority,
    QosSettings, TrafficClass, UpdateDeviceLimitRequest, UpdateQosSettingsRequest,
};

use crate::cli::{GlobalOpts, PriorityArg, QosArgs, QosCommand};
use crate::error::CliError;
use crate::output;

use super::util;

fn map_priority(p: PriorityArg) -> Priority {
    match p {
        PriorityArg::High => Priority::High,
        PriorityArg::Medium => Priority::Medium,
        PriorityArg::Low => Priority::Low,
    }
}

#[derive(Tabled)]
struct ClassRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Class")]
    name: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Bandwidth")]
    bandwidth: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
}

impl From<&TrafficClass> for ClassRow {
    fn from(c: &TrafficClass) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            priority: c.priority.to_string(),
            bandwidth: format!("{}%", c.bandwidth_percent),
            protocol: output::or_dash(&c.protocol),
        }
    }
}

fn class_detail(c: &TrafficClass) -> String {
    output::detail(&[
        ("ID", c.id.to_string()),
        ("Class", c.name.clone()),
        ("Priority", c.priority.to_string()),
        ("Bandwidth", format!("{}%", c.bandwidth_percent)),
        ("Protocol", output::or_dash(&c.protocol)),
    ])
}

#[derive(Tabled)]
struct AppRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Application")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Bandwidth")]
    bandwidth: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl AppRow {
    fn new(a: &ApplicationRule, color: bool) -> Self {
        Self {
            id: a.id.to_string(),
            name: a.name.clone(),
            kind: a.kind.clone(),
            priority: a.priority.to_string(),
            bandwidth: a.bandwidth.clone(),
            status: output::status(&a.status.to_string(), a.status.is_active(), color),
        }
    }
}

fn app_detail(a: &ApplicationRule) -> String {
    output::detail(&[
        ("ID", a.id.to_string()),
        ("Application", a.name.clone()),
        ("Type", a.kind.clone()),
        ("Priority", a.priority.to_string()),
        ("Bandwidth", a.bandwidth.clone()),
        ("Status", a.status.to_string()),
    ])
}

#[derive(Tabled)]
struct LimitRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Up")]
    upload: String,
    #[tabled(rename = "Down")]
    download: String,
    #[tabled(rename = "Priority")]
    priority: String,
}

impl From<&DeviceLimit> for LimitRow {
    fn from(d: &DeviceLimit) -> Self {
        Self {
            id: d.id.to_string(),
            device: d.device.clone(),
            ip: d.ip.clone(),
            upload: format!("{} Mbps", d.upload_mbps),
            download: format!("{} Mbps", d.download_mbps),
            priority: d.priority.to_string(),
        }
    }
}

fn limit_detail(d: &DeviceLimit) -> String {
    output::detail(&[
        ("ID", d.id.to_string()),
        ("Device", d.device.clone()),
        ("IP", d.ip.clone()),
        ("Upload", format!("{} Mbps", d.upload_mbps)),
        ("Download", format!("{} Mbps", d.download_mbps)),
        ("Priority", d.priority.to_string()),
    ])
}

fn settings_detail(q: &QosSettings) -> String {
    let mut pairs = vec![
        ("Enabled", output::yes_no(q.enabled)),
        ("Total bandwidth", format!("{} Mbps", q.total_bandwidth_mbps)),
    ];
    for priority in [Priority::High, Priority::Medium, Priority::Low] {
        let label = match priority {
            Priority::High => "High usage",
            Priority::Medium => "Medium usage",
            Priority::Low => "Low usage",
        };
        pairs.push((
            label,
            format!("{}% ({} Mbps)", q.usage.get(priority), q.used_mbps(priority)),
        ));
    }
    output::detail(&pairs)
}

pub fn handle(console: &mut Console, args: QosArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = util::color(global);
    match args.command {
        QosCommand::Settings => {
            util::print_single(global, &console.qos().settings, settings_detail, |q| {
                output::yes_no(q.enabled)
            })
        }

        QosCommand::Configure {
            enabled,
            total_bandwidth,
        } => {
            let update = UpdateQosSettingsRequest {
                enabled,
                total_bandwidth_mbps: total_bandwidth,
            };
            let result = console.execute(CoreCommand::UpdateQosSettings(update))?;
            if let CommandResult::QosSettings(settings) = result {
                util::print_single(global, &settings, settings_detail, |q| {
                    output::yes_no(q.enabled)
                })?;
            }
            Ok(())
        }

        QosCommand::Classes(list) => {
            let rows = util::filter(&list).apply(console.qos().classes.iter());
            util::print_list(global, &rows, |c| ClassRow::from(*c), |c| c.name.clone())
        }

        QosCommand::Bandwidth { id, percent } => {
            let result = console.execute(CoreCommand::SetTrafficClassBandwidth {
                id: util::id(id),
                percent,
            })?;
            if let CommandResult::TrafficClass(class) = result {
                util::print_single(global, &class, class_detail, |c| {
                    c.bandwidth_percent.to_string()
                })?;
            }
            let allocated = console.qos().allocated_percent();
            if allocated > 100 {
                tracing::warn!(allocated, "traffic classes are oversubscribed");
            }
            Ok(())
        }

        QosCommand::Apps(list) => {
            let rows = util::filter(&list).apply(console.qos().applications.iter());
            util::print_list(global, &rows, |a| AppRow::new(a, color), |a| a.name.clone())
        }

        QosCommand::ToggleApp { id } => {
            let result = console.execute(CoreCommand::ToggleApplicationRule { id: util::id(id) })?;
            if let CommandResult::ApplicationRule(app) = result {
                util::print_single(global, &app, app_detail, |a| a.status.to_string())?;
            }
            Ok(())
        }

        QosCommand::Limits(list) => {
            let rows = util::filter(&list).apply(console.qos().limits.iter());
            util::print_list(global, &rows, |d| LimitRow::from(*d), |d| d.ip.clone())
        }

        QosCommand::Limit {
            id,
            upload,
            download,
            priority,
        } => {
            let update = UpdateDeviceLimitRequest {
                upload_mbps: upload,
                download_mbps: download,
                priority: priority.map(map_priority),
            };
            let result = console.execute(CoreCommand::UpdateDeviceLimit {
                id: util::id(id),
                update,
            })?;
            if let CommandResult::DeviceLimit(limit) = result {
                util::print_single(global, &limit, limit_detail, |d| d.ip.clone())?;
            }
            Ok(())
        }
    }
}
