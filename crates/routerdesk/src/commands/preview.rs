//! Generated configuration preview.

use routerdesk_core::{CommandPreview, Console};

use crate::cli::{GlobalOpts, PreviewArgs, PreviewSection};
use crate::error::CliError;
use crate::output;

use super::util;

fn section(console: &Console, section: PreviewSection) -> CommandPreview {
    match section {
        PreviewSection::All => console.running_config(),
        PreviewSection::Interfaces => console.interface_preview(),
        PreviewSection::Vrfs => console.vrf_preview(),
        PreviewSection::Routing => console.routing_preview(),
        PreviewSection::Vlans => console.vlan_preview(),
        PreviewSection::Dhcp => console.dhcp_preview(),
        PreviewSection::Firewall => console.firewall_preview(),
    }
}

fn render_text(preview: &CommandPreview, color: bool) -> String {
    if preview.is_empty() {
        return output::muted("(nothing configured)", color);
    }
    preview
        .to_string()
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                output::muted(line, color)
            } else {
                line.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn handle(console: &Console, args: &PreviewArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = util::color(global);
    let preview = section(console, args.section);
    let out = output::render_single(
        &global.output_format(),
        &preview,
        |p| render_text(p, color),
        |p| p.commands().collect::<Vec<_>>().join("\n"),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
