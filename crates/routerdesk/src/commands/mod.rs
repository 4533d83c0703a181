//! Command dispatch: bridges CLI args -> core Commands -> output formatting.

pub mod config_cmd;
pub mod dashboard;
pub mod dhcp;
pub mod firewall;
pub mod interfaces;
pub mod logs;
pub mod monitoring;
pub mod preview;
pub mod qos;
pub mod routing;
pub mod shell;
pub mod terminal;
pub mod util;
pub mod vlans;
pub mod vrfs;

use routerdesk_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a console-bound command to the appropriate handler.
///
/// `shell`, `config` and `completions` never reach a console; they are
/// rejected here so a shell line cannot nest them.
pub fn dispatch(cmd: Command, console: &mut Console, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Interfaces(args) => interfaces::handle(console, args, global),
        Command::Dhcp(args) => dhcp::handle(console, args, global),
        Command::Routing(args) => routing::handle(console, args, global),
        Command::Vlans(args) => vlans::handle(console, args, global),
        Command::Vrfs(args) => vrfs::handle(console, args, global),
        Command::Firewall(args) => firewall::handle(console, args, global),
        Command::Qos(args) => qos::handle(console, args, global),
        Command::Logs(args) => logs::handle(console, args, global),
        Command::Monitoring(args) => monitoring::handle(console, args, global),
        Command::Commands(args) => terminal::handle(console, args, global),
        Command::Preview(args) => preview::handle(console, &args, global),
        Command::Dashboard => dashboard::handle(console, global),
        Command::Shell => Err(CliError::NotInShell {
            command: "shell".into(),
        }),
        Command::Config(_) => Err(CliError::NotInShell {
            command: "config".into(),
        }),
        Command::Completions(_) => Err(CliError::NotInShell {
            command: "completions".into(),
        }),
    }
}
