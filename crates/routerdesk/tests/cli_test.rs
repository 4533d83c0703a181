//! Integration tests for the `routerdesk` CLI binary.
//!
//! Every invocation starts from the seeded console, so these run against
//! known data without any setup beyond env isolation.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `routerdesk` binary with env isolation.
///
/// Clears all `ROUTERDESK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn routerdesk_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("routerdesk");
    cmd.env("HOME", "/tmp/routerdesk-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/routerdesk-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("ROUTERDESK_OUTPUT")
        .env_remove("ROUTERDESK_CONFIG")
        .env_remove("ROUTERDESK_DEFAULTS__OUTPUT")
        .env_remove("ROUTERDESK_DEFAULTS__COLOR")
        .env_remove("ROUTERDESK_VALIDATION__STRICT")
        .env_remove("ROUTERDESK_VALIDATION__DUPLICATES")
        .env_remove("ROUTERDESK_CONSOLE__HOSTNAME");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = routerdesk_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(
        text.contains("Usage"),
        "Expected 'Usage' in output:\n{text}"
    );
}

#[test]
fn test_help_flag() {
    routerdesk_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("simulated router")
            .and(predicate::str::contains("interfaces"))
            .and(predicate::str::contains("vrfs"))
            .and(predicate::str::contains("shell")),
    );
}

#[test]
fn test_version_flag() {
    routerdesk_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("routerdesk"));
}

#[test]
fn test_completions_bash() {
    routerdesk_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_invalid_output_format() {
    let output = routerdesk_cmd()
        .args(["-o", "xml", "vlans", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Listings ────────────────────────────────────────────────────────

#[test]
fn test_vlans_list_table() {
    routerdesk_cmd().args(["vlans", "list"]).assert().success().stdout(
        predicate::str::contains("Invitados")
            .and(predicate::str::contains("192.168.100.0/24"))
            .and(predicate::str::contains("VLAN")),
    );
}

#[test]
fn test_interfaces_list_json() {
    let output = routerdesk_cmd()
        .args(["interfaces", "list", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["name"], "GigabitEthernet0/0/1");
}

#[test]
fn test_search_narrows_listing() {
    routerdesk_cmd()
        .args(["dhcp", "leases", "list", "--search", "iphone", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("192.168.1.102\n"));
}

#[test]
fn test_command_reference_category_and_search() {
    routerdesk_cmd()
        .args([
            "commands",
            "reference",
            "-c",
            "Enrutamiento",
            "-s",
            "bgp",
            "-o",
            "plain",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("show ip bgp summary\n"));
}

#[test]
fn test_logs_filter_by_level() {
    let output = routerdesk_cmd()
        .args(["logs", "list", "--level", "error", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    for entry in parsed.as_array().unwrap() {
        assert_eq!(entry["level"], "error");
    }
}

// ── Preview / terminal / dashboard ──────────────────────────────────

#[test]
fn test_preview_routing() {
    routerdesk_cmd()
        .args(["preview", "routing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ip route 0.0.0.0 0.0.0.0 203.0.113.1 1"));
}

#[test]
fn test_commands_run_show_ip_route() {
    routerdesk_cmd()
        .args(["commands", "run", "show", "ip", "route"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Router#show ip route").and(predicate::str::contains(
                "Gateway of last resort is 203.0.113.1 to network 0.0.0.0",
            )),
        );
}

#[test]
fn test_dashboard_json() {
    let output = routerdesk_cmd()
        .args(["dashboard", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["hostname"], "Router");
    assert_eq!(parsed["interfaces_unconfigured"], 1);
}

// ── Settings, export, monitoring ────────────────────────────────────

#[test]
fn test_monitoring_interface_filter_is_exact() {
    routerdesk_cmd()
        .args(["monitoring", "interfaces", "-i", "Serial0/1/0", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Serial0/1/0\n"));

    routerdesk_cmd()
        .args(["monitoring", "interfaces", "-i", "serial0/1/0", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_monitoring_resources_show_pools() {
    routerdesk_cmd()
        .args(["monitoring", "resources"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("387 MB / 512 MB")
                .and(predicate::str::contains("Driver"))
                .and(predicate::str::contains("45.0%")),
        );
}

#[test]
fn test_vpn_configure_merges_fields() {
    let output = routerdesk_cmd()
        .args([
            "firewall", "vpn", "configure", "--enabled", "true", "--protocol", "wireguard",
            "--port", "51820", "-o", "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["enabled"], true);
    assert_eq!(parsed["port"], 51820);
    assert_eq!(parsed["authentication"], "SHA-256");
}

#[test]
fn test_vpn_port_zero_rejected() {
    let output = routerdesk_cmd()
        .args(["firewall", "vpn", "configure", "--port", "0"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("port"), "Expected field name:\n{text}");
}

#[test]
fn test_qos_settings_show_usage() {
    routerdesk_cmd()
        .args(["qos", "settings"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1000 Mbps")
                .and(predicate::str::contains("45% (450 Mbps)")),
        );
}

#[test]
fn test_qos_switch_off() {
    routerdesk_cmd()
        .args(["qos", "configure", "--enabled", "false", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("no\n"));
}

#[test]
fn test_logs_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs.json");
    routerdesk_cmd()
        .args(["logs", "export", "--level", "error", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported 2 log entries"));

    let written = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    for entry in entries {
        assert_eq!(entry["level"], "error");
    }
}

// ── Errors and exit codes ───────────────────────────────────────────

#[test]
fn test_missing_record_exits_not_found() {
    let output = routerdesk_cmd()
        .args(["vlans", "delete", "99", "-y"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("vlans list"), "Expected list hint:\n{text}");
}

#[test]
fn test_duplicate_reservation_rejected() {
    let output = routerdesk_cmd()
        .args([
            "--duplicates",
            "reject",
            "dhcp",
            "reservations",
            "create",
            "--hostname",
            "Clone",
            "--mac",
            "AA:BB:CC:DD:EE:FF",
            "--ip",
            "192.168.1.77",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6));
}

#[test]
fn test_duplicate_reservation_allowed_by_default() {
    routerdesk_cmd()
        .args([
            "dhcp",
            "reservations",
            "create",
            "--hostname",
            "Clone",
            "--mac",
            "AA:BB:CC:DD:EE:FF",
            "--ip",
            "192.168.1.77",
            "-o",
            "plain",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("4\n"));
}

#[test]
fn test_missing_required_field_exits_usage() {
    let output = routerdesk_cmd()
        .args(["vlans", "create", "--name", "Lab"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("vlan_id"), "Expected field name:\n{text}");
}

#[test]
fn test_bandwidth_above_hundred_rejected() {
    let output = routerdesk_cmd()
        .args(["qos", "bandwidth", "1", "150"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_delete_without_tty_requires_yes() {
    let output = routerdesk_cmd()
        .args(["firewall", "delete", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("--yes"), "Expected --yes hint:\n{text}");
}

// ── Shell ───────────────────────────────────────────────────────────

#[test]
fn test_shell_keeps_state_between_lines() {
    routerdesk_cmd()
        .args(["shell", "-q"])
        .write_stdin(
            "vlans create --vlan-id 77 --name 'Lab Net' --subnet 10.77.0.0/24 -o plain\n\
             vlans get 5 -o plain\n\
             exit\n\
             vlans get 1 -o plain\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::diff("77\n77\n"));
}

#[test]
fn test_shell_reports_errors_and_continues() {
    let output = routerdesk_cmd()
        .arg("shell")
        .write_stdin("vlans get 99\nfrobnicate\nvlans get 1 -o plain\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "10\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr:\n{stderr}");
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routerdesk.toml");
    routerdesk_cmd()
        .args(["config", "path", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("routerdesk.toml"));
}

#[test]
fn test_config_set_then_used_by_console() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    routerdesk_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "console.hostname", "Edge1"])
        .assert()
        .success();

    routerdesk_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hostname = \"Edge1\""));

    routerdesk_cmd()
        .arg("--config")
        .arg(&path)
        .args(["commands", "run", "show", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Edge1#show version"));
}

#[test]
fn test_config_set_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let output = routerdesk_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "console.colour", "red"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(!path.exists());
}
