/*
 * cli.rs
 * Copyright (c) 2025 Posit, PBC
 */

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

const COMPOSE: &str = "\
services:
  traefik:
    image: traefik:v1.7
    ports:
      - \"80:80\"
      - \"443:443\"
";

fn fixture(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("yaml-path-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn yaml_path(args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_yaml-path"))
        .args(args)
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).unwrap();
        }
    }
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_path_command() {
    let file = fixture("compose.yaml", COMPOSE);
    let output = yaml_path(&["path", file.to_str().unwrap(), "--line", "6", "--col", "9"], None);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "services.traefik.ports[1]\n");
}

#[test]
fn test_path_command_reports_parse_errors() {
    let file = fixture("broken.yaml", "a: [1, 2\nb: 3\n");
    let output = yaml_path(&["path", file.to_str().unwrap(), "--line", "1"], None);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("broken.yaml"));
}

#[test]
fn test_status_command_uses_configured_prefix() {
    let file = fixture("status.yaml", COMPOSE);
    let config = fixture("settings.toml", "status_prefix = \"at \"\n");
    let output = yaml_path(
        &[
            "--config",
            config.to_str().unwrap(),
            "status",
            file.to_str().unwrap(),
            "3:5",
            "5:9",
        ],
        None,
    );
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "at services.traefik.image, services.traefik.ports[0]\n"
    );
}

#[test]
fn test_convert_from_stdin() {
    let output = yaml_path(&["convert"], Some(r#"{"data": "[1,2,3]"}"#));
    assert!(output.status.success());
    assert_eq!(stdout(&output), "data:\n- 1\n- 2\n- 3\n");
}

#[test]
fn test_convert_rejects_malformed_json() {
    let output = yaml_path(&["convert"], Some(r#"{"a": }"#));
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
