use assert_cmd::{assert::Assert, prelude::*};
use std::{
    path::{Path, PathBuf},
    process::Command,
};
use tempfile::TempDir;

const BIN_NAME: &str = "rbxplug";
const PLUGIN_FILE_NAME: &str = "MtObjectBrowser.lua";
const PLUGIN_CONTENTS: &str = "local toolbar = plugin:CreateToolbar(\"MtObjectBrowser\")\n";

fn plugins_dir(home: &Path) -> PathBuf {
    home.join("AppData/Local/Roblox/Plugins")
}

fn prepare_command(dir: &TempDir, home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).unwrap();
    cmd.current_dir(dir.path());
    cmd.env("HOME", home.path());
    cmd.env("USERPROFILE", home.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_command(dir: &TempDir, home: &TempDir, args: &str) -> Assert {
    let mut c = prepare_command(dir, home);
    c.args(args.split_whitespace());
    c.assert()
}

fn prepare_dirs() -> (TempDir, TempDir) {
    let dir = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    std::fs::write(dir.path().join(PLUGIN_FILE_NAME), PLUGIN_CONTENTS).unwrap();
    std::fs::create_dir_all(plugins_dir(home.path())).unwrap();
    (dir, home)
}

fn stdout_lines(assert: &Assert) -> Vec<String> {
    String::from_utf8_lossy(&assert.get_output().stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_cli_deploy_default() {
    let (dir, home) = prepare_dirs();

    let assert = run_command(&dir, &home, "").success().code(0);

    let destination = plugins_dir(home.path()).join(PLUGIN_FILE_NAME);
    assert_eq!(
        PLUGIN_CONTENTS,
        std::fs::read_to_string(destination).unwrap()
    );

    let lines = stdout_lines(&assert);
    assert_eq!(2, lines.len());
    assert!(lines[0].starts_with("Copying MtObjectBrowser.lua to "));
    assert!(lines[0].ends_with(&format!("Plugins{}", std::path::MAIN_SEPARATOR)));
    assert!(lines[1].contains("Reload the plugin in roblox studio"));
}

#[test]
fn test_cli_deploy_overwrites() {
    let (dir, home) = prepare_dirs();
    let destination = plugins_dir(home.path()).join(PLUGIN_FILE_NAME);
    std::fs::write(&destination, "print('stale')\n").unwrap();

    run_command(&dir, &home, "").success();

    assert_eq!(
        PLUGIN_CONTENTS,
        std::fs::read_to_string(destination).unwrap()
    );
}

#[test]
fn test_cli_missing_source() {
    let (dir, home) = prepare_dirs();
    std::fs::remove_file(dir.path().join(PLUGIN_FILE_NAME)).unwrap();

    run_command(&dir, &home, "").failure();

    let entries = std::fs::read_dir(plugins_dir(home.path())).unwrap().count();
    assert_eq!(0, entries);
}

#[test]
fn test_cli_missing_plugins_dir() {
    let dir = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    std::fs::write(dir.path().join(PLUGIN_FILE_NAME), PLUGIN_CONTENTS).unwrap();

    run_command(&dir, &home, "").failure();

    assert!(!plugins_dir(home.path()).exists());
    assert_eq!(
        PLUGIN_CONTENTS,
        std::fs::read_to_string(dir.path().join(PLUGIN_FILE_NAME)).unwrap()
    );
}

#[test]
fn test_cli_name_and_source_dir() {
    let (dir, home) = prepare_dirs();
    std::fs::create_dir(dir.path().join("build")).unwrap();
    std::fs::write(dir.path().join("build/Inspector.lua"), "return {}\n").unwrap();

    let assert = run_command(&dir, &home, "--name Inspector --source-dir build").success();

    let destination = plugins_dir(home.path()).join("Inspector.lua");
    assert_eq!("return {}\n", std::fs::read_to_string(destination).unwrap());
    assert!(stdout_lines(&assert)[0].starts_with("Copying Inspector.lua to "));
}

#[test]
fn test_cli_plugins_dir_override() {
    let (dir, home) = prepare_dirs();
    std::fs::create_dir(dir.path().join("studio")).unwrap();

    run_command(&dir, &home, "--plugins-dir studio").success();

    assert!(dir.path().join("studio").join(PLUGIN_FILE_NAME).is_file());
    assert!(!plugins_dir(home.path()).join(PLUGIN_FILE_NAME).exists());
}

#[test]
fn test_cli_home_override() {
    let (dir, home) = prepare_dirs();
    let other_home = TempDir::new().unwrap();
    std::fs::create_dir_all(plugins_dir(other_home.path())).unwrap();

    let mut cmd = prepare_command(&dir, &home);
    cmd.arg("--home").arg(other_home.path());
    cmd.assert().success();

    assert!(plugins_dir(other_home.path()).join(PLUGIN_FILE_NAME).is_file());
    assert!(!plugins_dir(home.path()).join(PLUGIN_FILE_NAME).exists());
}

#[test]
fn test_cli_invalid_name() {
    let (dir, home) = prepare_dirs();

    run_command(&dir, &home, "--name ../escape").failure().code(2);
    run_command(&dir, &home, "--name MtObjectBrowser.lua")
        .failure()
        .code(2);
}

#[test]
fn test_cli_plugins_dir_is_source_dir() {
    let (dir, home) = prepare_dirs();

    run_command(&dir, &home, "--plugins-dir .").failure().code(1);

    assert_eq!(
        PLUGIN_CONTENTS,
        std::fs::read_to_string(dir.path().join(PLUGIN_FILE_NAME)).unwrap()
    );
}
