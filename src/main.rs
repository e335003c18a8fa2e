use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use rbxplug::{paths, DeployParams, Deployer, PluginName, Status};

/// Copies a Lua plugin into the Roblox Studio plugins folder.
///
/// The plugin is not reloaded, do that from Studio after copying.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(flatten)]
    flags: Flags,

    /// Name of the plugin, without the .lua extension.
    #[clap(short, long, default_value = rbxplug::deploy::DEFAULT_PLUGIN_NAME)]
    name: PluginName,
}

#[derive(Parser, Debug)]
pub struct Flags {
    /// Directory containing the plugin source. Defaults to the current directory.
    #[clap(long)]
    source_dir: Option<PathBuf>,

    /// Home directory the plugins folder is resolved from.
    #[clap(long)]
    home: Option<PathBuf>,

    /// Plugins folder to copy into. Takes precedence over --home.
    #[clap(long)]
    plugins_dir: Option<PathBuf>,

    /// Disable log output. Status lines are still printed.
    #[clap(short, long)]
    quiet: bool,

    /// A level of verbosity, and can be used multiple times
    ///
    /// Level 0 - Warnings (Default)
    ///
    /// Level 1 - Info
    ///
    /// Level 2 - Debug
    ///
    /// Level 3 - Trace
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(&args.flags);

    let params = deploy_params(&args.flags)?;
    let deployer = Deployer::new(args.name, params);
    log::debug!(
        "deploying {} -> {}",
        deployer.source().display(),
        deployer.destination().display()
    );

    match deployer.deploy(print_status) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to copy plugin '{}'", deployer.name());
            Err(e).with_context(|| format!("failed to copy {}", deployer.name().file_name()))
        }
    }
}

fn init_logger(flags: &Flags) {
    if flags.quiet {
        return;
    }
    let log_level = match flags.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();
}

fn deploy_params(flags: &Flags) -> anyhow::Result<DeployParams> {
    let cwd = paths::current_working_directory()
        .context("Failed to obtain current working directory")?;
    let source_dir = match flags.source_dir {
        Some(ref path) => paths::weakly_canonical(path, &cwd),
        None => cwd.clone(),
    };

    if let Some(ref plugins_dir) = flags.plugins_dir {
        return Ok(DeployParams {
            source_dir,
            plugins_dir: paths::weakly_canonical(plugins_dir, &cwd),
        });
    }

    let home = match flags.home {
        Some(ref path) => paths::weakly_canonical(path, &cwd),
        None => paths::home_directory()?,
    };
    log::debug!("home directory : {}", home.display());
    Ok(DeployParams::from_home(source_dir, home))
}

fn print_status(status: Status<'_>) {
    match status {
        Status::Copying { .. } => println!("{}", status),
        Status::Copied { .. } => println!(
            "{} {}",
            Status::SUCCESS.green().bold(),
            Status::RELOAD_REMINDER
        ),
    }
}
