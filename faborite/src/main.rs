//! Faborite - command-line extensions and interactive REPL
//!
//! This is the main entry point for the Faborite CLI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use faborite_core::config::{CONFIG_FILE_NAME, ConfigLoader, FaboriteConfig};
use faborite_plugin::{CommandArgs, PluginLoader, PluginManager};
use faborite_repl::{EditorSource, Repl, ReplConfig, StdinSource};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Faborite - extensible command-line tooling
#[derive(Parser)]
#[command(name = "faborite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Plugin directory (overrides the configuration)
    #[arg(long, global = true)]
    plugin_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive REPL
    Repl,

    /// Manage plugins
    Plugin {
        #[command(subcommand)]
        action: PluginAction,
    },

    /// Run a plugin command
    Run {
        /// Command name
        name: String,

        /// Positional arguments
        args: Vec<String>,

        /// Named argument, may be repeated
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        set: Vec<(String, String)>,
    },

    /// Any other word is looked up as a plugin command
    #[command(external_subcommand)]
    External(Vec<String>),
}

#[derive(Subcommand)]
enum PluginAction {
    /// Load plugins and list the registered commands
    List,
    /// Copy a plugin manifest into the plugin directory
    Install {
        /// Path to the manifest file
        path: PathBuf,
    },
    /// Print the plugin directory
    Dir,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(cli.verbose, &config.logging.level);

    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Repl) => run_repl(&config),

        Some(Commands::Plugin { action }) => {
            let mut manager = plugin_manager(&config, cli.plugin_dir)?;
            match action {
                PluginAction::List => {
                    let report = manager.load_all()?;
                    tracing::info!(
                        "🔌 {} loaded, {} skipped, {} failed",
                        report.loaded.len(),
                        report.skipped.len(),
                        report.failed.len()
                    );
                    for name in manager.list_registered() {
                        println!("{}", name);
                    }
                }
                PluginAction::Install { path } => {
                    let dest = manager.install(&path)?;
                    println!("Installed plugin to {}", dest.display());
                }
                PluginAction::Dir => println!("{}", manager.plugin_dir().display()),
            }
            Ok(())
        }

        Some(Commands::Run { name, args, set }) => {
            let mut args = CommandArgs::positional(args);
            args.named.extend(set);
            execute(&config, cli.plugin_dir, &name, &args)
        }

        Some(Commands::External(argv)) => {
            let Some((name, rest)) = argv.split_first() else {
                anyhow::bail!("missing command name");
            };
            let args = CommandArgs::positional(rest.iter().cloned());
            execute(&config, cli.plugin_dir, name, &args)
        }

        None => {
            let mut manager = plugin_manager(&config, cli.plugin_dir)?;
            manager.load_all()?;
            println!("Loaded plugins: {:?}", manager.list_registered());
            Ok(())
        }
    }
}

/// Initialize tracing; `RUST_LOG` wins, then `--verbose`, then the config
fn init_tracing(verbose: bool, level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { level })
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Load the explicit config file, or `<root>/config.toml` when a home
/// directory is available
fn load_config(explicit: Option<&Path>) -> anyhow::Result<FaboriteConfig> {
    if let Some(path) = explicit {
        return Ok(ConfigLoader::load(path)?);
    }
    load_default_config(faborite_core::default_root().ok().as_deref())
}

fn load_default_config(root: Option<&Path>) -> anyhow::Result<FaboriteConfig> {
    match root {
        Some(root) => Ok(ConfigLoader::load_or_default(root.join(CONFIG_FILE_NAME))?),
        None => Ok(FaboriteConfig::default()),
    }
}

fn plugin_manager(
    config: &FaboriteConfig,
    plugin_dir: Option<PathBuf>,
) -> anyhow::Result<PluginManager> {
    let dir = match plugin_dir {
        Some(dir) => dir,
        None => config.plugins.resolve_dir(&faborite_core::default_root()?),
    };
    tracing::debug!("Using plugin directory {}", dir.display());
    Ok(PluginManager::with_loader(PluginLoader::new(
        dir,
        config.plugins.extension.clone(),
    )))
}

fn execute(
    config: &FaboriteConfig,
    plugin_dir: Option<PathBuf>,
    name: &str,
    args: &CommandArgs,
) -> anyhow::Result<()> {
    let mut manager = plugin_manager(config, plugin_dir)?;
    manager.load_all()?;

    if let Some(output) = manager.execute(name, args)? {
        println!("{}", output);
    }
    Ok(())
}

fn run_repl(config: &FaboriteConfig) -> anyhow::Result<()> {
    let repl_config = ReplConfig::from(&config.repl);
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();

    let reason = if std::io::stdin().is_terminal() {
        let source = EditorSource::new().context("Failed to start line editor")?;
        Repl::new(source, repl_config).run(&mut out, &mut err)?
    } else {
        Repl::new(StdinSource::stdio(), repl_config).run(&mut out, &mut err)?
    };

    tracing::debug!("REPL finished: {:?}", reason);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_without_home() {
        let config = load_default_config(None).unwrap();
        assert_eq!(config, FaboriteConfig::default());
    }

    #[test]
    fn test_default_config_from_root() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join(CONFIG_FILE_NAME), "[repl]\nbanner = false\n").unwrap();

        let config = load_default_config(Some(root.path())).unwrap();
        assert!(!config.repl.banner);
    }

    #[test]
    fn test_explicit_plugin_dir_needs_no_home() {
        let dir = tempfile::tempdir().unwrap();
        let manager =
            plugin_manager(&FaboriteConfig::default(), Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(manager.plugin_dir(), dir.path());
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("format=json").unwrap(),
            ("format".to_string(), "json".to_string())
        );
        assert_eq!(parse_key_val("empty=").unwrap().1, "");
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }
}
