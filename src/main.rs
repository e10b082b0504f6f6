use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context as _};
use clap::Parser;
use directories::ProjectDirs;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use trellis::cli::{Cli, Sub};
use trellis::replay::{populate, run_script};
use trellis_config::Config;

const DEFAULT_LOG_FILTER: &str = "trellis=debug,trellis_config=debug";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let directives = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    let config = load_config(cli.config)?;

    match cli.subcommand {
        Sub::Validate => {
            info!("config is valid");
            println!("config is valid");
        }
        Sub::Replay {
            windows,
            floating,
            json,
            script,
        } => {
            let script = std::fs::read_to_string(&script)
                .with_context(|| format!("error reading {script:?}"))?;

            let mut dispatcher = populate(&config, windows, floating);
            let outcomes = run_script(&mut dispatcher, &script);
            debug!("ran {} commands", outcomes.len());

            let tree = dispatcher.tree();
            if json {
                let tree = serde_json::to_string_pretty(&tree.layout_tree())
                    .context("error serializing the tree")?;
                println!("{tree}");
            } else {
                print!("{}", tree.debug_tree());
            }
        }
    }

    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "trellis")?;
    Some(dirs.config_dir().join("config.kdl"))
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    // An explicit path must exist; the default one may be missing.
    let path = match path {
        Some(path) => path,
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                warn!("no config file found, using the default config");
                return Ok(Config::load_default());
            }
        },
    };

    Config::load(&path).map_err(|err| anyhow!("{err:?}"))
}
