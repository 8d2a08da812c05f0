use anyhow::{Context, Result};
use clap::Parser;
use sqlscript::core::LauncherConfig;
use sqlscript::Launcher;
use std::io;
use std::path::PathBuf;

// --- CLI Configuration ---
#[derive(Parser, Debug)]
#[clap(author, version, about = "Runs a file of SQL statements against an engine session", long_about = None)]
struct Cli {
    /// Script of `;`-separated SQL statements.
    #[clap(long)]
    sql: Option<PathBuf>,
    /// Hive metastore configuration directory; registers `hive_catalog` at startup.
    #[clap(long = "hive-conf")]
    hive_conf: Option<PathBuf>,
    /// Hive version string, only used with --hive-conf. Defaults to 1.1.0.
    #[clap(long = "hive-version")]
    hive_version: Option<String>,
    /// TOML file with the same settings. Flags take precedence.
    #[clap(long)]
    config: Option<PathBuf>,
    /// Do not echo statements before running them.
    #[clap(long)]
    quiet: bool,
    /// Print the run summary as JSON when the script completes.
    #[clap(long = "summary-json")]
    summary_json: bool,
}

impl Cli {
    fn into_config(self) -> Result<LauncherConfig> {
        let file_config = LauncherConfig::load_or_default(self.config.as_deref())
            .context("Failed to load configuration")?;

        let mut builder = file_config.to_builder();
        if let Some(sql) = self.sql {
            builder = builder.sql(sql);
        }
        if let Some(hive_conf) = self.hive_conf {
            builder = builder.hive_conf(hive_conf);
        }
        if let Some(hive_version) = self.hive_version {
            builder = builder.hive_version(hive_version);
        }
        if self.quiet {
            builder = builder.echo(false);
        }
        builder.build().context("Invalid configuration")
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let summary_json = cli.summary_json;
    let config = cli.into_config()?;
    let script = config.script_path()?.display().to_string();

    let mut launcher = Launcher::local(config);
    let summary = launcher
        .run(io::stdout().lock())
        .with_context(|| format!("Failed to run sql script {}", script))?;

    if summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
