//! hostinv CLI - Ansible dynamic inventory script
//!
//! ```bash
//! hostinv --list                          # full inventory from ./hosts_data.xlsx
//! hostinv --host db1                      # variables of one host
//! hostinv registry.csv --list             # another source
//! SERVER_ENVIRONMENT=Production SERVER_TYPE=Database hostinv
//! ```
//!
//! Ansible passes `--list` or `--host <name>`; the JSON goes to stdout and
//! logs go to stderr.

use clap::{ArgAction, Parser};
use hostinv::{
    generate_inventory, render_host_json, render_json, InventoryFilter, InventoryOptions,
    InventoryResult, DEFAULT_SOURCE,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const ENV_SERVER_ENVIRONMENT: &str = "SERVER_ENVIRONMENT";
const ENV_SERVER_TYPE: &str = "SERVER_TYPE";

#[derive(Parser)]
#[command(name = "hostinv", version)]
#[command(about = "Ansible dynamic inventory from a spreadsheet host registry", long_about = None)]
struct Cli {
    /// Host registry (.xlsx, .xlsm, .xlsb, .xls, .ods or .csv)
    #[arg(env = "HOSTINV_SOURCE", default_value = DEFAULT_SOURCE)]
    source: PathBuf,

    /// Print the whole inventory (default)
    ///
    /// Ansible always passes `--list`; the inventory is printed whenever
    /// `--host` is absent, so the flag itself carries no extra behavior.
    #[arg(long, conflicts_with = "host")]
    list: bool,

    /// Print the variables of a single host
    #[arg(long, value_name = "NAME")]
    host: Option<String>,

    /// Only include hosts of this server environment
    #[arg(short, long, env = ENV_SERVER_ENVIRONMENT)]
    environment: Option<String>,

    /// Only include hosts of this server type
    #[arg(short = 't', long = "type", env = ENV_SERVER_TYPE, value_name = "TYPE")]
    server_type: Option<String>,

    /// Worksheet to read (default: first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> InventoryOptions {
        InventoryOptions {
            filter: InventoryFilter::new(
                set_or_env(&self.environment, ENV_SERVER_ENVIRONMENT),
                set_or_env(&self.server_type, ENV_SERVER_TYPE),
            ),
            sheet: self.sheet.clone(),
        }
    }
}

/// Value from clap, or the raw variable when it is set but empty.
///
/// clap skips empty environment values, but `SERVER_TYPE=` is still a
/// filter on the empty string.
fn set_or_env(value: &Option<String>, name: &str) -> Option<String> {
    value.clone().or_else(|| {
        std::env::var_os(name).map(|raw| raw.to_string_lossy().into_owned())
    })
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> InventoryResult<()> {
    let options = cli.options();
    debug!(list = cli.list, host = ?cli.host, filter = %options.filter, "inventory mode");

    let inventory = generate_inventory(&cli.source, &options)?;

    let json = match cli.host.as_deref() {
        Some(host) => render_host_json(&inventory, host)?,
        None => render_json(&inventory)?,
    };

    write_output(&json, cli.output.as_deref())
}

fn write_output(content: &str, path: Option<&Path>) -> InventoryResult<()> {
    match path {
        Some(p) => {
            fs::write(p, format!("{content}\n"))?;
            info!(path = %p.display(), "inventory written");
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
