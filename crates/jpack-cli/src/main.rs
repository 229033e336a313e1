//! jpack CLI: call pack functions and stream table functions/operators
//! without a host engine.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use jpack_core::config::PackConfig;
use jpack_core::schema::Frame;
use jpack_core::Value;
use jpack_operators::{HostContext, MemoryHandle, OperatorArgs, Registry, RowStream};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jpack")]
#[command(about = "Pack typed values into single text tokens and stream rows", long_about = None)]
struct Cli {
    /// JSON config file (replaces environment settings)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Malformed pack policy: error | raw
    #[arg(long, global = true)]
    malformed: Option<String>,

    /// Nested sequence ordering policy: structural | reject
    #[arg(long, global = true)]
    nested: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered functions and operators
    List,

    /// Call a scalar function and print its result
    Call {
        name: String,
        args: Vec<String>,
    },

    /// Stream a table function or operator as tab-separated rows
    Rows {
        name: String,
        args: Vec<String>,

        /// Named operator argument (repeatable)
        #[arg(long = "arg", value_name = "KEY=VALUE")]
        named: Vec<String>,

        /// Tab-separated file with a header line, served as a table named
        /// after the file stem (repeatable)
        #[arg(long = "table", value_name = "PATH")]
        tables: Vec<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = load_config(
        cli.config.as_deref(),
        cli.malformed.as_deref(),
        cli.nested.as_deref(),
    )?;
    let registry = Registry::with_config(cfg)?;

    match cli.command {
        Commands::List => {
            for entry in registry.entries() {
                let caps = entry.capabilities();
                println!("{:<14} {:<9} {}", entry.name(), caps.kind, caps.summary);
            }
        }
        Commands::Call { name, args } => {
            let value = registry.call_scalar(&name, &text_args(args))?;
            println!("{}", value);
        }
        Commands::Rows {
            name,
            args,
            named,
            tables,
        } => {
            let mut op_args = OperatorArgs {
                positional: text_args(args),
                named: BTreeMap::new(),
            };
            for kv in &named {
                let (k, v) = split_named(kv)?;
                op_args.named.insert(k, v);
            }

            let mut handle = MemoryHandle::new();
            for path in &tables {
                load_table(&mut handle, path)?;
            }

            let ctx = HostContext::new(&handle);
            let stream = registry.open_rows(&name, &op_args, &ctx)?;
            write_frames(stream, io::stdout().lock())?;
        }
    }
    Ok(())
}

/// The config file when given, otherwise the environment; command-line flags
/// override either.
fn load_config(
    path: Option<&Path>,
    malformed: Option<&str>,
    nested: Option<&str>,
) -> Result<PackConfig, Box<dyn std::error::Error>> {
    let mut cfg = match path {
        Some(p) => PackConfig::from_json_str(&fs::read_to_string(p)?)?,
        None => PackConfig::from_env(),
    };
    if let Some(m) = malformed {
        cfg.malformed = m.parse()?;
    }
    if let Some(n) = nested {
        cfg.nested = n.parse()?;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn text_args(args: Vec<String>) -> Vec<Value> {
    args.into_iter().map(Value::Text).collect()
}

fn split_named(kv: &str) -> Result<(String, String), String> {
    match kv.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => Err(format!("named argument '{}' is not KEY=VALUE", kv)),
    }
}

fn load_table(handle: &mut MemoryHandle, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("cannot derive a table name from {}", path.display()))?;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .from_path(path)?;
    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        rows.push(record?.iter().map(Value::text).collect());
    }

    tracing::debug!(table = name, rows = rows.len(), "loaded table");
    handle.insert_table(name, columns, rows);
    Ok(())
}

fn write_frames<W: Write>(
    mut stream: RowStream,
    out: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(out);
    while let Some(frame) = stream.next_frame()? {
        let fields: Vec<String> = match frame {
            Frame::Schema(columns) => columns,
            Frame::Row(row) => row.iter().map(Value::to_natural_text).collect(),
        };
        write_tsv_record(&mut wtr, &fields)?;
    }
    wtr.flush()?;
    tracing::debug!(
        operator = stream.operator(),
        rows = stream.rows_produced(),
        "rows written"
    );
    Ok(())
}

/// A record with no bytes (no fields, or one empty field) is a blank line.
/// The csv writer would print `""` for it even with quoting disabled.
fn write_tsv_record<W: Write>(
    wtr: &mut csv::Writer<W>,
    fields: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    match fields {
        [] => {}
        [only] if only.is_empty() => {}
        _ => {
            wtr.write_record(fields)?;
            return Ok(());
        }
    }
    wtr.flush()?;
    wtr.get_mut().write_all(b"\n")?;
    Ok(())
}
