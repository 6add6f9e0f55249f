//! Pandex CLI
//!
//! Command-line interface for Pandex operations:
//! - Serve a dashboard manifest
//! - Render a manifest to a static HTML file
//! - Reshape a CSV file into tidy form
//! - Inspect a manifest's grid layout
//! - Generate a config file

use clap::{Parser, Subcommand};
use pandex::config::{generate_default_config, Config};
use pandex::dashboard::{Dashboard, DashboardManifest};
use pandex::logging::init_tracing;
use pandex::server::ServeOptions;
use pandex::table::{read_csv, reshape, write_csv, CsvOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pandex-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Declarative dashboards over CSV files")]
#[command(long_about = "Pandex turns a TOML manifest of CSV-backed charts into a served web page.\nRender it to a file, inspect its layout, or reshape the data it reads.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for `plan` (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve a dashboard manifest
    Serve {
        /// Path to the manifest
        manifest: PathBuf,
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Show error details (takes precedence over --alternate-server)
        #[arg(long)]
        debug: bool,
        /// Production mode: request timeouts and terse error pages
        #[arg(long)]
        alternate_server: bool,
    },

    /// Render a manifest to HTML once
    Render {
        /// Path to the manifest
        manifest: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Reshape a CSV file into (index, variable, value) rows
    Tidy {
        /// Path to the CSV file
        path: PathBuf,
        /// Column to use as the row index
        #[arg(long)]
        index_column: Option<String>,
        /// Field delimiter of the input file
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show how a manifest's rows are laid out on the grid
    Plan {
        /// Path to the manifest
        manifest: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::from_env(),
    };
    init_tracing(&config.logging, None)?;

    match cli.command {
        Commands::Serve {
            manifest,
            host,
            port,
            debug,
            alternate_server,
        } => {
            let dashboard = load_dashboard(&manifest, &config)?;

            let mut options = ServeOptions::from(&config.server);
            if let Some(host) = host {
                options.host = host;
            }
            if let Some(port) = port {
                options.port = port;
            }
            let debug = debug || options.debug;
            let alternate_server = alternate_server || options.alternate_server;
            let options = options.debug(debug).alternate_server(alternate_server);

            dashboard.run(options).await?;
        }

        Commands::Render { manifest, output } => {
            let dashboard = load_dashboard(&manifest, &config)?;
            let html = dashboard.render_page()?;

            match output {
                Some(path) => {
                    write_file(&path, html.as_bytes())?;
                    println!(
                        "Rendered {} charts from {:?} to {:?}",
                        dashboard.chart_count(),
                        manifest,
                        path
                    );
                }
                None => {
                    print!("{}", html);
                }
            }
        }

        Commands::Tidy {
            path,
            index_column,
            delimiter,
            output,
        } => {
            if !delimiter.is_ascii() {
                anyhow::bail!("Delimiter must be a single ASCII character, got {:?}", delimiter);
            }
            let mut options = CsvOptions::default().with_delimiter(delimiter as u8);
            if let Some(column) = index_column {
                options = options.with_index_column(column);
            }

            let table = read_csv(&path, &options)?;
            let tidy = reshape(&table)?;

            match output {
                Some(out) => {
                    let mut buffer = Vec::new();
                    write_csv(&tidy, &mut buffer, None)?;
                    write_file(&out, &buffer)?;
                    println!("Wrote {} tidy rows to {:?}", tidy.row_count(), out);
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut handle = stdout.lock();
                    write_csv(&tidy, &mut handle, None)?;
                    handle.flush()?;
                }
            }
        }

        Commands::Plan { manifest } => {
            let dashboard = load_dashboard(&manifest, &config)?;
            let snapshot = dashboard.layout_snapshot()?;

            match cli.format.as_str() {
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&snapshot)?);
                }
                _ => {
                    println!("{}", snapshot.title);
                    println!(
                        "Theme: {}  Reload: {}",
                        if snapshot.dark_theme { "dark" } else { "light" },
                        snapshot.reload_interval
                    );
                    println!();
                    print_plan(&snapshot.rows);
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    write_file(&path, config.as_bytes())?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Build a manifest's dashboard; settings it leaves out come from `config`
fn load_dashboard(manifest: &Path, config: &Config) -> anyhow::Result<Dashboard> {
    let dashboard = DashboardManifest::load_dashboard(manifest, config)?;
    tracing::debug!(
        manifest = %manifest.display(),
        charts = dashboard.chart_count(),
        "Loaded manifest"
    );
    Ok(dashboard)
}

fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    // Create parent directory if needed
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)
}

fn print_plan(rows: &[pandex::layout::RowPlan]) {
    if rows.is_empty() {
        println!("No rows");
        return;
    }

    // Header
    println!("{:<4} | {:<28} | {:>4} | {:<24}", "Row", "Title", "Span", "Class");
    println!("{}", "-".repeat(70));

    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            println!("{}", "-".repeat(70));
        }
        for item in &row.items {
            let title = if item.id.is_some() {
                item.title.clone()
            } else {
                format!("[{}]", item.title)
            };
            let span = if item.span_overridden {
                format!("{}*", item.span)
            } else {
                item.span.to_string()
            };
            println!(
                "{:<4} | {:<28} | {:>4} | {:<24}",
                i + 1,
                truncate(&title, 28),
                span,
                item.class_name
            );
        }
        println!("{:<4} | {:<28} | {:>4} |", "", "(units used)", row.used_units());
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
