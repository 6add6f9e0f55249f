//! Pandex Demo Dashboard
//!
//! Run with: cargo run --bin pandex -- --dark-theme
//!
//! Serves a dashboard of synthetic data exercising every chart kind.
//! Settings come from `--config`, the default config locations and `PANDEX_*`
//! environment variables; command-line flags win over all of them.

use clap::Parser;
use pandex::chart::{ChartDescriptor, ChartKind, Producer, ProducerArgs};
use pandex::config::Config;
use pandex::dashboard::{Dashboard, DEFAULT_TITLE};
use pandex::layout::RowItem;
use pandex::logging::init_tracing;
use pandex::server::ServeOptions;
use pandex::table::{Table, Value};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser)]
#[command(name = "pandex")]
#[command(about = "Serve the Pandex demo dashboard", long_about = None)]
#[command(version)]
struct Args {
    /// Config file (defaults to the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Show error details and log verbosely; overrides --alternate-server
    #[arg(long)]
    debug: bool,

    /// Production mode: request timeouts and terse error pages
    #[arg(long)]
    alternate_server: bool,

    /// Use the dark theme
    #[arg(long)]
    dark_theme: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if args.debug {
        config.server.debug = true;
        config.logging.level = "debug".to_string();
    }
    if args.alternate_server {
        config.server.alternate_server = true;
    }
    if args.dark_theme {
        config.dashboard.dark_theme = true;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config.logging, Some("tower_http=debug"))?;

    tracing::info!("Starting Pandex demo v{}", env!("CARGO_PKG_VERSION"));

    let dashboard = demo_dashboard(&config);
    let options = ServeOptions::from(&config.server);

    dashboard.run(options).await?;

    tracing::info!("Pandex demo stopped");
    Ok(())
}

fn demo_dashboard(config: &Config) -> Dashboard {
    let decimals = config.dashboard.decimal_places;
    let rounded = |chart: ChartDescriptor| RowItem::Chart(chart.decimal_places(decimals));

    let title = config
        .dashboard
        .title
        .clone()
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    Dashboard::builder(title)
        .dark_theme(config.dashboard.dark_theme)
        .reload_interval(config.dashboard.reload_interval.clone())
        .layout_defaults(config.layout.clone())
        .section("Figure Interface")
        .row(vec![
            rounded(
                ChartDescriptor::new(ChartKind::Area, "Population", Producer::new(population))
                    .option("x", "year")
                    .option("y", "pop")
                    .option("color", "continent"),
            ),
            rounded(
                ChartDescriptor::new(ChartKind::Heatmap, "Sepal Heatmap", Producer::new(flowers))
                    .option("x", "sepal_width")
                    .option("y", "sepal_length"),
            ),
        ])
        .row(vec![
            rounded(
                ChartDescriptor::new(ChartKind::Scatter, "Scatter", Producer::new(flowers))
                    .option("x", "sepal_width")
                    .option("y", "sepal_length")
                    .option("color", "species")
                    .layout_option("legend_orientation", "h"),
            ),
            rounded(
                ChartDescriptor::new(ChartKind::Scatter, "Scatter No Color", Producer::new(flowers))
                    .option("x", "sepal_width")
                    .option("y", "sepal_length"),
            ),
            rounded(
                ChartDescriptor::new(ChartKind::Histogram, "Sepal Lengths", Producer::new(flowers))
                    .option("x", "sepal_length")
                    .option("color", "species"),
            ),
        ])
        .row(vec![rounded(
            ChartDescriptor::simple(ChartKind::Line, "Cumulative Return", Producer::new(random_frame))
                .arg("rows", 300)
                .arg("cumsum", true),
        )])
        .row(vec![
            rounded(
                ChartDescriptor::simple(ChartKind::Line, "Cumulative Return 2", Producer::new(random_frame))
                    .arg("rows", 300)
                    .arg("cumsum", true),
            ),
            rounded(ChartDescriptor::table("Table", Producer::new(flowers))),
        ])
        .section("Simple Interface")
        .row(vec![
            rounded(
                ChartDescriptor::simple(ChartKind::Line, "Returns", Producer::new(random_frame))
                    .arg("rows", 200)
                    .arg("scale", 0.02),
            ),
            rounded(ChartDescriptor::simple(ChartKind::Bar, "Comparisons", Producer::new(random_frame))),
            rounded(
                ChartDescriptor::simple(ChartKind::Scatter, "Scatter", Producer::new(random_frame))
                    .arg("rows", 20),
            ),
        ])
        .build()
}

/// `rows` x `cols` of normal noise with standard deviation `scale`,
/// cumulatively summed unless `cumsum` is false
fn random_frame(args: &ProducerArgs) -> anyhow::Result<Table> {
    let rows = args.usize_or("rows", 5);
    let cols = args.usize_or("cols", 3);
    let cumsum = args.bool_or("cumsum", true);
    let scale = args.f64_or("scale", 1.0);
    let mut rng = XorShift::from_clock();

    let columns = (0..cols).map(|c| {
        let mut total = 0.0;
        let values = (0..rows)
            .map(|_| {
                let draw = scale * rng.normal();
                total = if cumsum { total + draw } else { draw };
                Value::Float(total)
            })
            .collect();
        (c.to_string(), values)
    });

    Ok(Table::from_columns(columns)?)
}

/// Population per continent every five years
fn population(_: &ProducerArgs) -> anyhow::Result<Table> {
    const CONTINENTS: [(&str, f64, f64); 5] = [
        ("Africa", 237.6, 0.026),
        ("Americas", 345.2, 0.017),
        ("Asia", 1395.4, 0.019),
        ("Europe", 418.1, 0.005),
        ("Oceania", 12.7, 0.016),
    ];
    let mut rng = XorShift::from_clock();

    let (mut years, mut pops, mut names) = (Vec::new(), Vec::new(), Vec::new());
    for (name, start_millions, growth) in CONTINENTS {
        for step in 0..12 {
            let year = 1952 + step * 5;
            let noise = 1.0 + 0.01 * rng.normal();
            let pop = start_millions * 1e6 * (1.0 + growth).powi(step * 5) * noise;
            years.push(Value::Int(year as i64));
            pops.push(Value::Float(pop.round()));
            names.push(Value::from(name));
        }
    }

    Ok(Table::from_columns(vec![
        ("year", years),
        ("pop", pops),
        ("continent", names),
    ])?)
}

/// Fifty flower measurements per species
fn flowers(_: &ProducerArgs) -> anyhow::Result<Table> {
    const SPECIES: [(&str, f64, f64, f64, f64); 3] = [
        ("setosa", 5.0, 3.4, 1.5, 0.2),
        ("versicolor", 5.9, 2.8, 4.3, 1.3),
        ("virginica", 6.6, 3.0, 5.6, 2.0),
    ];
    let mut rng = XorShift::from_clock();

    let names = ["sepal_length", "sepal_width", "petal_length", "petal_width", "species"];
    let mut columns: Vec<(&str, Vec<Value>)> =
        names.into_iter().map(|name| (name, Vec::with_capacity(150))).collect();

    for (species, means) in SPECIES.map(|(s, a, b, c, d)| (s, [a, b, c, d])) {
        for _ in 0..50 {
            for (column, mean) in columns.iter_mut().zip(means) {
                column.1.push(Value::Float((mean + 0.3 * rng.normal()).max(0.1)));
            }
            columns[4].1.push(Value::from(species));
        }
    }

    Ok(Table::from_columns(columns)?)
}

/// Small xorshift generator, enough for demo noise
struct XorShift(u64);

impl XorShift {
    fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x2545_f491_4f6c_dd1d);
        Self(nanos | 1)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform in (0, 1]
    fn uniform(&mut self) -> f64 {
        ((self.next_u64() >> 11) as f64 + 1.0) / (1u64 << 53) as f64
    }

    /// Standard normal via Box-Muller
    fn normal(&mut self) -> f64 {
        let (u1, u2) = (self.uniform(), self.uniform());
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}
