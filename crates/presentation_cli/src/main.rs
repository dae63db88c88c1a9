//! Wayfare CLI
//!
//! Command-line front end: plan a route between two addresses, show the
//! weather panel, export the map as HTML, or drive a session interactively.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod interactive;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::{
    MapSession, MapShellConfig, RouteCoordinator, RouteReport, SearchOutcome, WeatherPanel,
    WeatherPort, WeatherService,
};
use clap::{Parser, Subcommand};
use infrastructure::{
    AppConfig, GeocodingAdapter, RoutingAdapter, TemplateEngine, WeatherAdapter, init_logging,
};
use tokio::sync::watch;
use tracing::{info, warn};

/// Wayfare CLI
#[derive(Parser)]
#[command(name = "wayfare-cli")]
#[command(author, version, about = "Route planner with cost estimate and weather", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "WAYFARE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a route between two addresses and estimate its cost
    ///
    /// Example: wayfare-cli route "Mumbai" "Pune" --html route.html
    Route {
        /// Start address
        start: String,

        /// End address
        end: String,

        /// Also write the map with the route to this HTML file
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Show current weather for the configured city
    Weather {
        /// Override the configured city
        #[arg(long)]
        city: Option<String>,

        /// Keep refreshing on the configured interval until Ctrl-C
        #[arg(short, long)]
        watch: bool,
    },

    /// Write the empty map shell (with weather, if configured) to HTML
    Map {
        /// Output path
        #[arg(short, long, default_value = "map.html")]
        output: PathBuf,
    },

    /// Interactive session reading commands from stdin
    Interactive,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Everything the commands need, built once from configuration
struct App {
    coordinator: RouteCoordinator,
    weather_port: Option<Arc<dyn WeatherPort>>,
    weather_city: String,
    weather_interval: Duration,
    shell: MapShellConfig,
    templates: TemplateEngine,
}

impl App {
    fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let geocoder = GeocodingAdapter::with_config(&config.geocoding)?;
        let router = RoutingAdapter::with_config(&config.routing)?;
        let coordinator = RouteCoordinator::new(Arc::new(geocoder), Arc::new(router))
            .with_cost_estimator(config.pricing.to_estimator()?);

        let weather_port: Option<Arc<dyn WeatherPort>> = match config.weather.to_client_config() {
            Some(client_config) => Some(Arc::new(WeatherAdapter::with_config(client_config)?)),
            None => None,
        };

        Ok(Self {
            coordinator,
            weather_port,
            weather_city: config.weather.city.clone(),
            weather_interval: config.weather.refresh_interval(),
            shell: config.map.to_shell_config()?,
            templates: TemplateEngine::new()?,
        })
    }

    fn new_session(&self) -> MapSession {
        MapSession::new(&self.shell)
    }

    /// Weather refresher for the configured city, or `city` if given
    fn weather_service(&self, city: Option<String>) -> Option<WeatherService> {
        let port = Arc::clone(self.weather_port.as_ref()?);
        let city = city.unwrap_or_else(|| self.weather_city.clone());
        Some(WeatherService::new(port, city).with_interval(self.weather_interval))
    }

    fn require_weather_service(&self, city: Option<String>) -> anyhow::Result<WeatherService> {
        self.weather_service(city).context(
            "No weather API key configured; set WAYFARE_WEATHER__API_KEY or weather.api_key",
        )
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = AppConfig::load_from(path).context("Failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
    Ok(config)
}

pub(crate) fn print_report(report: &RouteReport) {
    println!("Distance: {}", report.distance_text());
    println!("Estimated Cost: {}", report.cost_text());
}

pub(crate) fn print_weather(panel: &WeatherPanel) {
    if !panel.visible {
        println!("Weather not available yet");
        return;
    }
    println!("{}", panel.header);
    println!("  {}  ({})", panel.temperature, panel.feels_like);
    println!("  {}", panel.description);
    println!("  Humidity: {}%", panel.humidity);
    println!("  Wind: {} km/h", panel.wind);
}

pub(crate) fn print_notices(session: &mut MapSession) {
    for notice in session.take_notices() {
        eprintln!("! {notice}");
    }
}

async fn run_route(
    app: &mut App,
    start: &str,
    end: &str,
    html: Option<&Path>,
) -> anyhow::Result<()> {
    let mut session = app.new_session();
    let outcome = app.coordinator.submit(&mut session, start, end).await;
    print_notices(&mut session);

    match outcome? {
        SearchOutcome::Rendered(report) => print_report(&report),
        SearchOutcome::LocationNotFound { missing } => {
            anyhow::bail!("No match for {missing:?} address");
        },
    }

    if let Some(path) = html {
        app.templates.export_map_page(path, &session, None)?;
        println!("Map written to {}", path.display());
    }
    Ok(())
}

async fn run_weather(app: &App, city: Option<String>, watch_mode: bool) -> anyhow::Result<()> {
    let service = app.require_weather_service(city)?;
    let panel = WeatherPanel::shared();

    if !watch_mode {
        service.refresh(&panel).await?;
        print_weather(&panel.read());
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ticker = {
        let panel = Arc::clone(&panel);
        tokio::spawn(async move { service.run(panel, shutdown_rx).await })
    };

    let mut last_shown = None;
    let mut poll = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = poll.tick() => {
                let current = panel.read().clone();
                if current.updated_at.is_some() && current.updated_at != last_shown {
                    last_shown = current.updated_at;
                    print_weather(&current);
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    let _ = shutdown_tx.send(true);
    ticker.await?;
    Ok(())
}

async fn run_map(app: &App, output: &Path) -> anyhow::Result<()> {
    let session = app.new_session();
    let panel = WeatherPanel::shared();

    if let Some(service) = app.weather_service(None) {
        if let Err(e) = service.refresh(&panel).await {
            warn!(error = %e, "Exporting map without weather");
        }
    }

    let weather = panel.read().clone();
    app.templates
        .export_map_page(output, &session, Some(&weather))?;
    println!("Map written to {}", output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if cli.verbose > 0 {
        config.logging = config
            .logging
            .with_filter(log_filter_from_verbosity(cli.verbose));
    }
    init_logging(&config.logging)?;
    info!(version = env!("CARGO_PKG_VERSION"), "Wayfare starting");

    let mut app = App::from_config(&config)?;

    match cli.command {
        Commands::Route { start, end, html } => {
            run_route(&mut app, &start, &end, html.as_deref()).await
        },
        Commands::Weather { city, watch } => run_weather(&app, city, watch).await,
        Commands::Map { output } => run_map(&app, &output).await,
        Commands::Interactive => interactive::run(app).await,
    }
}
