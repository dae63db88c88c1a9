//! Line-oriented interactive session
//!
//! Mirrors the map page controls: two address fields and a search button,
//! waypoint dragging, the sidebar toggle and the weather popup. One
//! `MapSession` lives for the whole session; the weather refresher runs in
//! the background and writes into a shared panel.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::{Endpoint, SearchOutcome, WeatherPanel};
use domain::Coordinate;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{App, print_notices, print_report, print_weather};

const HELP: &str = "\
Commands:
  from <address>          set the start address
  to <address>            set the end address
  go                      search for routes between start and end
  drag <start|end> <lat> <lon>
                          move a waypoint of the current route
  open | close            toggle / close the sidebar
  weather                 show the weather panel
  export <path>           write the current map to an HTML file
  help                    show this help
  quit                    leave";

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Input {
    From(String),
    To(String),
    Go,
    Drag(Endpoint, Coordinate),
    Open,
    Close,
    Weather,
    Export(PathBuf),
    Help,
    Quit,
    Empty,
}

/// Parse a line typed by the user
pub(crate) fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    match word.to_lowercase().as_str() {
        "" => Ok(Input::Empty),
        "from" => Ok(Input::From(rest.to_string())),
        "to" => Ok(Input::To(rest.to_string())),
        "go" | "search" => Ok(Input::Go),
        "drag" => parse_drag(rest),
        "open" => Ok(Input::Open),
        "close" => Ok(Input::Close),
        "weather" => Ok(Input::Weather),
        "export" if !rest.is_empty() => Ok(Input::Export(PathBuf::from(rest))),
        "export" => Err("usage: export <path>".to_string()),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" => Ok(Input::Quit),
        other => Err(format!("unknown command '{other}', type 'help'")),
    }
}

fn parse_drag(args: &str) -> Result<Input, String> {
    const USAGE: &str = "usage: drag <start|end> <lat> <lon>";

    let parts: Vec<&str> = args.split_whitespace().collect();
    let [which, lat, lon] = parts.as_slice() else {
        return Err(USAGE.to_string());
    };
    let endpoint = match which.to_lowercase().as_str() {
        "start" => Endpoint::Start,
        "end" => Endpoint::End,
        _ => return Err(USAGE.to_string()),
    };
    let lat: f64 = lat.parse().map_err(|_| format!("invalid latitude '{lat}'"))?;
    let lon: f64 = lon.parse().map_err(|_| format!("invalid longitude '{lon}'"))?;
    let coordinate = Coordinate::new(lat, lon).map_err(|e| e.to_string())?;

    Ok(Input::Drag(endpoint, coordinate))
}

const fn waypoint_index(endpoint: Endpoint) -> usize {
    match endpoint {
        Endpoint::Start => 0,
        Endpoint::End => 1,
    }
}

/// Run the session until `quit` or end of input
pub(crate) async fn run(mut app: App) -> anyhow::Result<()> {
    let mut session = app.new_session();
    let panel = WeatherPanel::shared();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let ticker = match app.weather_service(None) {
        Some(service) => {
            let panel = Arc::clone(&panel);
            Some(tokio::spawn(async move { service.run(panel, shutdown_rx).await }))
        },
        None => {
            warn!("Weather panel disabled: no API key configured");
            None
        },
    };

    println!("{HELP}");
    let mut start = String::new();
    let mut end = String::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(message) => {
                println!("{message}");
                continue;
            },
        };
        debug!(?input, "Input");

        match input {
            Input::Empty => {},
            Input::From(address) => start = address,
            Input::To(address) => end = address,
            Input::Go => {
                match app.coordinator.submit(&mut session, &start, &end).await {
                    Ok(SearchOutcome::Rendered(report)) => print_report(&report),
                    // Notice already recorded on the session
                    Ok(SearchOutcome::LocationNotFound { .. }) | Err(_) => {},
                }
                print_notices(&mut session);
            },
            Input::Drag(endpoint, coordinate) => {
                match app
                    .coordinator
                    .drag_waypoint(&mut session, waypoint_index(endpoint), coordinate)
                    .await
                {
                    Ok(report) => print_report(&report),
                    Err(e) => println!("{e}"),
                }
                print_notices(&mut session);
            },
            Input::Open => {
                session.open_sidebar_clicked();
                println!(
                    "Sidebar {}",
                    if session.sidebar().is_active() { "open" } else { "closed" }
                );
            },
            Input::Close => {
                session.close_sidebar_clicked();
                println!("Sidebar closed");
            },
            Input::Weather => print_weather(&panel.read()),
            Input::Export(path) => {
                let weather = panel.read().clone();
                match app.templates.export_map_page(&path, &session, Some(&weather)) {
                    Ok(()) => println!("Map written to {}", path.display()),
                    Err(e) => println!("{e}"),
                }
            },
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
        }
    }

    let _ = shutdown_tx.send(true);
    if let Some(ticker) = ticker {
        ticker.await?;
    }
    Ok(())
}
