use clap::{Parser, Subcommand};
use std::fs;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use skywatch::client::view::{MarkerKind, Panel};
use skywatch::client::{ClientError, FixedPosition, MapClient, MapSession, Render};
use skywatch::config::Config;
use skywatch::geo::Location;
use skywatch::web;

#[derive(Parser)]
#[command(name = "skywatch")]
#[command(about = "Satellite sky-watching gateway and map client")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gateway
    Serve,
    /// Validate the configuration and credentials
    CheckConfig,
    /// Use the configured home position and show its weather
    Locate,
    /// List satellites above a location
    Overhead {
        /// "lat,lon"; defaults to client.home
        #[arg(long)]
        at: Option<String>,
        /// Track the Nth listed satellite (0-based)
        #[arg(long)]
        select: Option<usize>,
    },
    /// Show the next pass of a satellite
    Pass {
        norad_id: u32,
        #[arg(long)]
        at: Option<String>,
    },
    /// Show current weather
    Weather {
        #[arg(long)]
        at: Option<String>,
    },
    /// Save an Earth imagery snapshot
    Image {
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Look up a country by name and centre on it
    Country { name: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::CheckConfig => check_config(&config),
        Commands::Locate => locate(&config).await,
        Commands::Overhead { at, select } => overhead(&config, at.as_deref(), select).await,
        Commands::Pass { norad_id, at } => {
            run_action(&config, at.as_deref(), |client| async move {
                client.track_pass(norad_id).await
            })
            .await
        }
        Commands::Weather { at } => {
            run_action(&config, at.as_deref(), |client| async move {
                client.refresh_weather().await
            })
            .await
        }
        Commands::Image { at, out } => image(&config, at.as_deref(), out).await,
        Commands::Country { name } => {
            run_action(&config, None, |client| async move {
                client.search_country(&name).await
            })
            .await
        }
    }
}

async fn serve(config: Config) -> ExitCode {
    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn check_config(config: &Config) -> ExitCode {
    if let Err(e) = config.validate() {
        eprintln!("Config is invalid: {}", e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = config.client.home_location() {
        eprintln!("Config is invalid: {}", e);
        return ExitCode::FAILURE;
    }
    println!("Config is valid");
    println!("  bind:       {}", config.web.bind);
    println!("  static dir: {}", config.web.static_dir.display());
    println!("  gateway:    {}", config.client.gateway_url);
    println!("  countries:  {}", config.client.countries_base_url);
    if let Some(home) = &config.client.home {
        println!("  home:       {}", home);
    }
    ExitCode::SUCCESS
}

fn starting_point(config: &Config, at: Option<&str>) -> Result<Location, String> {
    if let Some(coordinates) = at {
        return Location::from_coordinates(coordinates).map_err(|e| e.to_string());
    }
    let home = config.client.home_location().map_err(|e| e.to_string())?;
    Ok(home.unwrap_or_default())
}

fn build_client(config: &Config, at: Option<&str>) -> Result<MapClient, String> {
    let initial = starting_point(config, at)?;
    MapClient::from_config(&config.client, initial).map_err(|e| e.to_string())
}

async fn run_action<F, Fut>(config: &Config, at: Option<&str>, action: F) -> ExitCode
where
    F: FnOnce(MapClient) -> Fut,
    Fut: Future<Output = Result<Render, ClientError>>,
{
    let client = match build_client(config, at) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = action(client.clone()).await;
    client.view(print_view);
    match result {
        Ok(Render::Applied) => ExitCode::SUCCESS,
        Ok(Render::Superseded) => {
            eprintln!("Result was superseded by a newer request");
            ExitCode::FAILURE
        }
        Err(_) => ExitCode::FAILURE,
    }
}

async fn locate(config: &Config) -> ExitCode {
    let home = match config.client.home_location() {
        Ok(home) => home,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    run_action(config, None, |client| async move {
        client.locate(&FixedPosition(home)).await
    })
    .await
}

async fn overhead(config: &Config, at: Option<&str>, select: Option<usize>) -> ExitCode {
    run_action(config, at, |client| async move {
        let scanned = client.scan_overhead().await?;
        match select {
            Some(index) => client.select_satellite(index).await,
            None => Ok(scanned),
        }
    })
    .await
}

async fn image(config: &Config, at: Option<&str>, out: PathBuf) -> ExitCode {
    let client = match build_client(config, at) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = client.refresh_earth_image().await;
    client.view(print_view);
    if !matches!(result, Ok(Render::Applied)) {
        return ExitCode::FAILURE;
    }

    match client.view(|session| save_image(session, &out)) {
        Ok(saved) => {
            println!("{}", saved);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", out.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn save_image(session: &MapSession, out: &Path) -> io::Result<String> {
    let image = session
        .image()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no image to save"))?;
    fs::write(out, &image.bytes)?;
    Ok(format!(
        "Saved {} bytes ({}) to {}",
        image.bytes.len(),
        image.content_type,
        out.display()
    ))
}

fn print_view(session: &MapSession) {
    if !session.status().is_empty() {
        println!("{}", session.status());
    }

    match session.panel() {
        Panel::Hidden => {}
        Panel::NoSatellites => println!("No satellites currently overhead"),
        Panel::SatelliteList(list) => {
            println!("{} satellites overhead:", list.len());
            for (i, sat) in list.iter().enumerate() {
                let altitude = sat
                    .altitude_km
                    .map(|a| format!("{:.0} km", a))
                    .unwrap_or_else(|| "altitude unknown".to_string());
                println!("  {}: {} [{}] {}", i, sat.name, sat.id, altitude);
            }
        }
    }

    for marker in session.markers() {
        if let Some(popup) = &marker.popup {
            println!("{}", popup);
        } else if matches!(marker.kind, MarkerKind::ArcStart | MarkerKind::ArcEnd) {
            println!(
                "  track marker at {}",
                marker.position.format_coordinates()
            );
        }
    }

    if let Some(weather) = session.weather() {
        println!("Weather at {}", weather.snapshot.location_name);
        for line in &weather.lines {
            println!("  {}", line);
        }
    }

    for notice in session.notices() {
        eprintln!("{:?}: {}", notice.level, notice.message);
    }
}
