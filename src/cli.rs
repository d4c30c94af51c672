use crate::{config::Config, gateways, surface::ConsoleSurface};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::{path::PathBuf, sync::Arc};
use time::OffsetDateTime;
use venuemap_application::prelude::*;
use venuemap_boundary::VenueRecord;
use venuemap_core::state::MapState;
use venuemap_entities::{circle::*, geo::*, venue::*};
use venuemap_gateways::json_file_store::JsonFileStore;

type State = MapState<ConsoleSurface, JsonFileStore>;

#[derive(Parser, Debug)]
#[command(name = "venuemap", version, about)]
pub struct Args {
    /// Configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the venues that match the filter
    Venues {
        /// Search the name, address and town
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        region: Option<String>,
        /// Highlight a single venue
        #[arg(long, value_name = "VENUE_ID")]
        select: Option<VenueId>,
    },
    /// Show the region legend
    Regions {
        /// List all regions instead of the largest ones
        #[arg(long)]
        all: bool,
    },
    /// Resolve the coordinates of all venues without a position
    Geocode {
        /// Don't write the coordinates back into the data file
        #[arg(long)]
        dry_run: bool,
    },
    /// Manage the radius circles
    Circle {
        #[command(subcommand)]
        command: CircleCommand,
    },
    /// Export all circles into a JSON file
    Export { file: String },
    /// Replace all circles with the contents of a JSON file
    Import { file: String },
    /// Write the venue report of a circle
    Report { id: CircleId },
}

#[derive(Subcommand, Debug)]
pub enum CircleCommand {
    /// Create a circle (in the center of the view by default)
    Add {
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
        /// Radius in meters
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Change the radius of a circle
    Radius {
        id: CircleId,
        /// Radius in meters
        #[arg(required_unless_present = "slider")]
        meters: Option<f64>,
        /// Position of the logarithmic radius slider
        #[arg(long, conflicts_with = "meters")]
        slider: Option<u16>,
    },
    /// Move a circle to a new center
    Move {
        id: CircleId,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
    Delete { id: CircleId },
    /// Delete all circles
    Clear,
    /// Select a circle and list its venues
    Select { id: CircleId },
    List,
    /// List the venues within a circle
    Members { id: CircleId },
}

struct Session {
    records: Vec<VenueRecord>,
    state: State,
}

fn open_session(cfg: &Config) -> Result<Session> {
    let (records, venues) =
        load_venues_from_file(&cfg.venues.data_file, &cfg.venues.service_area)?;
    let store = gateways::circle_store(&cfg.store)?;
    let surface = ConsoleSurface::new(cfg.map.view_center);
    let state = MapState::new(cfg.map.config.clone(), venues, surface, store)?;
    Ok(Session { records, state })
}

pub fn run(command: Command, cfg: Config) -> Result<()> {
    let Session { records, mut state } = open_session(&cfg)?;
    match command {
        Command::Venues {
            text,
            category,
            region,
            select,
        } => {
            if let Some(text) = text {
                state.set_search_text(text);
            }
            if category.is_some() {
                state.set_category(category);
            }
            if region.is_some() {
                state.set_region(region);
            }
            if let Some(id) = select {
                state.select_venue(id)?;
            }
            for v in state.filtered_venues() {
                let marker = if state.selected_venue() == Some(v.id) {
                    '*'
                } else {
                    ' '
                };
                println!(
                    "{marker}{:>5}  {}  [{} / {}]  {}",
                    v.id,
                    v.name,
                    v.category,
                    v.region,
                    v.address
                );
            }
            println!("{}", state.venue_count_label());
        }
        Command::Regions { all } => {
            let regions = if all {
                state.regions().to_vec()
            } else {
                state.legend()
            };
            for r in regions {
                println!("{}  {:>5}  {}", r.color, r.count, r.region);
            }
        }
        Command::Geocode { dry_run } => geocode(&cfg, records, &mut state, dry_run)?,
        Command::Circle { command } => run_circle_command(command, &mut state)?,
        Command::Export { file } => {
            export_circles(
                &state,
                &gateways::file_gateway(),
                &file,
                OffsetDateTime::now_utc(),
            )?;
        }
        Command::Import { file } => {
            let count = import_circles(&mut state, &gateways::file_gateway(), &file)?;
            println!("Imported {count} circle(s)");
            print_circles(&state);
        }
        Command::Report { id } => {
            state.select_circle(id)?;
            let file_name = export_report(
                &state,
                &gateways::document_gateway(&cfg.report),
                &cfg.report.layout,
                OffsetDateTime::now_utc(),
            )?;
            println!(
                "Saved report to {}",
                cfg.report.output_dir.join(file_name).display()
            );
        }
    }
    log::debug!("Rendered {} instruction(s)", state.surface().rendered());
    Ok(())
}

fn run_circle_command(command: CircleCommand, state: &mut State) -> Result<()> {
    match command {
        CircleCommand::Add { lat, lng, radius } => {
            let id = match (lat, lng) {
                (Some(lat), Some(lng)) => {
                    state.create_circle_at(MapPoint::try_from_lat_lng_deg(lat, lng)?)?
                }
                _ => state.create_circle()?,
            };
            if let Some(meters) = radius {
                state.set_radius(id, Distance::from_meters(meters))?;
            }
            print_members(state, id)?;
        }
        CircleCommand::Radius { id, meters, slider } => {
            match (meters, slider) {
                (_, Some(position)) => state.set_radius_from_slider(id, position)?,
                (Some(meters), None) => state.set_radius(id, Distance::from_meters(meters))?,
                (None, None) => bail!("Missing radius"),
            }
            print_members(state, id)?;
        }
        CircleCommand::Move { id, lat, lng } => {
            let center = MapPoint::try_from_lat_lng_deg(lat, lng)?;
            state.drag_circle(id, center)?;
            state.end_drag(id, center)?;
            print_members(state, id)?;
        }
        CircleCommand::Delete { id } => {
            state.delete_circle(id)?;
            print_circles(state);
        }
        CircleCommand::Clear => {
            state.clear_circles()?;
            println!("Deleted all circles");
        }
        CircleCommand::Select { id } => {
            state.select_circle(id)?;
            print_members(state, id)?;
        }
        CircleCommand::List => print_circles(state),
        CircleCommand::Members { id } => print_members(state, id)?,
    }
    Ok(())
}

fn geocode(cfg: &Config, mut records: Vec<VenueRecord>, state: &mut State, dry_run: bool) -> Result<()> {
    let Some(gateway) = gateways::geocoding_gateway(&cfg.geocoding)? else {
        bail!("Geocoding is not possible without a gateway");
    };
    let gateway = Arc::new(gateway);
    let batches = GeocodingBatches {
        batch_size: cfg.geocoding.batch_size,
        pacing: cfg.geocoding.pacing,
        service_area: cfg.venues.service_area,
    };
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()?;
    let summary = runtime.block_on(resolve_coordinates(state, Arc::clone(&gateway), &batches))?;
    println!(
        "Resolved {}, not found {}, failed {}",
        summary.resolved, summary.not_found, summary.failed
    );
    let updated = fill_in_coordinates(&mut records, state.venues());
    if dry_run || updated == 0 {
        return Ok(());
    }
    let data_file = &cfg.venues.data_file;
    save_venue_records(data_file, &records)?;
    log::info!(
        "Updated {updated} row(s) of {}",
        data_file.display()
    );
    Ok(())
}

fn print_circles(state: &State) {
    let selected = state.selection().circle_id();
    for c in state.circles().circles() {
        let marker = if selected == Some(c.id) { '*' } else { ' ' };
        println!(
            "{marker}{:>3}  ({:.5}, {:.5})  {:.1} km  {} venue(s)",
            c.id,
            c.center.lat(),
            c.center.lng(),
            c.radius.to_kilometers(),
            c.members.len()
        );
    }
}

fn print_members(state: &State, id: CircleId) -> Result<()> {
    let Some(circle) = state.circles().get(id) else {
        bail!("Circle {id} not found");
    };
    println!(
        "Circle {} ({:.1} km): {} venue(s)",
        circle.id,
        circle.radius.to_kilometers(),
        circle.members.len()
    );
    for Member {
        name,
        region,
        distance_km,
        ..
    } in &circle.members
    {
        println!("{distance_km:>6.1} km  {name}  [{region}]");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_circle_commands() {
        let args =
            Args::try_parse_from(["venuemap", "circle", "add", "--lat", "51.5", "--lng", "-0.1"])
                .unwrap();
        assert!(matches!(
            args.command,
            Command::Circle {
                command: CircleCommand::Add {
                    lat: Some(_),
                    lng: Some(_),
                    radius: None
                }
            }
        ));
        assert!(Args::try_parse_from(["venuemap", "circle", "add", "--lat", "51.5"]).is_err());
        assert!(Args::try_parse_from(["venuemap", "circle", "radius", "3"]).is_err());
        let args =
            Args::try_parse_from(["venuemap", "circle", "radius", "3", "--slider", "500"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Circle {
                command: CircleCommand::Radius {
                    id: 3,
                    meters: None,
                    slider: Some(500)
                }
            }
        ));
    }
}
