mod options;

use anyhow::Error as AnyError;
use clap::Parser;
use log::info;
use options::{Cli, Command as CliCmd, LatLon, Spacing};
use std::{io::Write, time::Duration};
use terrain::{geo::LineString, Credentials, HttpTileSource, Profile};
use textplots::{Chart, Plot, Shape};

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    let Cli {
        points,
        samples,
        min_spacing: Spacing(min_spacing),
        zoom,
        token,
        url_template,
        timeout_secs,
        cmd,
    } = Cli::parse();

    env_logger::init();

    let path: LineString = points.into_iter().map(|LatLon(coord)| coord).collect();
    let tile_src = HttpTileSource::new(url_template, Duration::from_secs(timeout_secs))?;
    let credentials = Credentials::new(token);

    let profile = Profile::builder()
        .path(path)
        .samples(samples)
        .min_spacing(min_spacing)
        .zoom(zoom)
        .build(&tile_src, &credentials)
        .await?;
    info!("profile; samples: {}", profile.len());

    match cmd {
        CliCmd::Json => print_json(&profile)?,
        CliCmd::Csv => print_csv(&profile)?,
        CliCmd::Plot => plot_ascii(&profile),
    };
    Ok(())
}

fn print_json(profile: &Profile) -> Result<(), AnyError> {
    let json = serde_json::to_string(&profile.to_feature_collection())?;
    println!("{json}");
    Ok(())
}

/// # Example with gnuplot
///
/// ```sh
/// cargo run -- --point=44.2831,-71.3083 --point=44.2563,-71.2972 csv | tr ',' ' ' > ~/.tmp/plot && gnuplot -p -e "plot '~/.tmp/plot' using 1:4 with lines"
/// ```
fn print_csv(profile: &Profile) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Distance,Longitude,Latitude,Elevation")?;
    for ((distance, point), elevation) in profile
        .distances_m
        .iter()
        .zip(profile.points.iter())
        .zip(profile.elevation_m.iter())
    {
        let longitude = point.x();
        let latitude = point.y();
        writeln!(stdout, "{distance},{longitude},{latitude},{elevation}")?;
    }
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn plot_ascii(profile: &Profile) {
    let plot_data: Vec<(f32, f32)> = profile
        .distances_m
        .iter()
        .zip(profile.elevation_m.iter())
        .map(|(distance, elevation)| (*distance as f32, *elevation as f32))
        .collect();
    let max_distance = plot_data.last().map_or(1.0, |(distance, _)| *distance);
    Chart::new(300, 150, 0.0, max_distance)
        .lineplot(&Shape::Lines(&plot_data))
        .display();
}
