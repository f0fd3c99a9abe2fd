use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use flate2::read::GzDecoder;
use serde_json::json;

use roadqa::parse::{parse_lines, LogFormat};
use roadqa::render::{subsample, TrackSegment};
use roadqa::{align, VibrationConfig};

#[derive(Parser, Debug)]
#[command(name = "roadqa")]
#[command(about = "Road roughness maps from IMU + GPS ride logs", long_about = None)]
struct Args {
    /// Sensor log to process (plain text or .gz)
    data_path: PathBuf,

    /// Resampling period of the common time axis, in milliseconds
    #[arg(long, default_value = "10")]
    period_ms: u64,

    /// Vibration floor; values below it collapse to zero
    #[arg(long, default_value = "0.01")]
    threshold: f64,

    /// Exponential gain on normalized jerk
    #[arg(long, default_value = "0.3")]
    sensitivity: f64,

    /// Final dynamic-range shaping exponent
    #[arg(long, default_value = "0.33333333")]
    contrast: f64,

    /// Keep one track point every N axis samples
    #[arg(long, default_value = "100")]
    subsample: usize,

    /// Metadata lines before the first record
    #[arg(long, default_value = "2")]
    metadata_lines: usize,

    /// Where to write the GeoJSON track
    #[arg(long, default_value = "roadqa_track.geojson")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let lines = read_log_lines(&args.data_path)?;
    let format = LogFormat {
        metadata_lines: args.metadata_lines,
        ..LogFormat::default()
    };
    let log = parse_lines(lines.iter().map(String::as_str), &format)?;
    log::info!(
        "parsed {} imu samples and {} gps fixes from {}",
        log.imu.len(),
        log.gps.len(),
        args.data_path.display()
    );

    let track = align(&log, args.period_ms)?;
    log::info!("aligned {} samples at {} ms step", track.len(), args.period_ms);

    let config = VibrationConfig {
        threshold: args.threshold,
        sensitivity: args.sensitivity,
        contrast: args.contrast,
    };
    let vibration = track.vibration(&config)?;
    let segments = subsample(&track, &vibration, args.subsample)?;

    write_geojson(&args.output, &segments)?;
    log::info!(
        "wrote {} segments to {}",
        segments.len(),
        args.output.display()
    );
    Ok(())
}

fn read_log_lines(path: &Path) -> Result<Vec<String>> {
    let file =
        File::open(path).with_context(|| format!("cannot open log {}", path.display()))?;
    let reader: Box<dyn BufRead> = if path.extension().map(|e| e == "gz").unwrap_or(false) {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    reader
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("cannot read log {}", path.display()))
}

fn write_geojson(path: &Path, segments: &[TrackSegment]) -> Result<()> {
    let features: Vec<_> = segments
        .iter()
        .map(|segment| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    // GeoJSON positions are (lon, lat)
                    "coordinates": [
                        [segment.start.1, segment.start.0],
                        [segment.end.1, segment.end.0],
                    ],
                },
                "properties": {
                    "vibration": segment.vibration,
                    "stroke": jet_hex(segment.vibration),
                    "stroke-width": 7,
                },
            })
        })
        .collect();

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    let mut file = File::create(path)
        .with_context(|| format!("cannot create output {}", path.display()))?;
    file.write_all(serde_json::to_string_pretty(&collection)?.as_bytes())
        .with_context(|| format!("cannot write output {}", path.display()))?;
    Ok(())
}

/// Jet-like colormap: blue through green to red over [0, 1].
fn jet_hex(value: f64) -> String {
    let v = value.clamp(0.0, 1.0);
    let r = (1.5 - (4.0 * v - 3.0).abs()).clamp(0.0, 1.0);
    let g = (1.5 - (4.0 * v - 2.0).abs()).clamp(0.0, 1.0);
    let b = (1.5 - (4.0 * v - 1.0).abs()).clamp(0.0, 1.0);
    format!(
        "#{:02x}{:02x}{:02x}",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jet_endpoints_and_clamping() {
        assert_eq!(jet_hex(0.0), "#000080");
        assert_eq!(jet_hex(1.0), "#800000");
        // Out-of-range inputs clamp to the ends.
        assert_eq!(jet_hex(0.0), jet_hex(-1.0));
        assert_eq!(jet_hex(1.0), jet_hex(2.0));
        assert_ne!(jet_hex(0.0), jet_hex(1.0));
    }

    #[test]
    fn jet_midpoint_is_green_dominant() {
        // v=0.5 -> g channel saturates.
        assert_eq!(&jet_hex(0.5)[3..5], "ff");
    }
}
