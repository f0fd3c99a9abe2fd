use crate::error::{Result, RoadQaError};
use crate::types::{InertialSample, PositionSample};

/// Layout of the semicolon-delimited logger dump. Passed explicitly so a
/// different header length or field separator needs no code change.
#[derive(Clone, Debug)]
pub struct LogFormat {
    /// Leading metadata lines to skip before the first record.
    pub metadata_lines: usize,
    /// Separator between the tag and the numeric payload fields.
    pub delimiter: char,
    /// Trailing wall-clock fields on every gps record (hour, minute,
    /// second, unused). Read and discarded.
    pub gps_reserved_fields: usize,
}

impl Default for LogFormat {
    fn default() -> Self {
        LogFormat {
            metadata_lines: 2,
            delimiter: ';',
            gps_reserved_fields: 4,
        }
    }
}

/// One classified log record. The tag string becomes a variant at parse
/// time, so downstream code never sees an unknown sensor kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SensorRecord {
    Imu(InertialSample),
    Gps(PositionSample),
}

/// Parsed log, both streams in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SensorLog {
    pub imu: Vec<InertialSample>,
    pub gps: Vec<PositionSample>,
}

/// Parse the full line sequence of a log dump. The first
/// `format.metadata_lines` lines are skipped; any malformed record aborts
/// the whole run, there is no partial-batch recovery.
pub fn parse_lines<'a, I>(lines: I, format: &LogFormat) -> Result<SensorLog>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut log = SensorLog::default();
    for (index, line) in lines.into_iter().enumerate() {
        if index < format.metadata_lines {
            continue;
        }
        match parse_line(line, index + 1, format)? {
            SensorRecord::Imu(sample) => log.imu.push(sample),
            SensorRecord::Gps(sample) => log.gps.push(sample),
        }
    }
    Ok(log)
}

/// Classify and parse a single record line. `line_number` is 1-based and
/// only used for error messages.
pub fn parse_line(line: &str, line_number: usize, format: &LogFormat) -> Result<SensorRecord> {
    let mut fields = line.split(format.delimiter);
    let tag = fields.next().unwrap_or("");
    let payload: Vec<&str> = fields.collect();

    match tag {
        "imu" => {
            if payload.len() != 4 {
                return Err(RoadQaError::MalformedRecord {
                    line: line_number,
                    reason: format!("imu record needs 4 fields, found {}", payload.len()),
                });
            }
            Ok(SensorRecord::Imu(InertialSample {
                timestamp_ms: parse_timestamp(payload[0], line_number)?,
                acc_x: parse_float(payload[1], line_number)?,
                acc_y: parse_float(payload[2], line_number)?,
                acc_z: parse_float(payload[3], line_number)?,
            }))
        }
        "gps" => {
            let needed = 4 + format.gps_reserved_fields;
            if payload.len() != needed {
                return Err(RoadQaError::MalformedRecord {
                    line: line_number,
                    reason: format!("gps record needs {needed} fields, found {}", payload.len()),
                });
            }
            let used = &payload[..payload.len() - format.gps_reserved_fields];
            Ok(SensorRecord::Gps(PositionSample {
                timestamp_ms: parse_timestamp(used[0], line_number)?,
                latitude: parse_float(used[1], line_number)?,
                longitude: parse_float(used[2], line_number)?,
                speed: parse_float(used[3], line_number)?,
            }))
        }
        other => Err(RoadQaError::UnrecognizedSensorKind {
            line: line_number,
            tag: other.to_string(),
        }),
    }
}

// The logger writes integer millisecond counters; a fractional or negative
// timestamp means the file is corrupt, not a value to round.
fn parse_timestamp(field: &str, line_number: usize) -> Result<u64> {
    field
        .trim()
        .parse::<u64>()
        .map_err(|_| RoadQaError::MalformedRecord {
            line: line_number,
            reason: format!("bad timestamp field {:?}", field),
        })
}

fn parse_float(field: &str, line_number: usize) -> Result<f64> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| RoadQaError::MalformedRecord {
            line: line_number,
            reason: format!("bad numeric field {:?}", field),
        })
}
