//! Minimal reader for IGC flight recorder files.
//!
//! Only the header records needed for a track summary and the B (fix) records
//! are interpreted, every other record type is skipped.

use chrono::{NaiveDate, NaiveTime};
use model::track::{GeoPoint, ParsedTrack};

use crate::IgcError;

const B_RECORD_MIN_LEN: usize = 35;

#[derive(Debug, Default)]
struct Header {
    date: Option<NaiveDate>,
    pilot: Option<String>,
    glider_type: Option<String>,
    glider_id: Option<String>,
}

pub fn parse_igc(text: &str) -> Result<ParsedTrack, IgcError> {
    let mut header = Header::default();
    let mut points = vec![];

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        let malformed = |kind| IgcError::MalformedRecord {
            kind,
            line: index + 1,
            content: line.to_owned(),
        };
        match line.chars().next() {
            Some('B') => {
                points.push(parse_fix(line).ok_or_else(|| malformed('B'))?);
            }
            Some('H') => parse_header(line, &mut header).ok_or_else(|| malformed('H'))?,
            _ => {}
        }
    }

    Ok(ParsedTrack {
        pilot: header.pilot.unwrap_or_default(),
        glider_type: header.glider_type.unwrap_or_default(),
        glider_id: header.glider_id.unwrap_or_default(),
        date: header.date.ok_or(IgcError::MissingDate)?,
        points,
    })
}

fn header_value(line: &str) -> Option<&str> {
    match line.split_once(':') {
        Some((_, value)) => Some(value.trim()),
        None => line.get(5..).map(str::trim),
    }
}

fn parse_header(line: &str, header: &mut Header) -> Option<()> {
    let Some(code) = line.get(2..5) else {
        return Some(());
    };
    // some recorders repeat headers, the first one wins
    match code.to_ascii_uppercase().as_str() {
        "DTE" if header.date.is_none() => {
            header.date = Some(flight_date(header_value(line)?)?);
        }
        "PLT" if header.pilot.is_none() => {
            header.pilot = Some(header_value(line)?.to_owned());
        }
        "GTY" if header.glider_type.is_none() => {
            header.glider_type = Some(header_value(line)?.to_owned());
        }
        "GID" if header.glider_id.is_none() => {
            header.glider_id = Some(header_value(line)?.to_owned());
        }
        _ => {}
    }
    Some(())
}

/// Reads `ddmmyy`. Two digit years from 69 on are in the 1900s.
fn flight_date(value: &str) -> Option<NaiveDate> {
    if !value.get(..6)?.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let day: u32 = number(value, 0, 2)?;
    let month: u32 = number(value, 2, 4)?;
    let year: i32 = number(value, 4, 6)?;
    let century = if year >= 69 { 1900 } else { 2000 };
    NaiveDate::from_ymd_opt(century + year, month, day)
}

fn number<T: std::str::FromStr>(line: &str, from: usize, to: usize) -> Option<T> {
    line.get(from..to)?.parse().ok()
}

/// Reads `DDMMmmm` or `DDDMMmmm` followed by a hemisphere letter.
fn coordinate(
    line: &str,
    start: usize,
    degree_digits: usize,
    positive: char,
    negative: char,
) -> Option<f64> {
    let degrees: f64 = number(line, start, start + degree_digits)?;
    let milli_minutes: f64 = number(line, start + degree_digits, start + degree_digits + 5)?;
    let value = degrees + milli_minutes / 1000.0 / 60.0;
    match line.get(start + degree_digits + 5..start + degree_digits + 6)? {
        hemisphere if hemisphere.starts_with(positive) => Some(value),
        hemisphere if hemisphere.starts_with(negative) => Some(-value),
        _ => None,
    }
}

fn parse_fix(line: &str) -> Option<GeoPoint> {
    if line.len() < B_RECORD_MIN_LEN {
        return None;
    }
    let time = NaiveTime::from_hms_opt(
        number(line, 1, 3)?,
        number(line, 3, 5)?,
        number(line, 5, 7)?,
    )?;
    let latitude = coordinate(line, 7, 2, 'N', 'S')?;
    let longitude = coordinate(line, 15, 3, 'E', 'W')?;
    let valid = match line.get(24..25)? {
        "A" => true,
        "V" => false,
        _ => return None,
    };

    Some(GeoPoint {
        time,
        latitude,
        longitude,
        pressure_altitude: number(line, 25, 30)?,
        gnss_altitude: number(line, 30, 35)?,
        valid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "AXXXABC FLIGHT:1\r
HFDTE020816\r
HFPLTPILOTINCHARGE: Jane Doe\r
HFGTYGLIDERTYPE:ASK 21\r
HFGIDGLIDERID:D-KAAA\r
I023638FXA3940SIU\r
B1101355206343N00006198WA0058700558\r
B1101455206259N00006295WA0059300556\r
B1101555206300S00006061EV-001200000\r
LXXXsome comment\r
";

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn reads_header() {
        let track = parse_igc(SAMPLE).unwrap();
        assert_eq!(track.pilot, "Jane Doe");
        assert_eq!(track.glider_type, "ASK 21");
        assert_eq!(track.glider_id, "D-KAAA");
        assert_eq!(track.date, NaiveDate::from_ymd_opt(2016, 8, 2).unwrap());
    }

    #[test]
    fn reads_fixes_in_order() {
        let track = parse_igc(SAMPLE).unwrap();
        assert_eq!(track.points.len(), 3);

        let first = track.points[0];
        assert_eq!(first.time, NaiveTime::from_hms_opt(11, 1, 35).unwrap());
        assert!(approx_eq(first.latitude, 52.0 + 6.343 / 60.0));
        assert!(approx_eq(first.longitude, -(0.0 + 6.198 / 60.0)));
        assert_eq!(first.pressure_altitude, 587);
        assert_eq!(first.gnss_altitude, 558);
        assert!(first.valid);

        let last = track.points[2];
        assert!(last.latitude < 0.0);
        assert!(last.longitude > 0.0);
        assert_eq!(last.pressure_altitude, -12);
        assert!(!last.valid);
    }

    #[test]
    fn long_date_header() {
        let track = parse_igc("HFDTEDATE:300918,01\n").unwrap();
        assert_eq!(track.date, NaiveDate::from_ymd_opt(2018, 9, 30).unwrap());
        assert!(track.points.is_empty());
        assert_eq!(track.pilot, "");
    }

    #[test]
    fn two_digit_years_of_the_last_century() {
        let track = parse_igc("HFDTE010199\n").unwrap();
        assert_eq!(track.date, NaiveDate::from_ymd_opt(1999, 1, 1).unwrap());
    }

    #[test]
    fn century_cutoff() {
        let date = |value: &str| parse_igc(&format!("HFDTE{}\n", value)).unwrap().date;
        assert_eq!(date("010169"), NaiveDate::from_ymd_opt(1969, 1, 1).unwrap());
        assert_eq!(date("010170"), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
        assert_eq!(date("311268"), NaiveDate::from_ymd_opt(2068, 12, 31).unwrap());
        assert_eq!(date("010100"), NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
    }

    #[test]
    fn missing_date() {
        assert!(matches!(
            parse_igc("HFPLTPILOT:Jane\n"),
            Err(IgcError::MissingDate)
        ));
        assert!(matches!(parse_igc(""), Err(IgcError::MissingDate)));
    }

    #[test]
    fn malformed_fix() {
        let text = "HFDTE020816\nB1101355206343X00006198WA0058700558\n";
        assert!(matches!(
            parse_igc(text),
            Err(IgcError::MalformedRecord { kind: 'B', line: 2, .. })
        ));
        assert!(matches!(
            parse_igc("HFDTE020816\nB110135\n"),
            Err(IgcError::MalformedRecord { kind: 'B', .. })
        ));
    }

    #[test]
    fn malformed_date() {
        assert!(matches!(
            parse_igc("HFDTE321399\n"),
            Err(IgcError::MalformedRecord { kind: 'H', line: 1, .. })
        ));
    }

    #[test]
    fn first_header_wins() {
        let track = parse_igc("HFDTE020816\nHFPLTPILOT:Jane\nHOPLTPILOT:John\n").unwrap();
        assert_eq!(track.pilot, "Jane");
    }
}
