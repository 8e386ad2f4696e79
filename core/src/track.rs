//! Sporparser: GPX-lignende XML → ordnet sekvens av `TrackPoint`.
//!
//! Toleransepolicy: manglende/ugyldig høyde, puls eller tid på et punkt gir `None`
//! for feltet. Punkter uten gyldig lat/lon hoppes over. Kun et spor helt uten
//! punkter er fatalt.

use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::ParseError;
use crate::types::{Track, TrackPoint};

const TRACKPOINT_TAG: &str = "trkpt";
const NAME_TAG: &str = "name";

const ELEVATION_TAGS: &[&str] = &["ele"];
const TIME_TAGS: &[&str] = &["time"];
/// Garmin TrackPointExtension først, deretter enhver annen `hr` (ns3:hr, bar hr, ...).
const HEART_RATE_TAGS: &[&str] = &["gpxtpx:hr", "hr"];

/// Punkt under oppbygging: lat/lon fra attributter + rå tekst fra barne-elementer.
#[derive(Debug, Default)]
struct PointDraft {
    lat: Option<f64>,
    lon: Option<f64>,
    fields: Vec<(String, String)>,
}

impl PointDraft {
    fn from_start(e: &BytesStart<'_>) -> Self {
        let mut draft = PointDraft::default();
        for attr in e.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let Ok(val) = attr.unescape_value() else { continue };
            match key.as_str() {
                "lat" => draft.lat = val.trim().parse::<f64>().ok(),
                "lon" => draft.lon = val.trim().parse::<f64>().ok(),
                _ => {}
            }
        }
        draft
    }

    fn field(&self, tags: &[&str]) -> Option<&str> {
        tags.iter().find_map(|tag| {
            self.fields
                .iter()
                .find(|(name, _)| tag_matches(name, tag))
                .map(|(_, v)| v.as_str())
        })
    }

    fn finish(self, index: usize) -> Option<TrackPoint> {
        let (lat, lon) = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) if valid_coord(lat, lon) => (lat, lon),
            _ => {
                log::warn!("trackpoint #{index} mangler gyldig lat/lon – hoppes over");
                return None;
            }
        };

        Some(TrackPoint {
            latitude: lat,
            longitude: lon,
            elevation: self.field(ELEVATION_TAGS).and_then(parse_elevation),
            heart_rate: self.field(HEART_RATE_TAGS).and_then(parse_heart_rate),
            timestamp: self.field(TIME_TAGS).and_then(parse_timestamp),
        })
    }
}

/// Prefiksert tag (`gpxtpx:hr`) må treffe eksakt; uprefiksert (`hr`) treffer lokalnavnet.
fn tag_matches(qname: &str, tag: &str) -> bool {
    if tag.contains(':') {
        qname == tag
    } else {
        local_part(qname) == tag
    }
}

fn local_part(qname: &str) -> &str {
    qname.rsplit(':').next().unwrap_or(qname)
}

fn valid_coord(lat: f64, lon: f64) -> bool {
    lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon)
}

fn parse_elevation(txt: &str) -> Option<f64> {
    txt.trim().parse::<f64>().ok().filter(|e| e.is_finite())
}

/// 0 bpm er sensorbortfall, ikke en måling.
fn parse_heart_rate(txt: &str) -> Option<u32> {
    let hr = txt.trim().parse::<f64>().ok()?;
    if hr.is_finite() && hr >= 1.0 {
        Some(hr.round() as u32)
    } else {
        None
    }
}

fn parse_timestamp(txt: &str) -> Option<DateTime<Utc>> {
    let t = txt.trim();
    DateTime::parse_from_rfc3339(t)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        // enkelte enheter dropper tidssone – tolkes som UTC
        .or_else(|| {
            NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn qname_of(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// Full parse: navn (hvis oppgitt) + punkter.
pub fn parse_track(raw: &str) -> Result<Track, ParseError> {
    let mut reader = Reader::from_str(raw);
    reader.trim_text(true);
    // leverandør-quirks: ikke avvis dokumenter med feil sluttnavn
    reader.check_end_names(false);

    let mut track = Track::default();
    let mut stack: Vec<String> = Vec::new();
    let mut current: Option<PointDraft> = None;
    let mut seen = 0usize;

    loop {
        let event = match reader.read_event() {
            Ok(ev) => ev,
            Err(e) => {
                let position = reader.buffer_position();
                if track.points.is_empty() {
                    return Err(ParseError::Malformed { position, message: e.to_string() });
                }
                log::warn!(
                    "sporlogg brutt ved byte {position} ({e}); beholder {} punkter",
                    track.points.len()
                );
                break;
            }
        };

        match event {
            Event::Start(e) => {
                let qname = qname_of(&e);
                if local_part(&qname) == TRACKPOINT_TAG {
                    current = Some(PointDraft::from_start(&e));
                }
                stack.push(qname);
            }
            Event::Empty(e) => {
                // <trkpt lat=".." lon=".."/> uten barn
                if local_part(&qname_of(&e)) == TRACKPOINT_TAG {
                    seen += 1;
                    if let Some(p) = PointDraft::from_start(&e).finish(seen) {
                        track.points.push(p);
                    }
                }
            }
            Event::Text(t) => {
                let Ok(txt) = t.unescape() else { continue };
                capture_text(&mut track, current.as_mut(), &stack, &txt);
            }
            Event::CData(c) => {
                let txt = String::from_utf8_lossy(&c.into_inner()).into_owned();
                capture_text(&mut track, current.as_mut(), &stack, &txt);
            }
            Event::End(e) => {
                let closing = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.pop();
                if local_part(&closing) == TRACKPOINT_TAG {
                    if let Some(draft) = current.take() {
                        seen += 1;
                        if let Some(p) = draft.finish(seen) {
                            track.points.push(p);
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if track.points.is_empty() {
        return Err(ParseError::NoTrackPoints);
    }

    log::debug!(
        "parse_track: {} punkter ({} forkastet), navn={:?}",
        track.points.len(),
        seen.saturating_sub(track.points.len()),
        track.name
    );
    Ok(track)
}

fn capture_text(track: &mut Track, current: Option<&mut PointDraft>, stack: &[String], txt: &str) {
    let Some(open) = stack.last() else { return };
    match current {
        Some(draft) => draft.fields.push((open.clone(), txt.to_string())),
        None => {
            if track.name.is_none() && local_part(open) == NAME_TAG {
                let name = txt.trim();
                if !name.is_empty() {
                    track.name = Some(name.to_string());
                }
            }
        }
    }
}

/// Kun punktene, i loggrekkefølge.
pub fn parse_track_points(raw: &str) -> Result<Vec<TrackPoint>, ParseError> {
    parse_track(raw).map(|t| t.points)
}
