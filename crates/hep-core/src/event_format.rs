//! Text event format shared with reference datasets.
//!
//! ```text
//! Event 1
//! 001 |  13 | Initial Beam | (E:   45.594, px:    0.000, py:    0.000, pz:   45.594)
//! 001 | -13 | Initial Beam | (E:   45.594, px:    0.000, py:    0.000, pz:  -45.594)
//! 001 |  11 | Collision    | (E:   45.594, px:   12.301, py:  -20.113, pz:   38.007)
//! 001 | -11 | Collision    | (E:   45.594, px:  -12.301, py:   20.113, pz:  -38.007)
//!
//! ```
//!
//! Columns: event id zero-padded to three digits, PDG code right-aligned in
//! three, lineage label left-aligned in twelve, then the four-momentum with
//! three decimals. The parser tolerates leading indentation and arbitrary
//! labels (reference files may carry particle names there).

use crate::event::Event;
use crate::observable::Measured;
use crate::particle::Lineage;
use hep_common::{Error, EventId, FourMomentum, ParticleId, Result};
use regex::Regex;
use std::io::Write;
use std::path::Path;

const HEADER_PATTERN: &str = r"^Event\s+(\d+)$";
const PARTICLE_PATTERN: &str = r"^(\d+)\s*\|\s*([+-]?\d+)\s*\|\s*(.*?)\s*\|\s*\(E:\s*([^,]+?)\s*,\s*px:\s*([^,]+?)\s*,\s*py:\s*([^,]+?)\s*,\s*pz:\s*([^)]+?)\s*\)$";

const LABEL_INITIAL_BEAM: &str = "Initial Beam";
const LABEL_COLLISION: &str = "Collision";
const LABEL_PARENT_PREFIX: &str = "Parent ";

// ============================================================================
// Writing
// ============================================================================

/// Text label for a lineage.
///
/// `NoParent` and `InitialBeam` share the "Initial Beam" label.
pub fn lineage_label(lineage: &Lineage) -> String {
    match lineage {
        Lineage::NoParent | Lineage::InitialBeam => LABEL_INITIAL_BEAM.to_string(),
        Lineage::CollisionProduct => LABEL_COLLISION.to_string(),
        Lineage::Parent(id) => format!("{}{}", LABEL_PARENT_PREFIX, id.index),
    }
}

/// Format one particle line.
pub fn format_particle_line(
    event: EventId,
    pdg: i32,
    label: &str,
    momentum: &FourMomentum,
) -> String {
    format!("{} | {:>3} | {:<12} | {}", event, pdg, label, momentum)
}

/// Write events in the text format.
pub fn write_events<W: Write>(mut writer: W, events: &[Event]) -> Result<()> {
    for event in events {
        writeln!(writer, "Event {}", event.id().0)?;
        for particle in event.particles() {
            let line = format_particle_line(
                event.id(),
                particle.pdg(),
                &lineage_label(&particle.lineage()),
                particle.momentum(),
            );
            writeln!(writer, "{}", line)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render events to a string.
pub fn events_to_string(events: &[Event]) -> Result<String> {
    let mut buf = Vec::new();
    write_events(&mut buf, events)?;
    String::from_utf8(buf).map_err(|e| Error::Parse {
        line: 0,
        message: format!("non-UTF-8 output: {}", e),
    })
}

/// Write events to a file, replacing it.
pub fn write_events_file(path: &Path, events: &[Event]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_events(std::io::BufWriter::new(file), events)
}

// ============================================================================
// Parsing
// ============================================================================

/// One particle line read back from text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedParticle {
    pub event: EventId,
    /// 0-based position within its event.
    pub index: u32,
    pub pdg: i32,
    /// Raw lineage column, trimmed.
    pub label: String,
    pub momentum: FourMomentum,
}

impl ParsedParticle {
    /// Interpret the label column; `None` for labels this format does not
    /// define (e.g. particle names in external reference files).
    pub fn lineage(&self) -> Option<Lineage> {
        match self.label.as_str() {
            LABEL_INITIAL_BEAM => Some(Lineage::InitialBeam),
            LABEL_COLLISION => Some(Lineage::CollisionProduct),
            other => other
                .strip_prefix(LABEL_PARENT_PREFIX)
                .and_then(|idx| idx.trim().parse::<u32>().ok())
                .map(|idx| Lineage::Parent(ParticleId::new(self.event, idx))),
        }
    }
}

impl Measured for ParsedParticle {
    fn pdg(&self) -> i32 {
        self.pdg
    }

    fn momentum(&self) -> &FourMomentum {
        &self.momentum
    }
}

/// One event read back from text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEvent {
    pub id: EventId,
    pub particles: Vec<ParsedParticle>,
}

/// Line-oriented parser for the text format.
pub struct EventTextParser {
    header: Regex,
    particle: Regex,
}

impl EventTextParser {
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| Error::Parse {
                line: 0,
                message: format!("invalid pattern: {}", e),
            })
        };
        Ok(Self {
            header: compile(HEADER_PATTERN)?,
            particle: compile(PARTICLE_PATTERN)?,
        })
    }

    /// Parse a whole document.
    ///
    /// Fails with [`Error::Parse`] (1-based line number) on a malformed
    /// header or particle line, a particle line before the first header,
    /// or a particle whose event id disagrees with its header.
    pub fn parse(&self, text: &str) -> Result<Vec<ParsedEvent>> {
        let mut events: Vec<ParsedEvent> = Vec::new();

        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with("Event") {
                let caps = self
                    .header
                    .captures(line)
                    .ok_or_else(|| parse_error(line_no, format!("malformed header '{}'", line)))?;
                let id = parse_number::<u32>(&caps[1], "event id", line_no)?;
                events.push(ParsedEvent {
                    id: EventId(id),
                    particles: Vec::new(),
                });
                continue;
            }

            let current = events.last_mut().ok_or_else(|| {
                parse_error(line_no, "particle line before the first 'Event' header")
            })?;
            let particle = self.parse_particle(line, line_no, current)?;
            current.particles.push(particle);
        }

        Ok(events)
    }

    fn parse_particle(
        &self,
        line: &str,
        line_no: usize,
        current: &ParsedEvent,
    ) -> Result<ParsedParticle> {
        let caps = self
            .particle
            .captures(line)
            .ok_or_else(|| parse_error(line_no, format!("malformed particle line '{}'", line)))?;

        let event = EventId(parse_number::<u32>(&caps[1], "event id", line_no)?);
        if event != current.id {
            return Err(parse_error(
                line_no,
                format!(
                    "particle event id {} does not match header {}",
                    event.0, current.id.0
                ),
            ));
        }

        Ok(ParsedParticle {
            event,
            index: current.particles.len() as u32,
            pdg: parse_number::<i32>(&caps[2], "PDG code", line_no)?,
            label: caps[3].to_string(),
            momentum: FourMomentum::new(
                parse_number::<f64>(&caps[4], "E", line_no)?,
                parse_number::<f64>(&caps[5], "px", line_no)?,
                parse_number::<f64>(&caps[6], "py", line_no)?,
                parse_number::<f64>(&caps[7], "pz", line_no)?,
            ),
        })
    }
}

/// Parse a document in the text format.
pub fn parse_events(text: &str) -> Result<Vec<ParsedEvent>> {
    EventTextParser::new()?.parse(text)
}

/// Read and parse a file in the text format.
pub fn read_events(path: &Path) -> Result<Vec<ParsedEvent>> {
    let text = std::fs::read_to_string(path)?;
    parse_events(&text)
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}

fn parse_number<T: std::str::FromStr>(text: &str, what: &str, line: usize) -> Result<T> {
    text.trim()
        .parse::<T>()
        .map_err(|_| parse_error(line, format!("invalid {} '{}'", what, text.trim())))
}
