//! Planet Wars wire format.
//!
//! A turn is a block of lines terminated by `go`:
//!
//! ```text
//! P <x> <y> <owner> <ships> <growth>
//! F <owner> <ships> <source> <destination> <total_turns> <turns_remaining>
//! ```
//!
//! Planets and fleets are numbered by their order of appearance. `#` starts a comment and blank
//! lines are ignored. The bot answers with one `<source> <destination> <ships>` line per order and
//! a final `go`.

use std::io::{self, Write};

use thiserror::Error;

use pw_core::{Fleet, FleetId, GameState, Order, Owner, Planet, PlanetId, Ships, Turns};

/// Errors while decoding a turn.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProtocolError {
    #[error("line {line}: unknown record `{tag}`")]
    UnknownRecord { line: usize, tag: String },

    #[error("line {line}: `{tag}` record needs {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        tag: char,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid {field} `{value}`")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: fleet refers to unknown planet {planet}")]
    UnknownPlanet { line: usize, planet: u32 },
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Decode one turn (without its `go` line) into a snapshot.
pub fn parse_state(text: &str) -> Result<GameState> {
    let mut planets = Vec::new();
    let mut fleets = Vec::new();
    // Fleet references are checked once every planet is known.
    let mut fleet_lines = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        let mut tokens = content.split_whitespace();
        let Some(tag) = tokens.next() else {
            continue;
        };
        let fields: Vec<&str> = tokens.collect();

        match tag {
            "P" => {
                expect_fields(line, 'P', &fields, 5)?;
                let id = PlanetId(planets.len() as u32);
                planets.push(Planet {
                    id,
                    x: number(line, "x", fields[0])?,
                    y: number(line, "y", fields[1])?,
                    owner: owner(line, fields[2])?,
                    ships: count(line, "ship count", fields[3])?,
                    growth: count(line, "growth rate", fields[4])?,
                });
            }
            "F" => {
                expect_fields(line, 'F', &fields, 6)?;
                let id = FleetId(fleets.len() as u32);
                fleets.push(Fleet {
                    id,
                    owner: owner(line, fields[0])?,
                    ships: count(line, "ship count", fields[1])?,
                    source: PlanetId(number(line, "source planet", fields[2])?),
                    destination: PlanetId(number(line, "destination planet", fields[3])?),
                    total_turns: count(line, "trip length", fields[4])?,
                    turns_remaining: count(line, "turns remaining", fields[5])?,
                });
                fleet_lines.push(line);
            }
            other => {
                return Err(ProtocolError::UnknownRecord {
                    line,
                    tag: other.to_string(),
                })
            }
        }
    }

    for (fleet, &line) in fleets.iter().zip(&fleet_lines) {
        for planet in [fleet.source, fleet.destination] {
            if planet.index() >= planets.len() {
                return Err(ProtocolError::UnknownPlanet {
                    line,
                    planet: planet.0,
                });
            }
        }
    }

    Ok(GameState::new(planets, fleets))
}

fn expect_fields(line: usize, tag: char, fields: &[&str], expected: usize) -> Result<()> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(ProtocolError::FieldCount {
            line,
            tag,
            expected,
            found: fields.len(),
        })
    }
}

fn number<T: std::str::FromStr>(line: usize, field: &'static str, value: &str) -> Result<T> {
    value.parse().map_err(|_| ProtocolError::InvalidField {
        line,
        field,
        value: value.to_string(),
    })
}

/// Largest ship count, growth rate or turn number accepted on the wire. Sums and growth
/// projections over a parsed snapshot stay inside `i64` below it.
pub const MAX_COUNT: Ships = i32::MAX as Ships;

/// Integer field in `0..=MAX_COUNT`.
fn count(line: usize, field: &'static str, value: &str) -> Result<Ships> {
    let parsed: Turns = number(line, field, value)?;
    if !(0..=MAX_COUNT).contains(&parsed) {
        return Err(ProtocolError::InvalidField {
            line,
            field,
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

fn owner(line: usize, value: &str) -> Result<Owner> {
    value
        .parse::<u8>()
        .ok()
        .and_then(Owner::from_wire)
        .ok_or_else(|| ProtocolError::InvalidField {
            line,
            field: "owner",
            value: value.to_string(),
        })
}

/// Write the orders for one turn followed by `go`, then flush.
pub fn write_orders<W: Write>(out: &mut W, orders: &[Order]) -> io::Result<()> {
    for order in orders {
        writeln!(
            out,
            "{} {} {}",
            order.source.0, order.destination.0, order.ships
        )?;
    }
    writeln!(out, "go")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let state = parse_state("# map 7\n\nP 0 0 1 34 2 # home\n").expect("valid turn");
        assert_eq!(pw_core::Snapshot::planets(&state).len(), 1);
    }

    #[test]
    fn negative_counts_are_rejected() {
        let err = parse_state("P 0 0 1 -3 2\n").unwrap_err();
        assert_eq!(
            err,
            ProtocolError::InvalidField {
                line: 1,
                field: "ship count",
                value: "-3".to_string(),
            }
        );
    }

    #[test]
    fn orders_end_with_go() {
        let mut out = Vec::new();
        let order = Order {
            source: PlanetId(3),
            destination: PlanetId(7),
            ships: 12,
            arrival_turns: 5,
        };
        write_orders(&mut out, &[order]).expect("write to memory");
        assert_eq!(String::from_utf8(out).expect("utf8"), "3 7 12\ngo\n");
    }
}
