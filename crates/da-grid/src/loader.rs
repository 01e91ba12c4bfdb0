//! Plain-text map loader and writer.
//!
//! # Format
//!
//! ```text
//! # header lines may carry '#' comments
//! 5 4            # width height
//! START 0 0
//! GOAL 4 3
//! . . 3 # .
//! . # . . .      # trailing text after `width` tokens must start with '#'
//! . . . # .
//! . . . . .
//! ```
//!
//! | Token   | Meaning                        |
//! |---------|--------------------------------|
//! | `.`     | passable, cost 1               |
//! | `#`     | static obstacle                |
//! | *u32*   | passable, that terrain cost    |
//!
//! Rows are listed top to bottom starting at `y = 0` and begin right after
//! both `START` and `GOAL` have been read; up to that point a `#` starts a
//! comment.  Inside a row a lone `#` is an obstacle, and only text after the
//! `width` cell tokens may be a comment.  Blank lines are skipped everywhere.
//!
//! ## Numeric maps
//!
//! Older maps use one integer per cell: `0` free, `1` obstacle, `2` start
//! marker, `3` goal marker (both free).  A grid containing any `0` token is
//! read this way; cost 0 is never a valid terrain cost, so the two readings
//! cannot be confused.

use std::fmt::Write as _;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use da_core::Cell;

use crate::grid::{MAX_CELLS, checked_cell_count};
use crate::{GridBuilder, GridError, GridResult, MapSpec};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`MapSpec`] from a text file.
pub fn load_map(path: &Path) -> GridResult<MapSpec> {
    let file = std::fs::File::open(path)?;
    load_map_reader(file)
}

/// Like [`load_map`] but accepts any `Read` source.
///
/// Useful for testing (pass a `&[u8]` or `std::io::Cursor`).
pub fn load_map_reader<R: Read>(reader: R) -> GridResult<MapSpec> {
    let mut lines = Vec::new();
    for (i, line) in BufReader::new(reader).lines().enumerate() {
        lines.push((i + 1, line?));
    }
    parse(&lines)
}

/// Render `map` in the text format accepted by [`load_map_reader`].
pub fn write_map(map: &MapSpec) -> String {
    let grid = map.grid();
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", grid.width(), grid.height());
    let _ = writeln!(out, "START {} {}", map.start().x, map.start().y);
    let _ = writeln!(out, "GOAL {} {}", map.goal().x, map.goal().y);
    for y in 0..grid.height() {
        let row: Vec<String> = (0..grid.width())
            .map(|x| match grid.cost(Cell::new(x, y)) {
                None => "#".to_string(),
                Some(1) => ".".to_string(),
                Some(c) => c.to_string(),
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

// ── Parsing ───────────────────────────────────────────────────────────────────

fn parse(lines: &[(usize, String)]) -> GridResult<MapSpec> {
    let mut rest = lines
        .iter()
        .map(|(n, l)| (*n, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    // ── Header ────────────────────────────────────────────────────────────
    let (width, height) = loop {
        let Some((n, line)) = rest.next() else {
            return Err(parse_err(0, "missing size line"));
        };
        if line.starts_with('#') {
            continue;
        }
        let fields = header_fields(line);
        if fields.len() != 2 {
            return Err(parse_err(n, "expected `width height`"));
        }
        let (width, height) = (number(n, fields[0])?, number(n, fields[1])?);
        if checked_cell_count(width, height).is_none() {
            return Err(parse_err(
                n,
                format!("grid {width}x{height} is empty or exceeds {MAX_CELLS} cells"),
            ));
        }
        break (width, height);
    };

    let mut start = None;
    let mut goal = None;
    let mut rows: Vec<(usize, Vec<&str>)> = Vec::new();

    for (n, line) in rest {
        if start.is_none() || goal.is_none() {
            let fields = header_fields(line);
            match fields.first().copied() {
                None => {}
                Some("START") => start = Some(endpoint(n, &fields)?),
                Some("GOAL") => goal = Some(endpoint(n, &fields)?),
                Some(_) => {
                    return Err(parse_err(n, "expected START or GOAL before grid rows"));
                }
            }
            continue;
        }
        rows.push((n, grid_row(n, line, width)?));
    }

    let start = start.ok_or_else(|| parse_err(0, "missing START line"))?;
    let goal = goal.ok_or_else(|| parse_err(0, "missing GOAL line"))?;

    if rows.len() != height as usize {
        let last = rows.last().map_or(0, |(n, _)| *n);
        return Err(parse_err(
            last,
            format!("expected {height} grid rows, found {}", rows.len()),
        ));
    }

    // ── Grid ──────────────────────────────────────────────────────────────
    let numeric = rows.iter().any(|(_, r)| r.iter().any(|&t| t == "0"));
    let mut builder = GridBuilder::new(width, height);

    for (y, (n, row)) in rows.iter().enumerate() {
        for (x, &token) in row.iter().enumerate() {
            let cell = Cell::new(x as u32, y as u32);
            match (numeric, token) {
                (_, "#") => builder.add_obstacle(cell)?,
                (_, ".") => {}
                (true, "0" | "2" | "3") => {}
                (true, "1") => builder.add_obstacle(cell)?,
                (true, other) => {
                    return Err(parse_err(*n, format!("invalid numeric cell {other:?}")));
                }
                (false, other) => {
                    let cost = number(*n, other)?;
                    builder.set_cost(cell, cost)?;
                }
            }
        }
    }

    MapSpec::new(builder.build()?, start, goal)
}

/// Whitespace fields of a header line, stopping at the first `#`.
fn header_fields(line: &str) -> Vec<&str> {
    let body = line.split('#').next().unwrap_or("");
    body.split_whitespace().collect()
}

fn grid_row(n: usize, line: &str, width: u32) -> GridResult<Vec<&str>> {
    let mut tokens = line.split_whitespace();
    let row: Vec<&str> = tokens.by_ref().take(width as usize).collect();
    if row.len() != width as usize {
        return Err(parse_err(
            n,
            format!("expected {width} cells, found {}", row.len()),
        ));
    }
    if let Some(extra) = tokens.next() {
        if !extra.starts_with('#') {
            return Err(parse_err(
                n,
                format!("expected {width} cells, found trailing {extra:?}"),
            ));
        }
    }
    Ok(row)
}

fn endpoint(n: usize, fields: &[&str]) -> GridResult<Cell> {
    if fields.len() != 3 {
        return Err(parse_err(n, format!("expected `{} x y`", fields[0])));
    }
    Ok(Cell::new(number(n, fields[1])?, number(n, fields[2])?))
}

fn number(n: usize, s: &str) -> GridResult<u32> {
    s.parse::<u32>()
        .map_err(|_| parse_err(n, format!("invalid number {s:?}")))
}

fn parse_err(line: usize, message: impl Into<String>) -> GridError {
    GridError::Parse { line, message: message.into() }
}
