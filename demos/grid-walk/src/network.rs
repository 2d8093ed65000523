//! Synthetic downtown street grid.
//!
//! Six east–west streets crossed by six north–south avenues, ~150 m apart,
//! loosely following downtown Mobile, Alabama.  Government Street is a
//! primary road; a footpath runs diagonally through the square.

use wr_network::{RawNetwork, RawNode, RawWay};

pub const ROWS: usize = 6;
pub const COLS: usize = 6;

const ORIGIN_LAT: f64 = 30.6880;
const ORIGIN_LON: f64 = -88.0480;
const STEP_LAT:   f64 = 0.00135; // ~150 m
const STEP_LON:   f64 = 0.00156; // ~150 m at this latitude

const STREETS: [(&str, &str); ROWS] = [
    ("Church Street",     "residential"),
    ("Government Street", "primary"),
    ("Conti Street",      "residential"),
    ("Dauphin Street",    "tertiary"),
    ("St Francis Street", "residential"),
    ("St Michael Street", "living_street"),
];

const AVENUES: [(&str, &str); COLS] = [
    ("Cedar Street",    "residential"),
    ("Claiborne Street","residential"),
    ("Jackson Street",  "residential"),
    ("Conception Street","tertiary"),
    ("Joachim Street",  "residential"),
    ("Royal Street",    "secondary"),
];

/// Supplier id of the intersection at `(row, col)`.
pub fn intersection(row: usize, col: usize) -> i64 {
    10_000 + (row * COLS + col) as i64
}

/// Latitude/longitude of the intersection at `(row, col)`.
pub fn position(row: usize, col: usize) -> (f64, f64) {
    (ORIGIN_LAT + row as f64 * STEP_LAT, ORIGIN_LON + col as f64 * STEP_LON)
}

pub fn build_raw() -> RawNetwork {
    let mut nodes = Vec::with_capacity(ROWS * COLS);
    for r in 0..ROWS {
        for c in 0..COLS {
            let (lat, lon) = position(r, c);
            nodes.push(RawNode::new(intersection(r, c), lat, lon));
        }
    }

    let mut ways = Vec::new();
    for (r, (name, highway)) in STREETS.iter().enumerate() {
        let members = (0..COLS).map(|c| intersection(r, c)).collect();
        ways.push(RawWay::new(100 + r as i64, members).with_tag("highway", *highway).with_tag("name", *name));
    }
    for (c, (name, highway)) in AVENUES.iter().enumerate() {
        let members = (0..ROWS).map(|r| intersection(r, c)).collect();
        ways.push(RawWay::new(200 + c as i64, members).with_tag("highway", *highway).with_tag("name", *name));
    }

    // Bienville Square: a footpath cutting the block diagonally.
    ways.push(
        RawWay::new(300, vec![intersection(2, 2), intersection(3, 3)])
            .with_tag("highway", "footway")
            .with_tag("name", "Bienville Square"),
    );
    // A service alley clipped at the extract edge: the second node is absent.
    ways.push(RawWay::new(301, vec![intersection(5, 5), 99_999]).with_tag("highway", "service"));

    RawNetwork::new(nodes, ways)
}
