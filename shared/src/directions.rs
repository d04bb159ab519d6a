use std::fmt;
use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Eight-point compass direction the wind blows from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

#[derive(Clone, Debug, Display, PartialEq, Eq)]
#[display(fmt = "unknown compass direction {:?}", _0)]
pub struct ParseDirectionError(pub String);

impl std::error::Error for ParseDirectionError {}

impl Direction {
    /// Clockwise from north, 45° apart.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub fn index(self) -> usize {
        match self {
            Direction::N => 0,
            Direction::NE => 1,
            Direction::E => 2,
            Direction::SE => 3,
            Direction::S => 4,
            Direction::SW => 5,
            Direction::W => 6,
            Direction::NW => 7,
        }
    }

    pub fn degrees(self) -> u16 {
        self.index() as u16 * 45
    }

    /// Snap any bearing to the nearest direction. Bearings wrap around 360 in
    /// both directions and halfway values round up, so 22.5° is NE. Non-finite
    /// bearings give N.
    pub fn from_degrees(degrees: f64) -> Direction {
        if !degrees.is_finite() {
            return Direction::N;
        }
        let sector = (degrees.rem_euclid(360.0) / 45.0).round() as usize;
        Self::ALL[sector % 8]
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.label() == label)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_table() {
        let degrees: Vec<u16> = Direction::ALL.iter().map(|d| d.degrees()).collect();
        assert_eq!(degrees, vec![0, 45, 90, 135, 180, 225, 270, 315]);
    }

    #[test]
    fn test_round_trip_on_multiples_of_45() {
        for d in (0..360).step_by(45) {
            assert_eq!(Direction::from_degrees(d as f64).degrees(), d as u16);
        }
    }

    #[test]
    fn test_wraparound() {
        assert_eq!(Direction::from_degrees(360.0), Direction::from_degrees(0.0));
        assert_eq!(Direction::from_degrees(720.0), Direction::N);
        assert_eq!(Direction::from_degrees(405.0), Direction::NE);
    }

    #[test]
    fn test_negative_wraparound() {
        assert_eq!(Direction::from_degrees(-45.0), Direction::from_degrees(315.0));
        assert_eq!(Direction::from_degrees(-90.0), Direction::W);
        assert_eq!(Direction::from_degrees(-1.0), Direction::N);
    }

    #[test]
    fn test_halfway_rounds_up() {
        assert_eq!(Direction::from_degrees(22.5), Direction::NE);
        assert_eq!(Direction::from_degrees(67.5), Direction::E);
        assert_eq!(Direction::from_degrees(337.5), Direction::N);
        // -22.5 wraps to 337.5 first
        assert_eq!(Direction::from_degrees(-22.5), Direction::N);
    }

    #[test]
    fn test_snaps_to_nearest() {
        assert_eq!(Direction::from_degrees(22.4), Direction::N);
        assert_eq!(Direction::from_degrees(100.0), Direction::E);
        assert_eq!(Direction::from_degrees(200.0), Direction::S);
        assert_eq!(Direction::from_degrees(250.0), Direction::W);
    }

    #[test]
    fn test_non_finite_is_north() {
        assert_eq!(Direction::from_degrees(f64::NAN), Direction::N);
        assert_eq!(Direction::from_degrees(f64::INFINITY), Direction::N);
    }

    #[test]
    fn test_parse_label() {
        assert_eq!("NE".parse::<Direction>(), Ok(Direction::NE));
        assert_eq!(" sw ".parse::<Direction>(), Ok(Direction::SW));
        assert_eq!(
            "NNE".parse::<Direction>(),
            Err(ParseDirectionError("NNE".to_string()))
        );
        for d in Direction::ALL {
            assert_eq!(d.to_string().parse::<Direction>(), Ok(d));
        }
    }

    #[test]
    fn test_serde_uses_labels() {
        assert_eq!(serde_json::to_string(&Direction::SE).unwrap(), "\"SE\"");
        let d: Direction = serde_json::from_str("\"NW\"").unwrap();
        assert_eq!(d, Direction::NW);
    }
}
