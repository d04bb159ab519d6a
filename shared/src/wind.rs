use std::fmt;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::colors::{speed_to_color, CellColor};
use crate::directions::Direction;

/// One hour of wind, as entered in the table. Absent fields have not been
/// entered yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindValue {
    #[serde(default)]
    pub average_speed_kts: Option<f64>,
    #[serde(default)]
    pub gust_speed_kts: Option<f64>,
    #[serde(default)]
    pub direction_degrees: Option<f64>,
}

/// A single field edit coming from the table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindEdit {
    Average(Option<f64>),
    Gust(Option<f64>),
    Direction(Option<Direction>),
}

impl WindValue {
    /// Copy of this value with one field replaced.
    pub fn merged(&self, edit: WindEdit) -> WindValue {
        match edit {
            WindEdit::Average(kts) => WindValue {
                average_speed_kts: kts,
                ..*self
            },
            WindEdit::Gust(kts) => WindValue {
                gust_speed_kts: kts,
                ..*self
            },
            WindEdit::Direction(direction) => WindValue {
                direction_degrees: direction.map(|d| d.degrees() as f64),
                ..*self
            },
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction_degrees.map(Direction::from_degrees)
    }

    pub fn average_color(&self) -> CellColor {
        speed_to_color(self.average_speed_kts.unwrap_or(f64::NAN))
    }

    pub fn gust_color(&self) -> CellColor {
        speed_to_color(self.gust_speed_kts.unwrap_or(f64::NAN))
    }

    pub fn is_empty(&self) -> bool {
        *self == WindValue::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

/// Column header: two-digit 12-hour clock plus AM/PM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HourLabel {
    pub hour_12: u8,
    pub meridiem: Meridiem,
}

impl HourLabel {
    pub fn new(hour: u8) -> Self {
        Self {
            hour_12: ((hour % 24 + 11) % 12) + 1,
            meridiem: if hour % 24 < 12 {
                Meridiem::Am
            } else {
                Meridiem::Pm
            },
        }
    }
}

impl fmt::Display for HourLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meridiem = match self.meridiem {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        };
        write!(f, "{:02} {}", self.hour_12, meridiem)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct WindColumn {
    pub hour: u8,
    #[serde(flatten)]
    pub value: WindValue,
}

impl WindColumn {
    pub fn hour_label(&self) -> HourLabel {
        HourLabel::new(self.hour)
    }
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[display(fmt = "hour {} is not part of the wind table", _0)]
pub struct UnknownHour(pub u8);

impl std::error::Error for UnknownHour {}

/// Wind columns for consecutive hours of a session.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct WindTable {
    columns: Vec<WindColumn>,
}

impl WindTable {
    /// Blank columns for `first..=last`. `None` when the range is inverted or
    /// runs past the end of the day.
    pub fn for_hours(first: u8, last: u8) -> Option<WindTable> {
        if last < first || last > 23 {
            return None;
        }
        let columns = (first..=last)
            .map(|hour| WindColumn {
                hour,
                value: WindValue::default(),
            })
            .collect();
        Some(WindTable { columns })
    }

    pub fn columns(&self) -> &[WindColumn] {
        &self.columns
    }

    pub fn hours(&self) -> Vec<u8> {
        self.columns.iter().map(|c| c.hour).collect()
    }

    pub fn get(&self, hour: u8) -> Option<&WindValue> {
        self.columns
            .iter()
            .find(|c| c.hour == hour)
            .map(|c| &c.value)
    }

    /// Replace the value of `hour` with its merge of `edit`.
    pub fn apply(&mut self, hour: u8, edit: WindEdit) -> Result<(), UnknownHour> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.hour == hour)
            .ok_or(UnknownHour(hour))?;
        column.value = column.value.merged(edit);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
