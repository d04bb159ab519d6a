use chrono::{NaiveDate, NaiveTime, Timelike};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::wind::WindTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Windsurfing,
    Wingfoiling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerLevel {
    Underpowered,
    Wellpowered,
    Overpowered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
    Forecast,
    Actual,
}

#[derive(Clone, Debug, Display, PartialEq, Eq)]
#[display(fmt = "{}: {}", field, message)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::error::Error for FieldError {}

/// A logged session with its forecast and observed wind.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionForm {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub sport: Sport,
    pub equipment: String,
    pub power_level: PowerLevel,
    #[serde(default)]
    pub forecast: WindTable,
    #[serde(default)]
    pub actual: WindTable,
}

impl SessionForm {
    pub fn new(
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        location: String,
        sport: Sport,
        equipment: String,
        power_level: PowerLevel,
    ) -> Self {
        let table = WindTable::for_hours(start_time.hour() as u8, end_time.hour() as u8)
            .unwrap_or_default();
        Self {
            date,
            start_time,
            end_time,
            location,
            sport,
            equipment,
            power_level,
            forecast: table.clone(),
            actual: table,
        }
    }

    /// Hours covered by the session, from the start hour to the end hour.
    pub fn hours(&self) -> Vec<u8> {
        (self.start_time.hour() as u8..=self.end_time.hour() as u8).collect()
    }

    pub fn table(&self, kind: TableKind) -> &WindTable {
        match kind {
            TableKind::Forecast => &self.forecast,
            TableKind::Actual => &self.actual,
        }
    }

    pub fn table_mut(&mut self, kind: TableKind) -> &mut WindTable {
        match kind {
            TableKind::Forecast => &mut self.forecast,
            TableKind::Actual => &mut self.actual,
        }
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.location.trim().is_empty() {
            errors.push(FieldError::new("location", "is required"));
        }
        if self.equipment.trim().is_empty() {
            errors.push(FieldError::new("equipment", "is required"));
        }
        if self.end_time < self.start_time {
            errors.push(FieldError::new("endTime", "must not be before the start time"));
        } else {
            let hours = self.hours();
            for (field, table) in [("forecast", &self.forecast), ("actual", &self.actual)] {
                if table.hours() != hours {
                    errors.push(FieldError::new(
                        field,
                        format!(
                            "must cover hours {} to {}",
                            self.start_time.hour(),
                            self.end_time.hour()
                        ),
                    ));
                }
            }
        }

        for (field, table) in [("forecast", &self.forecast), ("actual", &self.actual)] {
            for column in table.columns() {
                let speeds = [column.value.average_speed_kts, column.value.gust_speed_kts];
                if speeds.iter().flatten().any(|kts| !kts.is_finite() || *kts < 0.0) {
                    errors.push(FieldError::new(
                        field,
                        format!("hour {}: speeds must be non-negative numbers", column.hour),
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
