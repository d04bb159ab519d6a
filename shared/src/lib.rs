//! Domain logic shared by the windlog front ends: wind speed colors,
//! compass directions, hourly wind observations and session forms.

pub mod colors;
pub mod directions;
pub mod sessions;
pub mod wind;

pub use colors::{default_scale, parse_speed, speed_to_color, CellColor, Swatch};
pub use directions::Direction;
