use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use shared::sessions::{PowerLevel, Sport, TableKind};
use shared::Direction;

#[derive(Debug, Parser)]
#[command(about = "Windlog CLI: log windsurf and wingfoil sessions.")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Cell color of a wind speed in knots
    Color(ColorArgs),
    Direction(DirectionCommand),
    Session(SessionCommand),
    /// Store the API access token
    Login {
        #[arg(long, env = "WINDLOG_ACCESS_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Remove the stored access token
    Logout,
    /// Tell whether an access token is stored
    Status,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorFormat {
    Css,
    Hex,
    Hsl,
}

#[derive(Debug, Parser)]
pub struct ColorArgs {
    /// Raw cell text; anything that is not a number is an empty cell
    #[arg(allow_hyphen_values = true)]
    pub speed: String,
    #[arg(long, value_enum, default_value_t = ColorFormat::Css)]
    pub format: ColorFormat,
}

#[derive(Debug, Parser)]
pub struct DirectionCommand {
    #[command(subcommand)]
    pub cmd: DirectionSubCommand,
}

#[derive(Debug, Subcommand)]
pub enum DirectionSubCommand {
    /// Snap a bearing to the nearest compass direction
    FromDegrees {
        #[arg(allow_hyphen_values = true)]
        degrees: f64,
    },
    /// Bearing of a compass direction
    ToDegrees { direction: Direction },
}

#[derive(Debug, Parser)]
pub struct SessionCommand {
    #[command(subcommand)]
    pub cmd: SessionSubCommand,
}

#[derive(Debug, Subcommand)]
pub enum SessionSubCommand {
    /// Write a blank session with empty wind tables
    New(NewSessionArgs),
    /// Validate a session file and print its wind tables
    Show { file: PathBuf },
    /// Edit one hour of a wind table in place
    Set(SetWindArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SportArg {
    Windsurfing,
    Wingfoiling,
}

impl From<SportArg> for Sport {
    fn from(sport: SportArg) -> Self {
        match sport {
            SportArg::Windsurfing => Sport::Windsurfing,
            SportArg::Wingfoiling => Sport::Wingfoiling,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PowerArg {
    Underpowered,
    Wellpowered,
    Overpowered,
}

impl From<PowerArg> for PowerLevel {
    fn from(power: PowerArg) -> Self {
        match power {
            PowerArg::Underpowered => PowerLevel::Underpowered,
            PowerArg::Wellpowered => PowerLevel::Wellpowered,
            PowerArg::Overpowered => PowerLevel::Overpowered,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TableArg {
    Forecast,
    Actual,
}

impl From<TableArg> for TableKind {
    fn from(table: TableArg) -> Self {
        match table {
            TableArg::Forecast => TableKind::Forecast,
            TableArg::Actual => TableKind::Actual,
        }
    }
}

#[derive(Debug, Parser)]
pub struct NewSessionArgs {
    /// Session day, defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Start time (HH:MM)
    #[arg(long)]
    pub start: NaiveTime,
    /// End time (HH:MM)
    #[arg(long)]
    pub end: NaiveTime,
    #[arg(long)]
    pub location: String,
    #[arg(long, value_enum)]
    pub sport: SportArg,
    #[arg(long)]
    pub equipment: String,
    #[arg(long, value_enum)]
    pub power: PowerArg,
    /// Write to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct SetWindArgs {
    pub file: PathBuf,
    #[arg(long, value_enum)]
    pub table: TableArg,
    #[arg(long)]
    pub hour: u8,
    /// Average speed in knots, empty to clear
    #[arg(long, allow_hyphen_values = true)]
    pub avg: Option<String>,
    /// Gust speed in knots, empty to clear
    #[arg(long, allow_hyphen_values = true)]
    pub gust: Option<String>,
    /// Compass direction (N, NE, ...), empty to clear
    #[arg(long)]
    pub direction: Option<String>,
}
