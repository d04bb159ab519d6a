use shared::Direction;

use crate::cli::{DirectionCommand, DirectionSubCommand};

pub fn exec(args: DirectionCommand) -> anyhow::Result<()> {
    match args.cmd {
        DirectionSubCommand::FromDegrees { degrees } => {
            let direction = Direction::from_degrees(degrees);
            log::debug!("{}° -> {}", degrees, direction);
            println!("{}", direction);
        }
        DirectionSubCommand::ToDegrees { direction } => {
            println!("{}", direction.degrees());
        }
    }
    Ok(())
}
