use shared::colors::CellColor;
use shared::{parse_speed, speed_to_color};

use crate::cli::{ColorArgs, ColorFormat};

pub fn exec(args: ColorArgs) -> anyhow::Result<()> {
    let kts = parse_speed(&args.speed);
    let color = speed_to_color(kts);
    log::debug!("{:?} kts -> {:?}", kts, color);

    println!("{}", render(&color, args.format));
    Ok(())
}

pub fn render(color: &CellColor, format: ColorFormat) -> String {
    match format {
        ColorFormat::Css => color.css(),
        ColorFormat::Hex => color.hex(),
        ColorFormat::Hsl => {
            let hsl = color.hsl();
            format!(
                "hsl({:.1} {:.1}% {:.1}%)",
                hsl.h,
                hsl.s * 100.0,
                hsl.l * 100.0
            )
        }
    }
}
