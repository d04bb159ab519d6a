use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use shared::sessions::SessionForm;
use shared::wind::{WindColumn, WindEdit, WindTable};
use shared::{parse_speed, Direction};

use crate::cli::{NewSessionArgs, SessionCommand, SessionSubCommand, SetWindArgs};

pub fn exec(args: SessionCommand) -> Result<()> {
    match args.cmd {
        SessionSubCommand::New(new_args) => new(new_args),
        SessionSubCommand::Show { file } => show(&file),
        SessionSubCommand::Set(set_args) => set(set_args),
    }
}

fn new(args: NewSessionArgs) -> Result<()> {
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let form = SessionForm::new(
        date,
        args.start,
        args.end,
        args.location,
        args.sport.into(),
        args.equipment,
        args.power.into(),
    );
    check(&form)?;

    match args.out {
        Some(path) => {
            save(&path, &form)?;
            log::info!("Session written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&form)?),
    }
    Ok(())
}

fn show(path: &Path) -> Result<()> {
    let form = load(path)?;
    check(&form).with_context(|| format!("{} is not a valid session", path.display()))?;

    println!(
        "{} {}-{} at {} ({:?}, {:?}) on {}",
        form.date,
        form.start_time.format("%H:%M"),
        form.end_time.format("%H:%M"),
        form.location,
        form.sport,
        form.power_level,
        form.equipment
    );
    for (title, table) in [("Forecast (kts)", &form.forecast), ("Actual (kts)", &form.actual)] {
        println!("{}", title);
        for line in render_table(table) {
            println!("  {}", line);
        }
    }
    Ok(())
}

fn set(args: SetWindArgs) -> Result<()> {
    let mut form = load(&args.file)?;
    let table = form.table_mut(args.table.into());

    let mut edits = Vec::new();
    if let Some(text) = &args.avg {
        edits.push(WindEdit::Average(speed_arg("avg", text)?));
    }
    if let Some(text) = &args.gust {
        edits.push(WindEdit::Gust(speed_arg("gust", text)?));
    }
    if let Some(text) = &args.direction {
        let direction = if text.trim().is_empty() {
            None
        } else {
            Some(text.parse::<Direction>()?)
        };
        edits.push(WindEdit::Direction(direction));
    }
    if edits.is_empty() {
        anyhow::bail!("Nothing to set, pass --avg, --gust or --direction");
    }

    for edit in edits {
        log::debug!("hour {}: {:?}", args.hour, edit);
        table.apply(args.hour, edit)?;
    }

    check(&form)?;
    save(&args.file, &form)?;
    log::info!("Updated hour {} of {}", args.hour, args.file.display());
    Ok(())
}

/// Empty text clears the field, anything else must be a number.
fn speed_arg(name: &str, text: &str) -> Result<Option<f64>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let kts = parse_speed(text);
    if !kts.is_finite() {
        anyhow::bail!("--{} {:?} is not a number", name, text);
    }
    if kts < 0.0 {
        anyhow::bail!("--{} {} must not be negative", name, kts);
    }
    Ok(Some(kts))
}

/// Fails with every field error of the form, so nothing invalid gets written.
fn check(form: &SessionForm) -> Result<()> {
    if let Err(errors) = form.validate() {
        let errors: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::bail!("invalid session: {}", errors.join("; "));
    }
    Ok(())
}

pub fn load(path: &Path) -> Result<SessionForm> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let form = serde_json::from_str(&content)
        .with_context(|| format!("parsing session {}", path.display()))?;
    Ok(form)
}

pub fn save(path: &Path, form: &SessionForm) -> Result<()> {
    let content = serde_json::to_string_pretty(form)?;
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn render_table(table: &WindTable) -> Vec<String> {
    table.columns().iter().map(render_column).collect()
}

fn render_column(column: &WindColumn) -> String {
    let value = &column.value;
    let speed = |kts: Option<f64>| match kts {
        Some(kts) => format!("{:>5.1}", kts),
        None => format!("{:>5}", "-"),
    };
    let direction = value
        .direction()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{}  avg {} {}  gust {} {}  dir {}",
        column.hour_label(),
        speed(value.average_speed_kts),
        value.average_color().hex(),
        speed(value.gust_speed_kts),
        value.gust_color().hex(),
        direction
    )
}
