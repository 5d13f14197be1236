use crate::document::ScheduleDocument;
use crate::model::{HourGrid, UserId, DAYS_PER_WEEK, HOURS_PER_DAY};
use anyhow::{bail, Context};
use chrono::Weekday;
use csv::ReaderBuilder;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Import d'une grille depuis CSV: header `day,00,01,…,23`, une ligne par jour.
///
/// `day` accepte un nom de jour (`mon`, `Monday`…) ou un numéro 1..7 ;
/// une cellule vide = créneau non assigné.
pub fn import_hours_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<HourGrid> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut grid = HourGrid::empty();
    let mut seen = [false; DAYS_PER_WEEK];

    for rec in rdr.records() {
        let rec = rec?;
        let raw_day = rec.get(0).context("missing day")?.trim();
        let day = parse_day(raw_day).with_context(|| format!("invalid day: {raw_day}"))?;
        if seen[day] {
            bail!("day {raw_day} appears twice");
        }
        seen[day] = true;

        if rec.len() != HOURS_PER_DAY + 1 {
            bail!(
                "day {raw_day}: expected {} hour columns, got {}",
                HOURS_PER_DAY,
                rec.len().saturating_sub(1)
            );
        }
        for hour in 0..HOURS_PER_DAY {
            let cell = rec.get(hour + 1).unwrap_or("").trim();
            if !cell.is_empty() {
                grid.set(day, hour, Some(UserId::new(cell)));
            }
        }
    }

    if let Some(missing) = seen.iter().position(|s| !s) {
        bail!("missing row for day {}", missing + 1);
    }
    Ok(grid)
}

fn parse_day(raw: &str) -> anyhow::Result<usize> {
    if let Ok(n) = raw.parse::<usize>() {
        if (1..=DAYS_PER_WEEK).contains(&n) {
            return Ok(n - 1);
        }
        bail!("day number must be within 1..=7");
    }
    let weekday: Weekday = raw
        .parse()
        .map_err(|_| anyhow::anyhow!("expected a weekday name"))?;
    Ok(weekday.num_days_from_monday() as usize)
}

/// Import JSON: tableau de 168 valeurs (`"PUSERID"` ou `null`).
pub fn import_hours_json<P: AsRef<Path>>(path: P) -> anyhow::Result<HourGrid> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let grid: HourGrid = serde_json::from_slice(&data)
        .with_context(|| format!("parsing hour grid {}", path.display()))?;
    Ok(grid)
}

/// Choisit le format d'après l'extension (`.json`, sinon CSV).
pub fn load_hours<P: AsRef<Path>>(path: P) -> anyhow::Result<HourGrid> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => import_hours_json(path),
        _ => import_hours_csv(path),
    }
}

/// Export JSON du document (jolie mise en forme), écrit de manière atomique.
pub fn export_document_json<P: AsRef<Path>>(
    path: P,
    document: &ScheduleDocument,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_vec_pretty(document)?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}
