use crate::data::bar::Bar;
use crate::engine::signal::Position;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

#[derive(Debug, Deserialize)]
struct PositionRecord {
    position: i8,
}

//loads daily bars from a csv file with columns date,open,high,low,close
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Bar>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let mut bars = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let record: CsvRecord =
            result.context(format!("Failed to parse CSV record at line {}", index + 2))?;

        //parse iso date
        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").context(format!(
            "Failed to parse date '{}' at line {}",
            record.date,
            index + 2
        ))?;

        //create bar
        let bar = Bar::new(date, record.open, record.high, record.low, record.close)
            .context(format!("Invalid bar at line {}", index + 2))?;

        bars.push(bar);
    }

    //sort by date to ensure chronological order
    bars.sort_by(|a, b| a.date.cmp(&b.date));

    Ok(bars)
}

//loads a 0/1 position series from a csv file with a position column
//rows must align one-to-one with the bar file
pub fn load_positions_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Position>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(format!("Failed to open positions CSV file: {:?}", path))?;

    let mut positions = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let record: PositionRecord = result.context(format!(
            "Failed to parse position record at line {}",
            index + 2
        ))?;

        let position = Position::from_flag(record.position)
            .context(format!("Invalid position flag at line {}", index + 2))?;

        positions.push(position);
    }

    Ok(positions)
}
