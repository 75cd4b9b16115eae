//! CSV and JSON export for sizing reports.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sizing::{SizingReport, SizingResult};

/// Column header for the flat CSV audit table.
const HEADER: &str = "section,name,value,unit";

/// Exports a sizing report to a CSV file at the given path.
///
/// Writes a header row followed by one row per capacity and intermediate
/// quantity, then one row per warning. Produces deterministic output for
/// identical reports.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(report: &SizingReport, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(report, buf)
}

/// Writes a sizing report as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(report: &SizingReport, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    write_section(&mut wtr, "pv", &report.pv)?;
    if let Some(battery) = &report.battery {
        write_section(&mut wtr, "battery", battery)?;
    }
    if let Some(pump) = &report.pump {
        write_section(&mut wtr, "pump", pump)?;
    }
    if let Some(carbon) = &report.carbon {
        write_section(&mut wtr, "carbon", carbon)?;
    }

    for warning in &report.warnings {
        wtr.write_record(["warning", warning, "", ""])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_section<W: Write>(
    wtr: &mut csv::Writer<W>,
    section: &str,
    result: &SizingResult,
) -> io::Result<()> {
    wtr.write_record([
        section,
        &result.capacity.name,
        &format!("{:.4}", result.capacity.value),
        &result.capacity.unit,
    ])?;
    for q in &result.intermediates {
        wtr.write_record([section, &q.name, &format!("{:.4}", q.value), &q.unit])?;
    }
    for warning in &result.warnings {
        wtr.write_record([section, "warning", warning, ""])?;
    }
    Ok(())
}

/// Exports a sizing report to a pretty-printed JSON file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation, serialization, or writing fails.
pub fn export_json(report: &SizingReport, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_json(report, buf)
}

/// Writes a sizing report as pretty-printed JSON to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_json(report: &SizingReport, mut writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, report).map_err(io::Error::other)?;
    writer.write_all(b"\n")?;
    Ok(())
}
