use crate::models::PublicationRecord;
use crate::tooltip::{oa_percentage, round_one_decimal};
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Save records as flat CSV with header. The category breakdown is not included;
/// use JSON to keep it. `oa_percent` is empty when `total` is zero.
pub fn save_csv<P: AsRef<Path>>(records: &[PublicationRecord], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("year", "total", "open_access", "closed_access", "oa_percent"))?;
    for r in records {
        let pct = oa_percentage(r.open_access, r.total).map(round_one_decimal);
        wtr.serialize((r.year, r.total, r.open_access, r.closed_access(), pct))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save records as a pretty JSON array (breakdown order preserved).
pub fn save_json<P: AsRef<Path>>(records: &[PublicationRecord], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Read a JSON array of records, as written by [`save_json`] or in the
/// `{year, total, oa, details}` shape.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Vec<PublicationRecord>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let records: Vec<PublicationRecord> = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("decoding records from {}", path.display()))?;
    Ok(records)
}
