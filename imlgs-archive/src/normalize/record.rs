//! Whole-record normalization.

use serde_json::{Map, Value};

use crate::domain::time::{DateError, julian_day_from_partial};

use super::interval::normalize_interval;

/// An unmodified detail document as returned by the remote service.
///
/// Records are schemaless; key order is the document order and is
/// preserved through normalization.
pub type RawRecord = Map<String, Value>;

/// Derive the four Julian-day fields from `begin_date`/`end_date`.
///
/// A no-op when `begin_jd` is already present, so records written by
/// the current fetch path pass through unchanged and older cache files
/// are upgraded without touching the stored document. Absent or null
/// dates yield null derived fields.
pub fn attach_julian_days(record: &mut RawRecord) -> Result<(), DateError> {
    if record.contains_key("begin_jd") {
        return Ok(());
    }

    let (begin, begin_err) = derived_pair(record, "begin_date")?;
    let (end, end_err) = derived_pair(record, "end_date")?;
    record.insert("begin_jd".to_string(), begin);
    record.insert("begin_jderr".to_string(), begin_err);
    record.insert("end_jd".to_string(), end);
    record.insert("end_jderr".to_string(), end_err);
    Ok(())
}

fn derived_pair(record: &RawRecord, key: &str) -> Result<(Value, Value), DateError> {
    match record.get(key).and_then(Value::as_str) {
        Some(s) => {
            let jd = julian_day_from_partial(s)?;
            Ok((jd.value.into(), jd.uncertainty.into()))
        }
        None => Ok((Value::Null, Value::Null)),
    }
}

/// Flatten every interval sub-record in place.
///
/// Non-object entries pass through unchanged; a record without an
/// `intervals` array is left alone.
pub fn normalize_intervals(record: &mut RawRecord) {
    let Some(Value::Array(intervals)) = record.get_mut("intervals") else {
        return;
    };
    for entry in intervals.iter_mut() {
        if let Value::Object(interval) = entry {
            *entry = Value::Object(normalize_interval(interval));
        }
    }
}

/// Full normalization: derived time fields plus interval flattening.
pub fn normalize_record(record: &mut RawRecord) -> Result<(), DateError> {
    attach_julian_days(record)?;
    normalize_intervals(record);
    Ok(())
}
