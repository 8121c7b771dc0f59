//! Accession metadata: sequencing technology and country per profile.

use crate::lookup::LookupError;
use crate::lookup::reader::{read_records, write_records};
use csv::StringRecord;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Placeholder for metadata missing in the input tables.
pub const MISSING_VALUE: &str = "NA";

/// Merged metadata of one profile accession.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessionRecord {
    pub accession_number: String,
    pub technology: String,
    pub assembly: String,
    pub country: String,
}

/// Reads the comma-separated sequencing technology table (accession,
/// technology, assembly) and the semicolon-separated country table
/// (accession, country), both with header rows, and merges them with
/// [merge_accessions].
///
/// # Errors
/// Returns an error if a file cannot be read or has rows with an
/// unexpected number of fields.
pub fn read_accession_records<P: AsRef<Path>, Q: AsRef<Path>>(
    technology_path: P,
    country_path: Q,
) -> Result<Vec<AccessionRecord>, LookupError> {
    let technologies = read_records(technology_path.as_ref(), b',', 3, 3)?;
    let countries = read_records(country_path.as_ref(), b';', 2, 2)?;
    let records = merge_accessions(&technologies, &countries);

    debug!(
        "Merged {} accessions with {} country entries",
        records.len(),
        countries.len()
    );
    Ok(records)
}

/// Left-joins country rows onto technology rows by accession number.
///
/// Keeps every technology row in order. An accession with several country
/// rows yields one record per country row, in country file order; one
/// without any yields a single record. Missing and empty values get
/// [MISSING_VALUE]. Country rows without an accession number are ignored.
pub fn merge_accessions(
    technologies: &[StringRecord],
    countries: &[StringRecord],
) -> Vec<AccessionRecord> {
    let mut countries_by_accession: HashMap<&str, Vec<Option<&str>>> = HashMap::new();
    for record in countries {
        if let Some(accession) = record.get(0) {
            countries_by_accession
                .entry(accession)
                .or_default()
                .push(record.get(1));
        }
    }

    let mut records = Vec::with_capacity(technologies.len());
    for record in technologies {
        let accession = record.get(0);
        let matches = accession
            .and_then(|accession| countries_by_accession.get(accession))
            .map_or(&[None][..], Vec::as_slice);

        for &country in matches {
            records.push(AccessionRecord {
                accession_number: or_missing(accession),
                technology: or_missing(record.get(1)),
                assembly: or_missing(record.get(2)),
                country: or_missing(country),
            });
        }
    }

    records
}

/// Writes accession records as comma-separated file with header
/// `accession_number,technology,assembly,country`.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_accession_records<P: AsRef<Path>>(
    path: P,
    records: &[AccessionRecord],
) -> Result<(), LookupError> {
    write_records(path.as_ref(), records)
}

fn or_missing(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => MISSING_VALUE.to_string(),
    }
}
