//! Readers for lookup tables stored as delimited text files.

use crate::lookup::{AnchorSet, KeyValueTable, LookupError, ProfileTable};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Reads all data rows (header skipped) of a delimited file.
///
/// Rows with fewer than `min_fields` fields, or more than `max_fields`,
/// are rejected.
pub(crate) fn read_records(
    path: &Path,
    delimiter: u8,
    min_fields: usize,
    max_fields: usize,
) -> Result<Vec<StringRecord>, LookupError> {
    let csv_error = |source| LookupError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.len() < min_fields || record.len() > max_fields {
            return Err(LookupError::MalformedRow {
                path: path.to_path_buf(),
                line: record.position().map_or(0, |p| p.line()),
                expected: max_fields,
                found: record.len(),
            });
        }
        records.push(record);
    }

    Ok(records)
}

/// Writes `records` as comma-separated file with a header row derived
/// from the record's field names.
pub(crate) fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), LookupError> {
    let csv_error = |source| LookupError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new().from_path(path).map_err(csv_error)?;
    for record in records {
        writer.serialize(record).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| LookupError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Reads a two-column delimited file with header row into a [KeyValueTable].
///
/// Later rows overwrite the values of earlier rows with the same key.
///
/// # Errors
/// Returns an error if the file cannot be read or a row does not have
/// exactly two fields.
pub fn read_key_value_table<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
) -> Result<KeyValueTable, LookupError> {
    let path = path.as_ref();
    let table: KeyValueTable = read_records(path, delimiter, 2, 2)?
        .iter()
        .map(|record| (&record[0], &record[1]))
        .collect();

    debug!("Read {} entries from {}", table.len(), path.display());
    Ok(table)
}

/// Reads a file with one identifier per line into an [AnchorSet].
///
/// Surrounding whitespace is trimmed and blank lines are ignored.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_anchor_set<P: AsRef<Path>>(path: P) -> Result<AnchorSet, LookupError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| LookupError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let anchors: AnchorSet = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    debug!("Read {} anchors from {}", anchors.len(), path.display());
    Ok(anchors)
}

// =#========================================================================#=
// REPRESENTATIVES
// =#========================================================================#=
/// One row of the profile representatives table: a motif (vertex
/// identifier), its number of profiles, and the whitespace-separated
/// accession numbers of these profiles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Representative {
    pub motif: String,
    pub num_profiles: String,
    pub profiles: String,
}

impl Representative {
    /// Iterates over the accession numbers of this row.
    pub fn accessions(&self) -> impl Iterator<Item = &str> {
        self.profiles.split_whitespace()
    }
}

/// Reads the tab-separated representatives table (header row, then
/// motif, number of profiles, and profiles per row). A missing profiles
/// column reads as no profiles.
///
/// # Errors
/// Returns an error if the file cannot be read or a row has fewer than
/// two or more than three fields.
pub fn read_representatives<P: AsRef<Path>>(path: P) -> Result<Vec<Representative>, LookupError> {
    let path = path.as_ref();
    let representatives: Vec<Representative> = read_records(path, b'\t', 2, 3)?
        .iter()
        .map(|record| Representative {
            motif: record[0].to_string(),
            num_profiles: record[1].to_string(),
            profiles: record.get(2).unwrap_or("").to_string(),
        })
        .collect();

    debug!("Read {} representatives from {}", representatives.len(), path.display());
    Ok(representatives)
}

/// Writes representatives as comma-separated file with header
/// `motif,num_profiles,profiles`.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_representatives<P: AsRef<Path>>(
    path: P,
    representatives: &[Representative],
) -> Result<(), LookupError> {
    write_records(path.as_ref(), representatives)
}

impl ProfileTable {
    /// Builds a profile table from representatives rows; for repeated
    /// motifs the last row wins.
    pub fn from_representatives(representatives: &[Representative]) -> Self {
        let mut table = ProfileTable::new();
        for representative in representatives {
            table.insert(
                representative.motif.clone(),
                representative.accessions().map(str::to_string).collect(),
            );
        }
        table
    }
}
