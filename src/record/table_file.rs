use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};

use super::error::RecordResult;
use super::student::Student;

/// Header row of the persisted table, in column order
pub const HEADER: [&str; 7] = [
    "ID",
    "Name",
    "Age",
    "Class",
    "Phone",
    "Address",
    "Parent Info",
];

/// Whole-table storage used by the record store.
///
/// Both operations work on the complete table; there is no incremental mode.
pub trait Storage {
    /// Read the persisted table, or an empty one if nothing has been persisted yet
    fn load(&self) -> RecordResult<Vec<Student>>;

    /// Replace the persisted table with `table`
    fn persist(&mut self, table: &[Student]) -> RecordResult<()>;
}

/// Decode a table from comma-separated text with a header row.
///
/// Columns are matched by header name, so column order in the input does not matter.
pub fn read_table<R: io::Read>(reader: R) -> RecordResult<Vec<Student>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let records = reader
        .deserialize()
        .collect::<Result<Vec<Student>, csv::Error>>()?;
    Ok(records)
}

/// Encode a table as comma-separated text.
///
/// The header row is always written so an empty table still carries its schema.
pub fn write_table<W: io::Write>(writer: W, table: &[Student]) -> RecordResult<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(HEADER)?;
    for student in table {
        writer.serialize(student)?;
    }
    writer.flush()?;
    Ok(())
}

/// A table persisted as a single CSV file, rewritten in full on every persist
#[derive(Debug, Clone)]
pub struct TableFile {
    path: PathBuf,
}

impl TableFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `table` to an arbitrary file in the same format
    pub fn write_to(path: &Path, table: &[Student]) -> RecordResult<()> {
        let file = File::create(path)?;
        write_table(BufWriter::new(file), table)
    }
}

impl Storage for TableFile {
    fn load(&self) -> RecordResult<Vec<Student>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        read_table(BufReader::new(file))
    }

    fn persist(&mut self, table: &[Student]) -> RecordResult<()> {
        // Truncates in place; a crash mid-write leaves a partial file
        Self::write_to(&self.path, table)
    }
}
