mod error;

pub use error::{StoreError, StoreResult};

use std::num::IntErrorKind;
use std::path::Path;

use crate::record::{Storage, Student, StudentFields, StudentId, TableFile};

/// Field used to narrow the table in [`RecordStore::filter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Id,
    Name,
    Class,
    /// Pass-through: every record matches
    All,
}

impl From<&str> for Criterion {
    /// Maps `id`, `name` and `class` (any ASCII case); anything else selects [`Criterion::All`]
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "id" => Criterion::Id,
            "name" => Criterion::Name,
            "class" => Criterion::Class,
            _ => Criterion::All,
        }
    }
}

/// Result of a filter: the matching records plus an optional non-fatal warning
#[derive(Debug)]
pub struct FilterOutcome<'a> {
    pub records: Vec<&'a Student>,
    pub warning: Option<StoreError>,
}

impl<'a> FilterOutcome<'a> {
    fn matched(records: Vec<&'a Student>) -> Self {
        Self {
            records,
            warning: None,
        }
    }

    fn rejected(warning: StoreError) -> Self {
        Self {
            records: Vec::new(),
            warning: Some(warning),
        }
    }
}

/// Owner of the student table.
///
/// The whole table lives in memory and is written back through the
/// [`Storage`] after every create, update and delete.
pub struct RecordStore<S: Storage = TableFile> {
    storage: S,
    table: Vec<Student>,
}

impl<S: Storage> RecordStore<S> {
    /// Load the table from `storage` (an absent file yields an empty table)
    pub fn open(storage: S) -> StoreResult<Self> {
        let table = storage.load()?;
        log::info!("Loaded {} student records", table.len());
        Ok(Self { storage, table })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Id the next created record will receive, `None` once `StudentId::MAX` is taken
    pub fn next_id(&self) -> Option<StudentId> {
        match self.table.iter().map(|s| s.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Append a new record with a freshly assigned id and persist the table
    pub fn create(&mut self, fields: StudentFields) -> StoreResult<Student> {
        let id = self.next_id().ok_or(StoreError::IdsExhausted)?;
        let student = Student::new(id, fields);
        self.table.push(student.clone());
        self.save()?;
        log::debug!("Created student {} ({})", student.id, student.name);
        Ok(student)
    }

    /// The full table in its current order
    pub fn list(&self) -> &[Student] {
        &self.table
    }

    pub fn get(&self, id: StudentId) -> Option<&Student> {
        self.table.iter().find(|s| s.id == id)
    }

    pub fn filter(&self, criterion: Criterion, value: &str) -> FilterOutcome<'_> {
        match criterion {
            Criterion::Id => match value.trim().parse::<StudentId>() {
                Ok(id) => FilterOutcome::matched(self.table.iter().filter(|s| s.id == id).collect()),
                // Well-formed but out of range: no stored id can match
                Err(e) if matches!(
                    e.kind(),
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
                ) =>
                {
                    FilterOutcome::matched(Vec::new())
                }
                Err(_) => FilterOutcome::rejected(StoreError::InvalidInput(format!(
                    "'{}' is not a valid integer ID",
                    value
                ))),
            },
            Criterion::Name => {
                let needle = value.to_lowercase();
                FilterOutcome::matched(
                    self.table
                        .iter()
                        .filter(|s| s.name.to_lowercase().contains(&needle))
                        .collect(),
                )
            }
            Criterion::Class => FilterOutcome::matched(
                self.table
                    .iter()
                    .filter(|s| s.class.as_str() == value)
                    .collect(),
            ),
            Criterion::All => FilterOutcome::matched(self.table.iter().collect()),
        }
    }

    /// First record whose name contains `query`, ignoring case
    pub fn find_by_name(&self, query: &str) -> Option<&Student> {
        self.filter(Criterion::Name, query).records.into_iter().next()
    }

    /// Overwrite every non-id field of record `id`.
    ///
    /// Returns `false`, without touching the table or the storage, when no
    /// record has that id.
    pub fn update(&mut self, id: StudentId, fields: StudentFields) -> StoreResult<bool> {
        let Some(student) = self.table.iter_mut().find(|s| s.id == id) else {
            log::debug!("Update of unknown student {} ignored", id);
            return Ok(false);
        };
        student.overwrite(fields);
        self.save()?;
        Ok(true)
    }

    /// Remove record `id` if present; the table is persisted either way
    pub fn delete(&mut self, id: StudentId) -> StoreResult<()> {
        let before = self.table.len();
        self.table.retain(|s| s.id != id);
        log::debug!(
            "Deleted {} record(s) with id {}",
            before - self.table.len(),
            id
        );
        self.save()
    }

    /// Write the current table to `path` in the persisted format
    pub fn export(&self, path: &Path) -> StoreResult<usize> {
        TableFile::write_to(path, &self.table)?;
        log::info!("Exported {} records to {}", self.table.len(), path.display());
        Ok(self.table.len())
    }

    fn save(&mut self) -> StoreResult<()> {
        self.storage.persist(&self.table)?;
        log::debug!("Persisted {} records", self.table.len());
        Ok(())
    }
}
