mod error;
mod grade;
mod student;
mod table_file;

pub use error::{RecordError, RecordResult};
pub use grade::Grade;
pub use student::{Student, StudentFields, StudentId};
pub use table_file::{HEADER, Storage, TableFile, read_table, write_table};
