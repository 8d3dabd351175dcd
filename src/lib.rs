pub mod command;
pub mod config;
pub mod console;
pub mod record;
pub mod store;

pub use command::{Assignment, Command, Field};
pub use config::Config;
pub use console::{CommandResult, ConsoleError, ConsoleResult, OutputMode};
pub use record::{
    Grade, RecordError, RecordResult, Storage, Student, StudentFields, StudentId, TableFile,
};
pub use store::{Criterion, FilterOutcome, RecordStore, StoreError, StoreResult};
