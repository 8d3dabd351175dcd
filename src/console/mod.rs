mod display;
mod error;
mod executor;
mod form;

pub use display::{
    HELP, OutputMode, classes_table, format_age, records_table, render, render_error, to_json,
};
pub use error::{ConsoleError, ConsoleResult};
pub use executor::{CommandResult, execute};
pub use form::{EditorForm, FormInput, NoForm, apply_assignments, fill_student, parse_age, parse_grade};

use crate::command;
use crate::record::Storage;
use crate::store::RecordStore;

/// Parse one console line and run it against `store`
pub fn run_line<S: Storage>(
    store: &mut RecordStore<S>,
    line: &str,
    form: &mut dyn FormInput,
) -> ConsoleResult<CommandResult> {
    let command = command::parse(line).map_err(ConsoleError::Parse)?;
    execute(store, command, form)
}

/// Lines that carry no command: blanks and `#` comments
pub fn is_blank(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}
