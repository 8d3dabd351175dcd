use std::path::Path;

use super::error::ConsoleResult;
use super::form::{FormInput, apply_assignments, fill_student};
use crate::command::{Assignment, Command};
use crate::record::{Storage, Student, StudentFields, StudentId};
use crate::store::{Criterion, RecordStore};

/// Outcome of one console command, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Ok(String),
    Info(String),
    Warning(String),
    Created(Student),
    Records(Vec<Student>),
    Classes,
    Help,
    Exit,
}

pub fn execute<S: Storage>(
    store: &mut RecordStore<S>,
    command: Command,
    form: &mut dyn FormInput,
) -> ConsoleResult<CommandResult> {
    log::debug!("Executing {:?}", command);
    match command {
        Command::Help => Ok(CommandResult::Help),
        Command::Classes => Ok(CommandResult::Classes),
        Command::Exit => Ok(CommandResult::Exit),
        Command::Add(assignments) => add(store, &assignments, form),
        Command::List => Ok(list(store)),
        Command::Filter { criterion, value } => Ok(filter(store, &criterion, &value)),
        Command::Modify { name, assignments } => modify(store, &name, &assignments, form),
        Command::Update { id, assignments } => update(store, id, &assignments, form),
        Command::Delete(id) => delete(store, id),
        Command::Export(path) => export(store, &path),
    }
}

fn add<S: Storage>(
    store: &mut RecordStore<S>,
    assignments: &[Assignment],
    form: &mut dyn FormInput,
) -> ConsoleResult<CommandResult> {
    let fields = if assignments.is_empty() {
        match fill_student(form, &StudentFields::default())? {
            Some(fields) => fields,
            None => return Ok(CommandResult::Info("Add cancelled.".to_string())),
        }
    } else {
        let mut fields = StudentFields::default();
        apply_assignments(&mut fields, assignments)?;
        fields
    };

    let student = store.create(fields)?;
    Ok(CommandResult::Created(student))
}

fn list<S: Storage>(store: &RecordStore<S>) -> CommandResult {
    if store.is_empty() {
        CommandResult::Info("No students found in the database.".to_string())
    } else {
        CommandResult::Records(store.list().to_vec())
    }
}

fn filter<S: Storage>(store: &RecordStore<S>, criterion: &str, value: &str) -> CommandResult {
    if value.is_empty() {
        return CommandResult::Warning("Please enter a filter value.".to_string());
    }

    let outcome = store.filter(Criterion::from(criterion), value);
    if let Some(warning) = outcome.warning {
        return CommandResult::Warning(format!(
            "Please enter a valid integer for ID. ({})",
            warning
        ));
    }
    if outcome.records.is_empty() {
        return CommandResult::Warning("No students match the filter criteria.".to_string());
    }
    CommandResult::Records(outcome.records.into_iter().cloned().collect())
}

/// New field values for `current`: inline assignments over the current values,
/// or a form prefilled with them
fn edit(
    current: &Student,
    assignments: &[Assignment],
    form: &mut dyn FormInput,
) -> ConsoleResult<Option<StudentFields>> {
    let mut fields = current.fields();
    if assignments.is_empty() {
        form.notify(&format!("Editing student {}: {}", current.id, current.name));
        return fill_student(form, &fields);
    }
    apply_assignments(&mut fields, assignments)?;
    Ok(Some(fields))
}

fn save_edit<S: Storage>(
    store: &mut RecordStore<S>,
    current: &Student,
    assignments: &[Assignment],
    form: &mut dyn FormInput,
) -> ConsoleResult<CommandResult> {
    let Some(fields) = edit(current, assignments, form)? else {
        return Ok(CommandResult::Info("Modification cancelled.".to_string()));
    };

    if store.update(current.id, fields)? {
        Ok(CommandResult::Ok(
            "Student information modified successfully!".to_string(),
        ))
    } else {
        Ok(CommandResult::Warning(format!(
            "Student {} no longer exists.",
            current.id
        )))
    }
}

fn modify<S: Storage>(
    store: &mut RecordStore<S>,
    name: &str,
    assignments: &[Assignment],
    form: &mut dyn FormInput,
) -> ConsoleResult<CommandResult> {
    if name.is_empty() {
        return Ok(CommandResult::Warning(
            "Please enter a name to search.".to_string(),
        ));
    }
    let Some(current) = store.find_by_name(name).cloned() else {
        return Ok(CommandResult::Warning(
            "No student found with that name.".to_string(),
        ));
    };
    form.notify(&format!("Found student: {}", current.name));
    save_edit(store, &current, assignments, form)
}

fn update<S: Storage>(
    store: &mut RecordStore<S>,
    id: StudentId,
    assignments: &[Assignment],
    form: &mut dyn FormInput,
) -> ConsoleResult<CommandResult> {
    let Some(current) = store.get(id).cloned() else {
        return Ok(CommandResult::Warning(format!(
            "No student found with ID {}.",
            id
        )));
    };
    save_edit(store, &current, assignments, form)
}

fn delete<S: Storage>(store: &mut RecordStore<S>, id: StudentId) -> ConsoleResult<CommandResult> {
    let existed = store.get(id).is_some();
    store.delete(id)?;
    if existed {
        Ok(CommandResult::Ok("Student deleted successfully!".to_string()))
    } else {
        Ok(CommandResult::Info(format!(
            "No student found with ID {}; nothing was deleted.",
            id
        )))
    }
}

fn export<S: Storage>(store: &RecordStore<S>, path: &str) -> ConsoleResult<CommandResult> {
    if path.is_empty() {
        return Ok(CommandResult::Warning(
            "Please enter a file path to export to.".to_string(),
        ));
    }
    let count = store.export(Path::new(path))?;
    Ok(CommandResult::Ok(format!(
        "Exported {} student(s) to {}",
        count, path
    )))
}
