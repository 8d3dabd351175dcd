use prettytable::{Cell, Row, Table, format, row};
use serde_json::{Value, json};

use super::executor::CommandResult;
use crate::record::{Grade, HEADER, Student};

/// Output mode for rendering command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable tables and messages.
    Pretty,
    /// One JSON object per result on stdout.
    Json,
}

/// Age without a trailing `.0` for whole years
pub fn format_age(age: f64) -> String {
    age.to_string()
}

pub fn records_table(records: &[Student]) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(HEADER.iter().map(|h| Cell::new(h)).collect()));
    for s in records {
        table.add_row(row![
            s.id,
            s.name,
            format_age(s.age),
            s.class,
            s.phone,
            s.address,
            s.parent_info
        ]);
    }
    table.to_string()
}

pub fn classes_table() -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(row!["#", "Class"]);
    for (i, grade) in Grade::ALL.iter().enumerate() {
        table.add_row(row![i + 1, grade]);
    }
    table.to_string()
}

pub const HELP: &str = "\
Student Information System

Manage student records: add, view, filter, modify and delete.

Commands:
  ADD [field=value ...]              add a student (no fields: fill in a form)
  LIST | VIEW                        show every student
  FILTER ID|NAME|CLASS <value>       filter by exact id, name substring (any case)
                                     or exact class name
  MODIFY <name> [field=value ...]    edit the first student whose name contains <name>
                                     (quote the name when giving fields inline)
  UPDATE <id> [field=value ...]      edit a student by id
  DELETE <id>                        delete a student by id
  EXPORT <path>                      write all students to a CSV file
  CLASSES                            list the classes
  HELP | HOME                        show this text
  EXIT | QUIT                        leave

Fields: name, age, class, phone, address, parent
Values: 'quoted text', \"quoted text\" or a single word.
Example: ADD name='Alice' age=7 class='Class 2' phone=555-1111 parent='Bob'";

/// JSON form of a command result
pub fn to_json(result: &CommandResult) -> Value {
    match result {
        CommandResult::Ok(msg) => json!({"ok": true, "message": msg}),
        CommandResult::Info(msg) => json!({"ok": true, "info": msg}),
        CommandResult::Warning(msg) => json!({"ok": false, "warning": msg}),
        CommandResult::Created(student) => json!({"ok": true, "created": student}),
        CommandResult::Records(records) => json!({
            "students": records,
            "count": records.len(),
        }),
        CommandResult::Classes => json!({
            "classes": Grade::ALL.iter().map(Grade::as_str).collect::<Vec<_>>(),
        }),
        CommandResult::Help => json!({"help": HELP}),
        CommandResult::Exit => json!({"ok": true, "exit": true}),
    }
}

/// Render a command result to stdout in the given mode.
///
/// Returns `true` to continue execution, `false` to signal exit.
pub fn render(result: &CommandResult, mode: &OutputMode) -> bool {
    if let OutputMode::Json = mode {
        if !matches!(result, CommandResult::Exit) {
            println!("{}", to_json(result));
        }
        return !matches!(result, CommandResult::Exit);
    }

    match result {
        CommandResult::Ok(msg) | CommandResult::Info(msg) => println!("{msg}"),
        CommandResult::Warning(msg) => println!("Warning: {msg}"),
        CommandResult::Created(student) => {
            println!("Student added successfully! (ID {})", student.id);
            print!("{}", records_table(std::slice::from_ref(student)));
        }
        CommandResult::Records(records) => {
            print!("{}", records_table(records));
            println!("{} student(s)", records.len());
        }
        CommandResult::Classes => print!("{}", classes_table()),
        CommandResult::Help => println!("{HELP}"),
        CommandResult::Exit => {
            println!("Bye!");
            return false;
        }
    }
    true
}

/// Report an error in the given mode (stderr for pretty output)
pub fn render_error(err: &dyn std::fmt::Display, mode: &OutputMode) {
    match mode {
        OutputMode::Pretty => eprintln!("Error: {err}"),
        OutputMode::Json => println!("{}", json!({"ok": false, "error": err.to_string()})),
    }
}
