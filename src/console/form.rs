use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::display::format_age;
use super::error::{ConsoleError, ConsoleResult};
use crate::command::{Assignment, Field};
use crate::record::{Grade, StudentFields};

/// Source of operator answers for the field-by-field student form
pub trait FormInput {
    /// Ask for one field, offering `initial` as the editable default.
    ///
    /// `Ok(None)` means the operator abandoned the form.
    fn prompt(&mut self, label: &str, initial: &str) -> ConsoleResult<Option<String>>;

    /// Show a message between prompts (validation errors, menus)
    fn notify(&mut self, message: &str);
}

/// Interactive form on top of the console's line editor
pub struct EditorForm<'e> {
    editor: &'e mut DefaultEditor,
}

impl<'e> EditorForm<'e> {
    pub fn new(editor: &'e mut DefaultEditor) -> Self {
        Self { editor }
    }
}

impl FormInput for EditorForm<'_> {
    fn prompt(&mut self, label: &str, initial: &str) -> ConsoleResult<Option<String>> {
        match self
            .editor
            .readline_with_initial(&format!("  {}: ", label), (initial, ""))
        {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn notify(&mut self, message: &str) {
        println!("  {}", message);
    }
}

/// Form for non-interactive modes: any prompt fails instead of blocking on input
pub struct NoForm;

impl FormInput for NoForm {
    fn prompt(&mut self, _label: &str, _initial: &str) -> ConsoleResult<Option<String>> {
        Err(ConsoleError::FormUnavailable)
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Ages are numbers of years; fractions are allowed, negatives are not
pub fn parse_age(raw: &str) -> ConsoleResult<f64> {
    let trimmed = raw.trim();
    let age: f64 = trimmed.parse().map_err(|_| ConsoleError::InvalidField {
        field: "age",
        reason: format!("'{}' is not a number", trimmed),
    })?;
    if !age.is_finite() || age < 0.0 {
        return Err(ConsoleError::InvalidField {
            field: "age",
            reason: format!("{} is out of range (must be 0 or more)", trimmed),
        });
    }
    Ok(age)
}

/// A class name, or its 1-based position in the class menu
pub fn parse_grade(raw: &str) -> ConsoleResult<Grade> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| Grade::ALL.get(i).copied())
            .ok_or_else(|| ConsoleError::InvalidField {
                field: "class",
                reason: format!("menu number must be between 1 and {}", Grade::ALL.len()),
            });
    }
    trimmed.parse().map_err(|_| ConsoleError::InvalidField {
        field: "class",
        reason: format!("'{}' is not one of the classes (see CLASSES)", trimmed),
    })
}

/// Overwrite `fields` with inline `field=value` assignments
pub fn apply_assignments(
    fields: &mut StudentFields,
    assignments: &[Assignment],
) -> ConsoleResult<()> {
    for assignment in assignments {
        let value = assignment.value.clone();
        match assignment.field {
            Field::Name => fields.name = value,
            Field::Age => fields.age = parse_age(&value)?,
            Field::Class => fields.class = parse_grade(&value)?,
            Field::Phone => fields.phone = value,
            Field::Address => fields.address = value,
            Field::ParentInfo => fields.parent_info = value,
        }
    }
    Ok(())
}

/// Keep asking until `parse` accepts the answer or the operator gives up
fn ask<T>(
    form: &mut dyn FormInput,
    label: &str,
    initial: &str,
    parse: impl Fn(&str) -> ConsoleResult<T>,
) -> ConsoleResult<Option<T>> {
    loop {
        let Some(answer) = form.prompt(label, initial)? else {
            return Ok(None);
        };
        match parse(&answer) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => form.notify(&e.to_string()),
        }
    }
}

/// Numbered class list with the `current` class bracketed
fn class_menu(current: Grade) -> String {
    let selected = current.position();
    Grade::ALL
        .iter()
        .enumerate()
        .map(|(i, g)| {
            if i == selected {
                format!("[{}) {}]", i + 1, g)
            } else {
                format!("{}) {}", i + 1, g)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Walk the operator through every student field, starting from `initial`.
///
/// Returns `Ok(None)` if the form was abandoned part way.
pub fn fill_student(
    form: &mut dyn FormInput,
    initial: &StudentFields,
) -> ConsoleResult<Option<StudentFields>> {
    let text = |s: &str| Ok(s.to_string());

    let Some(name) = ask(form, "Name", &initial.name, text)? else {
        return Ok(None);
    };
    let Some(age) = ask(form, "Age", &format_age(initial.age), parse_age)? else {
        return Ok(None);
    };
    form.notify(&class_menu(initial.class));
    let Some(class) = ask(form, "Class", initial.class.as_str(), parse_grade)? else {
        return Ok(None);
    };
    let Some(phone) = ask(form, "Phone Number", &initial.phone, text)? else {
        return Ok(None);
    };
    let Some(address) = ask(form, "Address", &initial.address, text)? else {
        return Ok(None);
    };
    let Some(parent_info) = ask(form, "Parent Information", &initial.parent_info, text)? else {
        return Ok(None);
    };

    Ok(Some(StudentFields {
        name,
        age,
        class,
        phone,
        address,
        parent_info,
    }))
}
