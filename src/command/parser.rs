use chumsky::{prelude::*, regex::regex, text::ascii::ident};

type ParseError<'a> = extra::Err<Rich<'a, char>>;

/// Student attribute named on the left of an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Age,
    Class,
    Phone,
    Address,
    ParentInfo,
}

impl Field {
    /// Resolve a field name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(Field::Name),
            "age" => Some(Field::Age),
            "class" => Some(Field::Class),
            "phone" => Some(Field::Phone),
            "address" => Some(Field::Address),
            "parent" | "parent_info" | "parentinfo" => Some(Field::ParentInfo),
            _ => None,
        }
    }
}

/// `field=value`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub field: Field,
    pub value: String,
}

impl Assignment {
    pub fn new(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // HELP | HOME
    Help,

    // CLASSES
    Classes,

    // ADD assignment*
    Add(Vec<Assignment>),

    // LIST | VIEW
    List,

    // FILTER Identifier value
    Filter { criterion: String, value: String },

    // MODIFY name assignment*
    Modify {
        name: String,
        assignments: Vec<Assignment>,
    },

    // UPDATE Integer assignment*
    Update {
        id: i64,
        assignments: Vec<Assignment>,
    },

    // DELETE Integer
    Delete(i64),

    // EXPORT path
    Export(String),

    // EXIT | QUIT
    Exit,
}

/// Keyword matched as a whole word, ignoring ASCII case
fn keyword<'a>(kw: &'static str) -> impl Parser<'a, &'a str, (), ParseError<'a>> + Clone {
    ident()
        .try_map(move |s: &str, span| {
            if s.eq_ignore_ascii_case(kw) {
                Ok(())
            } else {
                Err(Rich::custom(span, format!("expected '{}'", kw)))
            }
        })
        .padded()
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// 'single' or "double" quoted text with backslash escapes
fn quoted<'a>() -> impl Parser<'a, &'a str, String, ParseError<'a>> + Clone {
    let single = regex(r#"'([^'\\]|\\.)*'"#);
    let double = regex(r#""([^"\\]|\\.)*""#);
    single
        .or(double)
        .map(|s: &str| unescape(&s[1..s.len() - 1]))
        .padded()
}

/// Quoted text or a single bare word
fn value<'a>() -> impl Parser<'a, &'a str, String, ParseError<'a>> + Clone {
    let bare = regex(r#"[^\s;,'"=]+"#).map(|s: &str| s.to_string());
    quoted().or(bare.padded())
}

/// Quoted text, or everything up to the terminator with surrounding whitespace trimmed
fn text<'a>() -> impl Parser<'a, &'a str, String, ParseError<'a>> + Clone {
    let rest = none_of(";")
        .repeated()
        .to_slice()
        .map(|s: &str| s.trim().to_string());
    quoted().or(rest)
}

fn integer<'a>() -> impl Parser<'a, &'a str, i64, ParseError<'a>> + Clone {
    regex(r"[+-]?\d+")
        .try_map(|s: &str, span| {
            s.parse::<i64>()
                .map_err(|e| Rich::custom(span, format!("invalid integer '{}': {}", s, e)))
        })
        .padded()
}

fn assignments<'a>() -> impl Parser<'a, &'a str, Vec<Assignment>, ParseError<'a>> + Clone {
    let field = ident()
        .try_map(|s: &str, span| {
            Field::from_name(s).ok_or_else(|| Rich::custom(span, format!("unknown field '{}'", s)))
        })
        .padded();

    field
        .then_ignore(just('=').padded())
        .then(value())
        .map(|(field, value)| Assignment { field, value })
        .then_ignore(just(',').padded().or_not())
        .repeated()
        .collect()
}

pub fn parser<'a>() -> impl Parser<'a, &'a str, Command, ParseError<'a>> {
    let help = keyword("help").or(keyword("home")).to(Command::Help);

    let classes = keyword("classes").to(Command::Classes);

    let add = keyword("add").ignore_then(assignments()).map(Command::Add);

    let list = keyword("list").or(keyword("view")).to(Command::List);

    let filter = keyword("filter")
        .ignore_then(ident().padded())
        .then(text())
        .map(|(criterion, value): (&str, String)| Command::Filter {
            criterion: criterion.to_string(),
            value,
        });

    // Inline assignments need a quoted name; an unquoted name runs to the end of the line
    let modify = keyword("modify")
        .ignore_then(choice((
            quoted().then(assignments()),
            text().map(|name| (name, Vec::new())),
        )))
        .map(|(name, assignments)| Command::Modify { name, assignments });

    let update = keyword("update")
        .ignore_then(integer())
        .then(assignments())
        .map(|(id, assignments)| Command::Update { id, assignments });

    let delete = keyword("delete").ignore_then(integer()).map(Command::Delete);

    let export = keyword("export").ignore_then(text()).map(Command::Export);

    let exit = keyword("exit").or(keyword("quit")).to(Command::Exit);

    choice((
        help, classes, add, list, filter, modify, update, delete, export, exit,
    ))
    .then_ignore(just(';').padded().or_not())
    .then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(input: &str) -> Command {
        let result = parser().parse(input);
        result.errors().for_each(|e| println!("Error: {:?}", e));
        assert!(!result.has_errors(), "failed to parse {:?}", input);
        result.unwrap()
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_ok("help"), Command::Help);
        assert_eq!(parse_ok("HOME;"), Command::Help);
        assert_eq!(parse_ok("  classes  "), Command::Classes);
        assert_eq!(parse_ok("list"), Command::List);
        assert_eq!(parse_ok("View;"), Command::List);
        assert_eq!(parse_ok("exit"), Command::Exit);
        assert_eq!(parse_ok("quit ;"), Command::Exit);
    }

    #[test]
    fn test_add() {
        assert_eq!(parse_ok("add"), Command::Add(vec![]));

        let cmd = parse_ok(
            "ADD name='Alice' age=7 class=\"Class 2\" phone=555-1111 address='1 Main St', parent='Bob';",
        );
        assert_eq!(
            cmd,
            Command::Add(vec![
                Assignment::new(Field::Name, "Alice"),
                Assignment::new(Field::Age, "7"),
                Assignment::new(Field::Class, "Class 2"),
                Assignment::new(Field::Phone, "555-1111"),
                Assignment::new(Field::Address, "1 Main St"),
                Assignment::new(Field::ParentInfo, "Bob"),
            ])
        );
    }

    #[test]
    fn test_quoted_escapes() {
        let cmd = parse_ok(r#"add name='O\'Brien' address="12 \"Elm\" Rd""#);
        assert_eq!(
            cmd,
            Command::Add(vec![
                Assignment::new(Field::Name, "O'Brien"),
                Assignment::new(Field::Address, "12 \"Elm\" Rd"),
            ])
        );
    }

    #[test]
    fn test_unknown_field() {
        assert!(parser().parse("add grade=7").has_errors());
        assert!(parser().parse("add name").has_errors());
    }

    #[test]
    fn test_filter() {
        assert_eq!(
            parse_ok("filter id 3"),
            Command::Filter {
                criterion: "id".to_string(),
                value: "3".to_string()
            }
        );
        assert_eq!(
            parse_ok("FILTER class Class 2;"),
            Command::Filter {
                criterion: "class".to_string(),
                value: "Class 2".to_string()
            }
        );
        assert_eq!(
            parse_ok("filter name '  ali '"),
            Command::Filter {
                criterion: "name".to_string(),
                value: "  ali ".to_string()
            }
        );
        assert_eq!(
            parse_ok("filter name"),
            Command::Filter {
                criterion: "name".to_string(),
                value: String::new()
            }
        );
        // Malformed ids are the store's concern, not a parse error
        assert_eq!(
            parse_ok("filter id abc"),
            Command::Filter {
                criterion: "id".to_string(),
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_modify() {
        assert_eq!(
            parse_ok("modify Ali Khan"),
            Command::Modify {
                name: "Ali Khan".to_string(),
                assignments: vec![]
            }
        );
        assert_eq!(
            parse_ok("modify 'Ali Khan' age=9 class='Class 4'"),
            Command::Modify {
                name: "Ali Khan".to_string(),
                assignments: vec![
                    Assignment::new(Field::Age, "9"),
                    Assignment::new(Field::Class, "Class 4"),
                ]
            }
        );
        assert_eq!(
            parse_ok("modify"),
            Command::Modify {
                name: String::new(),
                assignments: vec![]
            }
        );
    }

    #[test]
    fn test_update_and_delete() {
        assert_eq!(
            parse_ok("update 2 phone='555-2222'"),
            Command::Update {
                id: 2,
                assignments: vec![Assignment::new(Field::Phone, "555-2222")]
            }
        );
        assert_eq!(
            parse_ok("update 7"),
            Command::Update {
                id: 7,
                assignments: vec![]
            }
        );
        assert_eq!(parse_ok("delete 12;"), Command::Delete(12));
        assert!(parser().parse("delete abc").has_errors());
        assert!(parser().parse("delete").has_errors());
        assert!(parser().parse("delete 1 2").has_errors());
    }

    #[test]
    fn test_export() {
        assert_eq!(
            parse_ok("export out/students.csv"),
            Command::Export("out/students.csv".to_string())
        );
        assert_eq!(
            parse_ok("export 'my data.csv';"),
            Command::Export("my data.csv".to_string())
        );
    }

    #[test]
    fn test_unknown_command() {
        assert!(parser().parse("drop table students").has_errors());
        assert!(parser().parse("lister").has_errors());
        assert!(parser().parse("").has_errors());
    }

    #[test]
    fn test_field_names() {
        assert_eq!(Field::from_name("Parent_Info"), Some(Field::ParentInfo));
        assert_eq!(Field::from_name("PARENT"), Some(Field::ParentInfo));
        assert_eq!(Field::from_name("AGE"), Some(Field::Age));
        assert_eq!(Field::from_name("id"), None);
    }
}
