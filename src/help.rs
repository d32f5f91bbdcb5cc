use std::fmt::{self, Write};

use crate::Command;

macro_rules! w {
    ($($tt:tt)*) => {{
        let _ = write!($($tt)*);
    }};
}

/// One piece of the usage line after the command path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsagePart {
    /// A value that was accepted, rendered as given.
    Value(String),
    /// Something missing or rejected: `<command>`, `<name>`.
    Placeholder(String),
}

/// The usage line of a run: the path of commands walked so far, followed by
/// what was made of the arguments.
///
/// Placeholders are kept apart from accepted values, so that an [`Emit`]
/// implementation can highlight them.
///
/// [`Emit`]: crate::Emit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    pub path: Vec<String>,
    pub parts: Vec<UsagePart>,
}

impl Usage {
    pub(crate) fn enter(&mut self, name: &str) {
        self.path.push(name.to_string())
    }

    pub(crate) fn value(&mut self, value: impl fmt::Display) {
        self.parts.push(UsagePart::Value(value.to_string()))
    }

    pub(crate) fn placeholder(&mut self, name: &str) {
        self.parts.push(UsagePart::Placeholder(format!("<{name}>")))
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path.join(" "))?;
        for part in &self.parts {
            match part {
                UsagePart::Value(it) | UsagePart::Placeholder(it) => write!(f, " {it}")?,
            }
        }
        f.write_str(" [args]")
    }
}

/// Lists the child commands of `cmd`, or its arguments.
pub(crate) fn render(cmd: &Command) -> String {
    if !cmd.commands.is_empty() {
        let rows = cmd.commands.iter().map(|it| (it.name.clone(), it.help.as_deref()));
        table("Commands:", rows)
    } else if !cmd.args.is_empty() {
        let rows = cmd.args.iter().map(|it| (it.label(), it.help.as_deref()));
        table("Arguments:", rows)
    } else {
        String::new()
    }
}

fn table<'a>(heading: &str, rows: impl Iterator<Item = (String, Option<&'a str>)>) -> String {
    let rows = rows.collect::<Vec<_>>();
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    let mut buf = String::new();
    w!(buf, "{heading}\n");
    for (label, help) in rows {
        let line = format!("  {label:width$}    {}", help.unwrap_or_default());
        w!(buf, "{}\n", line.trim_end());
    }
    buf
}
