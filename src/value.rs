use std::fmt;

/// A converted argument value.
#[derive(Clone, PartialEq)]
pub enum Value {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(it) => Some(it),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(it) => Some(*it),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(it) => Some(*it),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(it: &str) -> Value {
        Value::Str(it.to_string())
    }
}

impl From<String> for Value {
    fn from(it: String) -> Value {
        Value::Str(it)
    }
}

impl From<f64> for Value {
    fn from(it: f64) -> Value {
        Value::Num(it)
    }
}

impl From<i32> for Value {
    fn from(it: i32) -> Value {
        Value::Num(it.into())
    }
}

impl From<bool> for Value {
    fn from(it: bool) -> Value {
        Value::Bool(it)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(it) => f.write_str(it),
            // `42` rather than `42.0`, so that the value reads like the token it came from.
            Value::Num(it) if it.fract() == 0.0 && it.abs() < 1e15 => write!(f, "{}", *it as i64),
            Value::Num(it) => write!(f, "{it}"),
            Value::Bool(it) => write!(f, "{it}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(it) => fmt::Debug::fmt(it, f),
            Value::Num(_) | Value::Bool(_) => fmt::Display::fmt(self, f),
        }
    }
}

/// Options collected while resolving a command line.
///
/// Holds one `commandN` entry per dispatched command and one entry per
/// argument of the invoked command, in the order they were resolved. An
/// optional argument that was neither given nor defaulted is still present,
/// with no value.
#[derive(Clone, Default, PartialEq)]
pub struct Options {
    entries: Vec<(String, Option<Value>)>,
}

impl Options {
    pub fn new() -> Options {
        Options::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<Value>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(it, _)| *it == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(it, _)| it == name).and_then(|(_, value)| value.as_ref())
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_num(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_num)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// The token that selected the command at `depth`.
    pub fn command(&self, depth: usize) -> Option<&str> {
        self.get_str(&format!("command{depth}"))
    }

    /// Whether `name` was written at all, even without a value.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(it, _)| it == name)
    }

    /// Whether `name` holds a value.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> + '_ {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Unset;
        impl fmt::Debug for Unset {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("<unset>")
            }
        }

        let mut map = f.debug_map();
        for (name, value) in &self.entries {
            match value {
                Some(value) => map.entry(name, value),
                None => map.entry(name, &Unset),
            };
        }
        map.finish()
    }
}
