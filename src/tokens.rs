use std::ffi::OsString;

/// Command line tokens that are yet to be consumed.
///
/// Tokens only ever leave the queue: once taken, a token can't be matched
/// again.
#[derive(Debug, Clone, Default)]
pub struct Tokens {
    // Reversed, so that the next token is at the end.
    rargs: Vec<String>,
}

impl Tokens {
    pub fn new(mut args: Vec<String>) -> Self {
        args.reverse();
        Self { rargs: args }
    }

    /// Process arguments without the program name.
    pub fn from_env() -> Self {
        Self::from_os(std::env::args_os().skip(1).collect())
    }

    pub fn from_os(args: Vec<OsString>) -> Self {
        Self::new(args.into_iter().map(|it| it.to_string_lossy().into_owned()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.rargs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rargs.len()
    }

    pub fn peek(&self) -> Option<&str> {
        self.rargs.last().map(String::as_str)
    }

    /// Takes the next token, whatever it looks like.
    pub fn take_next(&mut self) -> Option<String> {
        self.rargs.pop()
    }

    /// Takes the first `--name=value` token, or a bare `--name` if `bare` is
    /// set. Returns the value part, `None` for the bare form.
    pub fn take_flag(&mut self, name: &str, bare: bool) -> Option<Option<String>> {
        let (i, value) = self.rargs.iter().enumerate().rev().find_map(|(i, arg)| {
            let flag = arg.strip_prefix("--")?;
            match flag.split_once('=') {
                Some((it, value)) if it == name => Some((i, Some(value.to_string()))),
                None if bare && flag == name => Some((i, None)),
                _ => None,
            }
        })?;
        self.rargs.remove(i);
        Some(value)
    }

    /// The tokens left over, in command line order.
    pub fn remaining(&self) -> impl Iterator<Item = &str> + '_ {
        self.rargs.iter().rev().map(String::as_str)
    }
}
