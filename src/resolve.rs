//! The resolution walk: dispatch through the command tree, then extract the
//! arguments of the command that was reached.
//!
//! User errors don't stop the walk. The first one is remembered, and every
//! remaining argument is still resolved so that the usage line comes out
//! complete.
use tracing::{debug, trace};

use crate::{
    help::{self, Usage},
    Arg, Command, Options, Result, Tokens, Ty, Value, Verdict,
};

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct Report {
    /// Options collected so far. Partially filled when `error` is set.
    pub options: Options,
    /// The first user error, if any.
    pub error: Option<String>,
    /// Help block of the last command reached.
    pub help: String,
    pub usage: Usage,
    /// Tokens nothing asked for.
    pub remaining: Vec<String>,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Resolves `tokens` against the tree rooted at `root`.
///
/// The action of the reached command runs only if no error came up before
/// it. Errors in the definitions themselves are returned as `Err`.
pub async fn resolve(root: &Command, tokens: Tokens) -> Result<Report> {
    let mut run = Run::new(tokens);
    if let Some(leaf) = run.dispatch(root)? {
        run.extract(leaf).await;
    }
    Ok(run.finish())
}

#[derive(Debug, Default)]
struct FirstError(Option<String>);

impl FirstError {
    fn set(&mut self, msg: String) {
        if self.0.is_none() {
            debug!(error = %msg, "first error");
            self.0 = Some(msg);
        } else {
            trace!(error = %msg, "error ignored, already failed");
        }
    }

    fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

struct Run {
    tokens: Tokens,
    options: Options,
    usage: Usage,
    help: String,
    error: FirstError,
    depth: usize,
}

impl Run {
    fn new(tokens: Tokens) -> Run {
        Run {
            tokens,
            options: Options::new(),
            usage: Usage::default(),
            help: String::new(),
            error: FirstError::default(),
            depth: 0,
        }
    }

    /// Follows command tokens down the tree. Returns the command whose
    /// arguments should be extracted, or `None` if no child matched.
    fn dispatch<'a>(&mut self, mut cmd: &'a Command) -> Result<Option<&'a Command>> {
        loop {
            cmd.check_node()?;
            trace!(command = %cmd.name, depth = self.depth, "enter");
            self.usage.enter(&cmd.name);
            // A bare leaf keeps the listing of its parent.
            if !cmd.commands.is_empty() || !cmd.args.is_empty() {
                self.help = help::render(cmd);
            }
            if cmd.commands.is_empty() {
                return Ok(Some(cmd));
            }

            let matched = self.tokens.peek().and_then(|token| {
                let sub = cmd.commands.iter().find(|it| it.matches(token))?;
                Some((sub, token.to_string()))
            });
            let Some((sub, token)) = matched else {
                self.usage.placeholder("command");
                self.error.set("You must specify a valid command".to_string());
                return Ok(None);
            };
            self.tokens.take_next();
            debug!(command = %sub.name, %token, depth = self.depth, "matched command");
            self.options.insert(format!("command{}", self.depth), Some(Value::Str(token)));
            self.depth += 1;
            cmd = sub;
        }
    }

    async fn extract(&mut self, cmd: &Command) {
        for arg in &cmd.args {
            if arg.required {
                self.required(arg).await;
            } else {
                self.optional(arg).await;
            }
        }

        if self.error.is_set() {
            return;
        }
        if let Some(action) = &cmd.action {
            debug!(command = %cmd.name, "running action");
            if let Some(msg) = rejected(action.run(&self.options).await) {
                self.error.set(msg);
            }
        }
    }

    async fn required(&mut self, arg: &Arg) {
        let Some(token) = self.tokens.take_next() else {
            self.usage.placeholder(&arg.name);
            self.error.set(format!("{} is required", arg.name));
            return;
        };
        let Some(value) = arg.ty.convert(&token) else {
            self.usage.placeholder(&arg.name);
            self.error.set(conversion_error(arg));
            return;
        };
        if let Some(msg) = self.validate(arg, &value).await {
            self.usage.placeholder(&arg.name);
            self.error.set(msg);
            return;
        }
        trace!(arg = %arg.name, ?value, "required");
        self.usage.value(&value);
        self.options.insert(arg.name.clone(), Some(value));
    }

    async fn optional(&mut self, arg: &Arg) {
        let value = match self.tokens.take_flag(&arg.name, arg.ty == Ty::Boolean) {
            None => {
                trace!(arg = %arg.name, default = ?arg.default, "optional, not given");
                self.options.insert(arg.name.clone(), arg.default.clone());
                return;
            }
            Some(None) => Value::Bool(true),
            Some(Some(raw)) => match arg.ty.convert(&raw) {
                Some(it) => it,
                None => {
                    self.error.set(conversion_error(arg));
                    return;
                }
            },
        };
        if let Some(msg) = self.validate(arg, &value).await {
            self.error.set(msg);
            return;
        }
        trace!(arg = %arg.name, ?value, "optional");
        self.options.insert(arg.name.clone(), Some(value));
    }

    async fn validate(&self, arg: &Arg, value: &Value) -> Option<String> {
        let validate = arg.validate.as_ref()?;
        rejected(validate.validate(value, &self.options).await)
    }

    fn finish(self) -> Report {
        Report {
            options: self.options,
            error: self.error.0,
            help: self.help,
            usage: self.usage,
            remaining: self.tokens.remaining().map(String::from).collect(),
        }
    }
}

fn rejected(verdict: Verdict) -> Option<String> {
    verdict.err().filter(|it| !it.is_empty())
}

fn conversion_error(arg: &Arg) -> String {
    match arg.ty {
        Ty::Number => format!("{} must be a number", arg.name),
        Ty::String | Ty::Boolean => format!("{} is invalid", arg.name),
    }
}
