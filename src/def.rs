use std::{fmt, future::Future, sync::Arc};

use async_trait::async_trait;

use crate::{Options, Result, Value};

/// Outcome of a validator or an action. An `Err` with an empty message counts
/// as success.
pub type Verdict = Result<(), String>;

/// Checks a converted argument value.
///
/// `options` holds everything resolved before this argument.
#[async_trait]
pub trait Validate: Send + Sync {
    async fn validate(&self, value: &Value, options: &Options) -> Verdict;
}

/// What a command does once its arguments are resolved.
#[async_trait]
pub trait Action: Send + Sync {
    async fn run(&self, options: &Options) -> Verdict;
}

struct SyncFn<F>(F);

#[async_trait]
impl<F> Validate for SyncFn<F>
where
    F: Fn(&Value, &Options) -> Verdict + Send + Sync,
{
    async fn validate(&self, value: &Value, options: &Options) -> Verdict {
        (self.0)(value, options)
    }
}

#[async_trait]
impl<F> Action for SyncFn<F>
where
    F: Fn(&Options) -> Verdict + Send + Sync,
{
    async fn run(&self, options: &Options) -> Verdict {
        (self.0)(options)
    }
}

struct AsyncFn<F>(F);

#[async_trait]
impl<F, Fut> Validate for AsyncFn<F>
where
    F: Fn(Value, Options) -> Fut + Send + Sync,
    Fut: Future<Output = Verdict> + Send + 'static,
{
    async fn validate(&self, value: &Value, options: &Options) -> Verdict {
        (self.0)(value.clone(), options.clone()).await
    }
}

#[async_trait]
impl<F, Fut> Action for AsyncFn<F>
where
    F: Fn(Options) -> Fut + Send + Sync,
    Fut: Future<Output = Verdict> + Send + 'static,
{
    async fn run(&self, options: &Options) -> Verdict {
        (self.0)(options.clone()).await
    }
}

/// How an argument token is converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ty {
    #[default]
    String,
    Number,
    Boolean,
}

impl Ty {
    /// Converts a raw token. Only [`Ty::Number`] can fail.
    pub fn convert(self, raw: &str) -> Option<Value> {
        let res = match self {
            Ty::String => Value::Str(raw.to_string()),
            Ty::Number => {
                let n = raw.trim().parse::<f64>().ok().filter(|it| !it.is_nan())?;
                Value::Num(n)
            }
            Ty::Boolean => {
                let falsy = ["false", "0", "f", "no"];
                Value::Bool(!falsy.iter().any(|it| raw.eq_ignore_ascii_case(it)))
            }
        };
        Some(res)
    }
}

/// A parameter of a leaf command.
///
/// Required arguments are positional and consumed in declaration order.
/// Optional arguments are given as `--name=value`, or as a bare `--name` for
/// [`Ty::Boolean`].
#[derive(Clone)]
pub struct Arg {
    pub(crate) name: String,
    pub(crate) required: bool,
    pub(crate) ty: Ty,
    pub(crate) default: Option<Value>,
    pub(crate) help: Option<String>,
    pub(crate) validate: Option<Arc<dyn Validate>>,
}

impl Arg {
    pub fn required(name: impl Into<String>) -> Arg {
        Arg::new(name, true)
    }

    pub fn optional(name: impl Into<String>) -> Arg {
        Arg::new(name, false)
    }

    fn new(name: impl Into<String>, required: bool) -> Arg {
        Arg {
            name: name.into(),
            required,
            ty: Ty::default(),
            default: None,
            help: None,
            validate: None,
        }
    }

    pub fn ty(mut self, ty: Ty) -> Arg {
        self.ty = ty;
        self
    }

    /// Value used when an optional argument is not given.
    pub fn default(mut self, value: impl Into<Value>) -> Arg {
        self.default = Some(value.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Arg {
        self.help = Some(help.into());
        self
    }

    pub fn validate<F>(self, f: F) -> Arg
    where
        F: Fn(&Value, &Options) -> Verdict + Send + Sync + 'static,
    {
        self.validate_with(SyncFn(f))
    }

    pub fn validate_async<F, Fut>(self, f: F) -> Arg
    where
        F: Fn(Value, Options) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Verdict> + Send + 'static,
    {
        self.validate_with(AsyncFn(f))
    }

    pub fn validate_with(mut self, validate: impl Validate + 'static) -> Arg {
        self.validate = Some(Arc::new(validate));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// How the argument appears in help and usage: `<name>` or `--name`.
    pub fn label(&self) -> String {
        if self.required {
            format!("<{}>", self.name)
        } else {
            format!("--{}", self.name)
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arg")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("ty", &self.ty)
            .field("default", &self.default)
            .field("help", &self.help)
            .field("validate", &self.validate.is_some())
            .finish()
    }
}

/// A node of the command tree.
///
/// A command either dispatches to child commands or declares its own
/// arguments, never both.
#[derive(Clone)]
pub struct Command {
    pub(crate) name: String,
    pub(crate) help: Option<String>,
    pub(crate) aliases: Vec<String>,
    pub(crate) commands: Vec<Command>,
    pub(crate) args: Vec<Arg>,
    pub(crate) action: Option<Arc<dyn Action>>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Command {
        Command {
            name: name.into(),
            help: None,
            aliases: Vec::new(),
            commands: Vec::new(),
            args: Vec::new(),
            action: None,
        }
    }

    pub fn help(mut self, help: impl Into<String>) -> Command {
        self.help = Some(help.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Command {
        self.aliases.push(alias.into());
        self
    }

    pub fn aliases<I>(mut self, aliases: I) -> Command
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn subcommand(mut self, command: Command) -> Command {
        self.commands.push(command);
        self
    }

    pub fn arg(mut self, arg: Arg) -> Command {
        self.args.push(arg);
        self
    }

    pub fn action<F>(self, f: F) -> Command
    where
        F: Fn(&Options) -> Verdict + Send + Sync + 'static,
    {
        self.action_with(SyncFn(f))
    }

    pub fn action_async<F, Fut>(self, f: F) -> Command
    where
        F: Fn(Options) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Verdict> + Send + 'static,
    {
        self.action_with(AsyncFn(f))
    }

    pub fn action_with(mut self, action: impl Action + 'static) -> Command {
        self.action = Some(Arc::new(action));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub(crate) fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|it| it == token)
    }

    /// Checks this node alone, see [`Command::check`].
    pub(crate) fn check_node(&self) -> Result<()> {
        if self.name.is_empty() {
            bail!("name is required")
        }
        if !self.commands.is_empty() && !self.args.is_empty() {
            bail!("a command may not have child commands and arguments: `{}`", self.name)
        }
        Ok(())
    }

    /// Checks the whole tree for definition mistakes: unnamed commands and
    /// commands with both child commands and arguments.
    pub fn check(&self) -> Result<()> {
        self.check_node()?;
        self.commands.iter().try_for_each(Command::check)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("aliases", &self.aliases)
            .field("commands", &self.commands)
            .field("args", &self.args)
            .field("action", &self.action.is_some())
            .finish()
    }
}
