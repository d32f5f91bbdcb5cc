use std::ffi::OsString;

use crate::{resolve, Command, Report, Result, Tokens, Usage};

/// Where a failed run reports to.
///
/// Called with the usage line, then the help block, then the error.
pub trait Emit {
    fn usage(&mut self, usage: &Usage);
    fn help(&mut self, help: &str);
    fn error(&mut self, error: &str);
}

/// Plain text on standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stdout;

impl Emit for Stdout {
    fn usage(&mut self, usage: &Usage) {
        println!("Usage: {usage}");
        println!();
    }
    fn help(&mut self, help: &str) {
        println!("{help}");
    }
    fn error(&mut self, error: &str) {
        println!("{error}");
    }
}

/// Collects the lines that [`Stdout`] would print.
impl Emit for Vec<String> {
    fn usage(&mut self, usage: &Usage) {
        self.push(format!("Usage: {usage}"));
        self.push(String::new());
    }
    fn help(&mut self, help: &str) {
        self.extend(help.lines().map(String::from));
        self.push(String::new());
    }
    fn error(&mut self, error: &str) {
        self.push(error.to_string());
    }
}

/// One invocation of a command tree.
#[derive(Debug)]
pub struct Cli<'a> {
    root: &'a Command,
    tokens: Tokens,
}

impl<'a> Cli<'a> {
    pub fn new(root: &'a Command, args: Vec<String>) -> Self {
        Cli { root, tokens: Tokens::new(args) }
    }

    pub fn from_os(root: &'a Command, args: Vec<OsString>) -> Self {
        Cli { root, tokens: Tokens::from_os(args) }
    }

    /// Takes the process arguments, minus the program name.
    pub fn from_env(root: &'a Command) -> Self {
        Cli { root, tokens: Tokens::from_env() }
    }

    pub async fn resolve(self) -> Result<Report> {
        resolve::resolve(self.root, self.tokens).await
    }

    /// Runs without printing anything: `Ok(None)` on success, the error a
    /// user would see otherwise.
    pub async fn run_testing(self) -> Result<Option<String>> {
        Ok(self.resolve().await?.error)
    }

    /// Runs, reporting a failure through `emit`.
    pub async fn run(self, emit: &mut dyn Emit) -> Result<()> {
        let report = self.resolve().await?;
        if let Some(error) = &report.error {
            emit.usage(&report.usage);
            emit.help(&report.help);
            emit.error(error);
        }
        Ok(())
    }

    /// [`Cli::run`] to [`Stdout`] on the current thread.
    pub fn run_blocking(self) -> Result<()> {
        futures::executor::block_on(self.run(&mut Stdout))
    }
}
