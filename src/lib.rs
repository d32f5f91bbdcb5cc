//! Declarative command tree argument parser.
//!
//! A program describes its commands and arguments as a tree of [`Command`]s.
//! [`Cli`] walks that tree over the process arguments, converts and validates
//! the arguments of the command that was invoked and hands the collected
//! [`Options`] to the command's action. When something is wrong with the
//! input, a usage line, a help block and the first error are emitted instead.
//!
//! ```no_run
//! use argtree::{Arg, Cli, Command, Ty};
//!
//! let app = Command::new("app").subcommand(
//!     Command::new("greet")
//!         .help("say hello")
//!         .arg(Arg::required("name").help("who to greet"))
//!         .arg(Arg::optional("loud").ty(Ty::Boolean))
//!         .action(|opts| {
//!             let name = opts.get_str("name").unwrap_or_default();
//!             println!("hello {name}");
//!             Ok(())
//!         }),
//! );
//!
//! Cli::from_env(&app).run_blocking().unwrap();
//! ```
use std::fmt;

macro_rules! format_err {
    ($($tt:tt)*) => {
        $crate::Error { msg: format!($($tt)*) }
    };
}

macro_rules! bail {
    ($($tt:tt)*) => {
        return Err(format_err!($($tt)*))
    };
}

mod cli;
mod def;
mod help;
mod resolve;
mod tokens;
mod value;

pub use crate::{
    cli::{Cli, Emit, Stdout},
    def::{Action, Arg, Command, Ty, Validate, Verdict},
    help::{Usage, UsagePart},
    resolve::{resolve, Report},
    tokens::Tokens,
    value::{Options, Value},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A mistake in the command definitions themselves.
///
/// Problems with the user's input are never reported through this type, they
/// end up in [`Report::error`].
#[derive(Debug)]
pub struct Error {
    msg: String,
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.msg, f)
    }
}
