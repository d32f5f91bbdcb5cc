//! A small todo list with nested commands and async callbacks.
//!
//! `RUST_LOG=argtree=trace cargo run --example todo -- item add milk --priority=2`
use std::sync::{Arc, Mutex};

use argtree::{Arg, Cli, Command, Options, Ty, Value, Verdict};
use tracing_subscriber::EnvFilter;

type List = Arc<Mutex<Vec<(String, f64)>>>;

fn priority(value: &Value, _: &Options) -> Verdict {
    match value.as_num() {
        Some(it) if (1.0..=5.0).contains(&it) => Ok(()),
        _ => Err("priority must be between 1 and 5".to_string()),
    }
}

fn app(list: &List) -> Command {
    let add = {
        let list = list.clone();
        Command::new("add")
            .alias("a")
            .help("add an item")
            .arg(Arg::required("text").help("what needs doing"))
            .arg(
                Arg::optional("priority")
                    .ty(Ty::Number)
                    .default(3)
                    .validate(priority)
                    .help("1 (highest) to 5"),
            )
            .action_async(move |opts| {
                let list = list.clone();
                async move {
                    let text = opts.get_str("text").unwrap_or_default().to_string();
                    let priority = opts.get_num("priority").unwrap_or(3.0);
                    match list.lock() {
                        Ok(mut list) => {
                            list.push((text, priority));
                            Ok(())
                        }
                        Err(err) => Err(err.to_string()),
                    }
                }
            })
    };

    let done = {
        let list = list.clone();
        Command::new("done")
            .aliases(["rm", "remove"])
            .help("remove an item")
            .arg(Arg::required("index").ty(Ty::Number))
            .action(move |opts| {
                let mut list = list.lock().map_err(|err| err.to_string())?;
                let index = opts.get_num("index").unwrap_or(-1.0);
                if index < 0.0 || index as usize >= list.len() {
                    return Err(format!("no item at {index}"));
                }
                list.remove(index as usize);
                Ok(())
            })
    };

    let show = {
        let list = list.clone();
        Command::new("list").help("show all items").action(move |_| {
            let list = list.lock().map_err(|err| err.to_string())?;
            for (i, (text, priority)) in list.iter().enumerate() {
                println!("{i}: [{priority}] {text}");
            }
            Ok(())
        })
    };

    Command::new("todo")
        .subcommand(Command::new("item").help("manage items").subcommand(add).subcommand(done))
        .subcommand(show)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let list = List::default();
    let app = app(&list);
    if let Err(err) = app.check().and_then(|()| Cli::from_env(&app).run_blocking()) {
        eprintln!("{}", err);
        std::process::exit(1)
    }
    if let Ok(list) = list.lock() {
        for (text, priority) in list.iter() {
            println!("added: {text} ({priority})");
        }
    };
}
