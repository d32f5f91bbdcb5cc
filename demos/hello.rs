use argtree::{Arg, Cli, Command, Ty};

fn main() {
    let hello = Command::new("hello")
        .arg(Arg::required("name").help("who to greet"))
        .arg(Arg::optional("emoji").ty(Ty::Boolean).help("end with a heart"))
        .action(|flags| {
            let bang = if flags.get_bool("emoji") == Some(true) { "❣️" } else { "!" };
            println!("Hello {}{}", flags.get_str("name").unwrap_or_default(), bang);
            Ok(())
        });

    if let Err(err) = Cli::from_env(&hello).run_blocking() {
        eprintln!("{}", err);
        std::process::exit(1)
    }
}
