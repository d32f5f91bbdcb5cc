use argtree::{Cli, Command, Emit, Usage, UsagePart};
use expect_test::{expect, Expect};
use futures::executor::block_on;

use crate::{app, args, Calls};

fn check_output(app: &Command, args: &str, expect: Expect) {
    let mut lines = Vec::<String>::new();
    block_on(Cli::new(app, crate::args(args)).run(&mut lines)).unwrap();
    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    expect.assert_eq(&out);
}

#[test]
fn missing_command() {
    check_output(
        &app(&Calls::default()),
        "",
        expect![[r#"
            Usage: app <command> [args]

            Commands:
              cmd1    do the first thing
              cmd2    do the second thing

            You must specify a valid command
        "#]],
    );
}

#[test]
fn missing_required_argument() {
    check_output(
        &app(&Calls::default()),
        "cmd2",
        expect![[r#"
            Usage: app cmd2 <arg1> [args]

            Arguments:
              <arg1>    data
              --arg2    other data

            arg1 is required
        "#]],
    );
}

#[test]
fn rejected_optional_argument() {
    check_output(
        &app(&Calls::default()),
        "cmd1 --arg2=12323",
        expect![[r#"
            Usage: app cmd1 [args]

            Arguments:
              --arg1    data
              --arg2    other data
              --arg3    other data

            arg2 must be less than 1000
        "#]],
    );
}

#[test]
fn success_is_silent() {
    check_output(&app(&Calls::default()), "cmd2 value1", expect![""]);
}

#[test]
fn bare_leaf_keeps_parent_listing() {
    let app = Command::new("app")
        .subcommand(
            Command::new("ping")
                .help("check the connection")
                .action(|_| Err("connection refused".to_string())),
        )
        .subcommand(Command::new("version"));
    check_output(
        &app,
        "ping",
        expect![[r#"
            Usage: app ping [args]

            Commands:
              ping       check the connection
              version

            connection refused
        "#]],
    );
}

#[test]
fn placeholders_are_marked() {
    struct Highlight(String);

    impl Emit for Highlight {
        fn usage(&mut self, usage: &Usage) {
            self.0 += &usage.path.join(" ");
            for part in &usage.parts {
                match part {
                    UsagePart::Value(it) => self.0 += &format!(" {it}"),
                    UsagePart::Placeholder(it) => self.0 += &format!(" *{it}*"),
                }
            }
        }
        fn help(&mut self, _: &str) {}
        fn error(&mut self, error: &str) {
            self.0 += &format!(": {error}");
        }
    }

    let app = app(&Calls::default());
    let mut out = Highlight(String::new());
    block_on(Cli::new(&app, args("cmd2")).run(&mut out)).unwrap();
    assert_eq!(out.0, "app cmd2 *<arg1>*: arg1 is required");

    let mut out = Highlight(String::new());
    block_on(Cli::new(&app, args("cmd2 value1 --arg2=12323")).run(&mut out)).unwrap();
    assert_eq!(out.0, "");
}

#[test]
fn report_help() {
    let app = app(&Calls::default());
    let report = block_on(Cli::new(&app, args("stuff --arg1=x")).resolve()).unwrap();
    assert!(report.is_ok());
    expect![[r#"
        Arguments:
          --arg1    data
          --arg2    other data
          --arg3    other data
    "#]]
    .assert_eq(&report.help);
    assert_eq!(report.usage.to_string(), "app cmd1 [args]");
    assert_eq!(report.options.command(0), Some("stuff"));
}
