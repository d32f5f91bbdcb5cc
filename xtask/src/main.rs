
use std::time::Instant;

use xshell::{cmd, Shell};

fn main() -> xshell::Result<()> {
    let sh = Shell::new()?;

    cmd!(sh, "rustup toolchain install stable --no-self-update").run()?;
    let _e = sh.push_env("RUSTUP_TOOLCHAIN", "stable");
    cmd!(sh, "rustc --version").run()?;

    {
        let _s = section("BUILD");
        cmd!(sh, "cargo test --workspace --no-run").run()?;
        cmd!(sh, "cargo build --examples").run()?;
    }

    {
        let _s = section("TEST");
        cmd!(sh, "cargo test --workspace -- --nocapture").run()?;
    }

    {
        let _s = section("DEMO");
        let greeting = cmd!(sh, "cargo run -q --example hello -- Ferris").read()?;
        assert_eq!(greeting, "Hello Ferris!");

        // User errors are reported on stdout and don't fail the process.
        let usage = cmd!(sh, "cargo run -q --example hello").read()?;
        assert!(usage.starts_with("Usage: hello <name> [args]"), "{usage}");
        assert!(usage.ends_with("name is required"), "{usage}");

        let usage = cmd!(sh, "cargo run -q --example todo -- item add milk --priority=9").read()?;
        assert!(usage.ends_with("priority must be between 1 and 5"), "{usage}");
    }

    {
        let _s = section("PUBLISH");

        let pkgid = cmd!(sh, "cargo pkgid -p argtree").read()?;
        let version = pkgid.rsplit_once(['#', '@']).map_or(pkgid.as_str(), |it| it.1);
        let tag = format!("v{version}");

        let current_branch = cmd!(sh, "git branch --show-current").read()?;
        let tag_exists =
            cmd!(sh, "git tag --list").read()?.split_ascii_whitespace().any(|it| it == tag);

        if current_branch == "master" && !tag_exists {
            cmd!(sh, "git tag {tag}").run()?;
            cmd!(sh, "cargo publish -p argtree").run()?;
            cmd!(sh, "git push --tags").run()?;
        }
    }

    Ok(())
}

fn section(name: &'static str) -> impl Drop {
    println!("::group::{name}");
    let start = Instant::now();
    defer(move || {
        let elapsed = start.elapsed();
        eprintln!("{name}: {elapsed:.2?}");
        println!("::endgroup::");
    })
}

fn defer<F: FnOnce()>(f: F) -> impl Drop {
    struct D<F: FnOnce()>(Option<F>);
    impl<F: FnOnce()> Drop for D<F> {
        fn drop(&mut self) {
            if let Some(f) = self.0.take() {
                f()
            }
        }
    }
    D(Some(f))
}
