//! Workspace automation: `cargo run -p xtask -- <command>`.
use std::env;

mod audit;
mod perf;
mod process;

use process::{run_args, run_checked};

const LIB_PACKAGES: &[&str] = &["relay_core", "relay_multicast"];

fn main() {
    let mut args = env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| "verify".to_string());
    let next = args.next();
    let result = match cmd.as_str() {
        "verify" => verify(),
        "fmt" => fmt_check(),
        "clippy" => clippy(),
        "lint" => lint_strict(),
        "audit" => audit::unsafe_audit(),
        "check-unused" => check_unused(),
        "test" => test_workspace(),
        "doc" => doc_tests(),
        "miri" => miri(),
        "perf" => perf::perf(next.as_deref()),
        _ => usage_error(&cmd),
    };
    if let Err(msg) = result {
        eprintln!("{msg}");
        std::process::exit(1);
    }
}

fn usage_error(cmd: &str) -> Result<(), String> {
    Err(format!(
        "Unknown command: {cmd}\nUsage: cargo run -p xtask -- <verify|fmt|clippy|lint|audit|check-unused|test|doc|miri|perf [update-baseline]>"
    ))
}

fn verify() -> Result<(), String> {
    fmt_check()?;
    lint_strict()?;
    test_workspace()?;
    doc_tests()?;
    if env::var("RELAY_MIRI").ok().as_deref() == Some("1") {
        miri()?;
    }
    if env::var("RELAY_PERF").ok().as_deref() == Some("1") {
        perf::perf(None)?;
    }
    Ok(())
}

fn fmt_check() -> Result<(), String> {
    run_checked("cargo", &["fmt", "--all", "--", "--check"]).map(|_| ())
}

fn clippy() -> Result<(), String> {
    clippy_with(&[])
}

/// `clippy` plus the extra groups and the unsafe-block documentation lint.
fn lint_strict() -> Result<(), String> {
    audit::unsafe_audit()?;
    clippy_with(&[
        "-W",
        "clippy::all",
        "-W",
        "clippy::perf",
        "-W",
        "clippy::undocumented_unsafe_blocks",
    ])
}

fn clippy_with(lints: &[&str]) -> Result<(), String> {
    let mut args = vec!["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"];
    args.extend_from_slice(lints);
    run_checked("cargo", &args).map(|_| ())
}

fn check_unused() -> Result<(), String> {
    run_checked("cargo", &["udeps", "--workspace"]).map(|_| ())
}

fn test_workspace() -> Result<(), String> {
    run_checked("cargo", &["test", "--workspace"]).map(|_| ())
}

fn doc_tests() -> Result<(), String> {
    let mut args = vec!["test", "--doc"];
    for &p in LIB_PACKAGES {
        args.extend(["-p", p]);
    }
    run_checked("cargo", &args).map(|_| ())
}

/// The binding paths are built on raw pointers; Miri checks them for UB.
fn miri() -> Result<(), String> {
    let mut args = vec!["+nightly", "miri", "test"];
    for &p in LIB_PACKAGES {
        args.extend(["-p", p]);
    }
    let o = run_args("cargo", &args)?;
    if !o.status.success() {
        return Err(format!(
            "miri failed (is the nightly miri component installed?):\n{}",
            process::format_output(&o)
        ));
    }
    Ok(())
}
