use std::process::{Command, Output};

/// Runs `cmd` with `args`, echoing the command line to stderr first.
pub fn run_args(cmd: &str, args: &[&str]) -> Result<Output, String> {
    eprintln!("$ {}", command_line(cmd, args));
    Command::new(cmd)
        .args(args)
        .output()
        .map_err(|e| format!("Failed to run {cmd}: {e}"))
}

/// Like [`run_args`], but a non-zero exit is an error carrying the output.
pub fn run_checked(cmd: &str, args: &[&str]) -> Result<Output, String> {
    let o = run_args(cmd, args)?;
    if o.status.success() {
        return Ok(o);
    }
    Err(format!(
        "`{}` failed ({}):\n{}",
        command_line(cmd, args),
        o.status,
        format_output(&o)
    ))
}

pub fn format_output(o: &Output) -> String {
    let mut s = String::new();
    for (label, bytes) in [("stdout", &o.stdout), ("stderr", &o.stderr)] {
        if bytes.is_empty() {
            continue;
        }
        s.push_str(label);
        s.push_str(":\n");
        s.push_str(&String::from_utf8_lossy(bytes));
        if !s.ends_with('\n') {
            s.push('\n');
        }
    }
    if s.is_empty() {
        s.push_str("(no output)\n");
    }
    s
}

/// Copy-pasteable POSIX rendering of a command.
fn command_line(cmd: &str, args: &[&str]) -> String {
    let mut line = quote(cmd);
    for a in args {
        line.push(' ');
        line.push_str(&quote(a));
    }
    line
}

fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"-_./:=+,@".contains(&b));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
