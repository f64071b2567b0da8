//! Source audit: every `unsafe { .. }` block carries a `// SAFETY:` comment.
//!
//! Mirrors clippy's `undocumented_unsafe_blocks` closely enough to fail fast
//! with a file:line list before the slower clippy pass runs.

use std::fs;
use std::path::{Path, PathBuf};

const ROOTS: &[&str] = &["crates/relay_core", "crates/relay_multicast"];

pub fn unsafe_audit() -> Result<(), String> {
    let mut missing = Vec::new();
    for root in ROOTS {
        for file in rust_files(Path::new(root))? {
            let src = fs::read_to_string(&file)
                .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;
            for line in undocumented_unsafe(&src) {
                missing.push(format!("{}:{line}", file.display()));
            }
        }
    }
    if missing.is_empty() {
        return Ok(());
    }
    Err(format!(
        "unsafe blocks without a `// SAFETY:` comment:\n{}",
        missing.join("\n")
    ))
}

fn rust_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let mut out = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries =
            fs::read_dir(&dir).map_err(|e| format!("Failed to list {}: {e}", dir.display()))?;
        for entry in entries {
            let path = entry
                .map_err(|e| format!("Failed to list {}: {e}", dir.display()))?
                .path();
            if path.is_dir() {
                if path.file_name().is_some_and(|n| n != "target") {
                    pending.push(path);
                }
            } else if path.extension().is_some_and(|e| e == "rs") {
                out.push(path);
            }
        }
    }
    out.sort();
    Ok(out)
}

/// 1-based lines opening an `unsafe` block with no `// SAFETY:` comment in
/// the comment run above it. A statement split after `=` is followed up to
/// its first line.
fn undocumented_unsafe(src: &str) -> Vec<usize> {
    let lines: Vec<&str> = src.lines().collect();
    let mut out = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let code = line.split("//").next().unwrap_or_default();
        if !code.contains("unsafe {") {
            continue;
        }
        if !has_safety_comment(&lines, idx) {
            out.push(idx + 1);
        }
    }
    out
}

fn has_safety_comment(lines: &[&str], mut idx: usize) -> bool {
    while idx > 0 {
        idx -= 1;
        let prev = lines[idx].trim();
        if prev.starts_with("// SAFETY:") {
            return true;
        }
        if prev.starts_with("//") && !prev.starts_with("///") {
            continue;
        }
        if prev.ends_with('=') {
            continue;
        }
        return false;
    }
    false
}
