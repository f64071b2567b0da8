//! Dispatch-cost regression gate.
//!
//! Runs the ignored `perf_*` tests in release mode, keeps the best of N runs
//! per metric and compares against `perf/baseline.json`.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

use serde::{Deserialize, Serialize};

use crate::process::run_checked;

const BASELINE_VERSION: u32 = 1;

/// (package, test target) pairs that print `PERF|id|key=ms|...` lines.
const SUITES: &[(&str, &str)] = &[
    ("relay_core", "perf_dispatch"),
    ("relay_multicast", "perf_fanout"),
];

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct Baseline {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    metrics: BTreeMap<String, u64>,
}

struct Gate {
    runs: usize,
    ratio: f64,
    abs_ms: u64,
}

impl Gate {
    fn from_env() -> Self {
        Self {
            runs: env_parse("RELAY_PERF_RUNS").unwrap_or(3usize).max(1),
            ratio: env_parse("RELAY_PERF_MAX_RATIO").unwrap_or(1.5),
            abs_ms: env_parse("RELAY_PERF_MAX_ABS_MS").unwrap_or(20),
        }
    }

    fn allowed(&self, base: u64) -> u64 {
        ((base as f64) * self.ratio).ceil() as u64 + self.abs_ms
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse::<T>().ok())
}

pub fn perf(mode: Option<&str>) -> Result<(), String> {
    let update_baseline = matches!(mode, Some("update-baseline"))
        || env::var("RELAY_PERF_UPDATE").ok().as_deref() == Some("1");
    let gate = Gate::from_env();

    let baseline_path = PathBuf::from("perf").join("baseline.json");
    let baseline = read_baseline(&baseline_path)?;

    let mut best: BTreeMap<String, u64> = BTreeMap::new();
    for _ in 0..gate.runs {
        for (k, v) in run_perf_suite()? {
            best.entry(k)
                .and_modify(|cur| *cur = (*cur).min(v))
                .or_insert(v);
        }
    }
    for (k, v) in &best {
        eprintln!("PERF_RESULT {k}={v}");
    }

    if update_baseline {
        return write_baseline(
            &baseline_path,
            &Baseline {
                version: BASELINE_VERSION,
                metrics: best,
            },
        );
    }

    let failures = compare(&gate, &baseline.metrics, &best);
    if !failures.is_empty() {
        return Err(format!(
            "perf gate failed (set RELAY_PERF_UPDATE=1 to refresh baseline):\n{}",
            failures.join("\n")
        ));
    }
    Ok(())
}

fn compare(gate: &Gate, baseline: &BTreeMap<String, u64>, measured: &BTreeMap<String, u64>) -> Vec<String> {
    let mut failures = Vec::new();
    for (k, &m) in measured {
        let Some(&base) = baseline.get(k) else {
            continue;
        };
        if base == 0 {
            continue;
        }
        let allowed = gate.allowed(base);
        if m > allowed {
            failures.push(format!(
                "{k}: measured={m}ms baseline={base}ms allowed<={allowed}ms"
            ));
        }
    }
    failures
}

fn run_perf_suite() -> Result<BTreeMap<String, u64>, String> {
    let mut out = BTreeMap::new();
    for &(package, test) in SUITES {
        let o = run_checked(
            "cargo",
            &[
                "test",
                "-q",
                "-p",
                package,
                "--test",
                test,
                "--release",
                "--",
                "--ignored",
                "--nocapture",
            ],
        )?;
        parse_perf_output(&mut out, &o)?;
    }
    Ok(out)
}

fn parse_perf_output(out: &mut BTreeMap<String, u64>, output: &Output) -> Result<(), String> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_perf_lines(out, &stdout)
}

fn parse_perf_lines(out: &mut BTreeMap<String, u64>, text: &str) -> Result<(), String> {
    for line in text.lines() {
        let Some(pos) = line.find("PERF|") else {
            continue;
        };
        let mut it = line[pos + "PERF|".len()..].split('|');
        let Some(test_id) = it.next() else {
            continue;
        };
        for part in it {
            let (k, v) = part
                .split_once('=')
                .ok_or_else(|| format!("Bad perf key/value: {line}"))?;
            let val: u64 = v
                .trim()
                .parse()
                .map_err(|_| format!("Bad perf value in: {line}"))?;
            out.insert(format!("{test_id}.{k}"), val);
        }
    }
    Ok(())
}

fn read_baseline(path: &Path) -> Result<Baseline, String> {
    let input = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Baseline::default()),
        Err(e) => return Err(format!("Failed to read baseline {}: {e}", path.display())),
    };
    let baseline = serde_json::from_str::<Baseline>(&input)
        .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
    if baseline.version > BASELINE_VERSION {
        return Err(format!(
            "{} has version {}, this xtask understands up to {BASELINE_VERSION}",
            path.display(),
            baseline.version
        ));
    }
    Ok(baseline)
}

fn write_baseline(path: &Path, baseline: &Baseline) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create dir {}: {e}", parent.display()))?;
    }
    let mut s = serde_json::to_string_pretty(baseline)
        .map_err(|e| format!("Failed to encode baseline: {e}"))?;
    s.push('\n');
    fs::write(path, s).map_err(|e| format!("Failed to write baseline {}: {e}", path.display()))
}
