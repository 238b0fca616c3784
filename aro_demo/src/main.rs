// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runs every generated placement case against the reference scene.
//!
//! ```text
//! aro_demo [CONFIG.json] [--svg INDEX] [--out PATH]
//! ```
//!
//! With `--svg`, case `INDEX` is laid out once more after the run and the
//! scene is written as SVG. Set `RUST_LOG=debug` to see per-case geometry.

use std::path::PathBuf;
use std::process::ExitCode;

use aro_demo::SceneSurface;
use aro_harness::{HarnessConfig, HarnessError, Runner};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    svg: Option<usize>,
    out: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--svg" => {
                    let index = args.next().ok_or("--svg needs a case index")?;
                    parsed.svg = Some(
                        index
                            .parse()
                            .map_err(|_| format!("invalid case index {index:?}"))?,
                    );
                }
                "--out" => {
                    parsed.out = Some(args.next().ok_or("--out needs a path")?.into());
                }
                flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
                _ if parsed.config.is_none() => parsed.config = Some(arg.into()),
                _ => return Err(format!("unexpected argument {arg:?}")),
            }
        }
        Ok(parsed)
    }
}

fn run(args: &Args) -> Result<bool, HarnessError> {
    let config = match &args.config {
        Some(path) => HarnessConfig::from_path(path)?,
        None => HarnessConfig::default(),
    };
    let fixture = config.fixture()?;
    let kinds = config.kinds()?;
    let mut runner = Runner::from_config(SceneSurface::new(), &config)?;

    let report = runner.run_all(fixture.cases().with_kinds(&kinds));
    print!("{report}");

    if let Some(index) = args.svg {
        let case = fixture
            .cases()
            .with_kinds(&kinds)
            .find(|c| c.index == index)
            .ok_or_else(|| HarnessError::Config(format!("no case #{index}")))?;
        let result = runner.run_case(&case);
        println!("{result}");
        let path = args
            .out
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("aro_case_{index}.svg")));
        std::fs::write(&path, runner.surface().to_svg_string())
            .map_err(|source| HarnessError::Io {
                path: path.clone(),
                source,
            })?;
        println!("wrote {}", path.display());
    }

    Ok(report.is_success())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!("usage: aro_demo [CONFIG.json] [--svg INDEX] [--out PATH]");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(%err, "harness could not run");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        Args::parse(args.iter().map(|s| (*s).to_string()))
    }

    #[test]
    fn arguments() {
        let args = parse(&["cfg.json", "--svg", "12", "--out", "case.svg"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
        assert_eq!(args.svg, Some(12));
        assert_eq!(args.out, Some(PathBuf::from("case.svg")));

        assert!(parse(&["--svg"]).is_err(), "missing index");
        assert!(parse(&["--svg", "x"]).is_err(), "bad index");
        assert!(parse(&["a.json", "b.json"]).is_err(), "two configs");
        assert!(parse(&["--verbose"]).is_err(), "unknown flag");
    }
}
