//! Command-line front end for the `zspell` library. Only built with the
//! `cli` feature (`clap`/`anyhow`/`env_logger`), which keeps those
//! dependencies out of library consumers.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use zspell::DictBuilder;

/// Check spelling against a Hunspell-compatible affix/dictionary pair.
#[derive(Debug, Parser)]
#[command(name = "zspell", version, about)]
struct Args {
    /// Path to the `.aff` affix file.
    #[arg(short = 'a', long)]
    aff: PathBuf,

    /// Path to the `.dic` dictionary file.
    #[arg(short = 'd', long)]
    dic: PathBuf,

    /// Path to an optional personal dictionary file.
    #[arg(short = 'p', long)]
    personal: Option<PathBuf>,

    /// Files to check; reads stdin, one word per line, if none are given.
    files: Vec<PathBuf>,

    /// Print ranked suggestions alongside each misspelled word.
    #[arg(short = 's', long)]
    suggest: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut builder = DictBuilder::new().config_path(&args.aff).dict_path(&args.dic);
    if let Some(personal) = &args.personal {
        builder = builder.personal_path(personal);
    }
    let dict = builder.build().context("failed to load dictionary")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut misspelled_count = 0u32;

    if args.files.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            check_line(&dict, &line.context("failed reading stdin")?, args.suggest, &mut out, &mut misspelled_count)?;
        }
    } else {
        for path in &args.files {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed reading {}", path.display()))?;
            for line in content.lines() {
                check_line(&dict, line, args.suggest, &mut out, &mut misspelled_count)?;
            }
        }
    }

    if misspelled_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn check_line(
    dict: &zspell::Dictionary,
    line: &str,
    suggest: bool,
    out: &mut impl Write,
    misspelled_count: &mut u32,
) -> Result<()> {
    for word in line.split_whitespace() {
        let trimmed = word.trim_matches(|c: char| !c.is_alphanumeric());
        if trimmed.is_empty() || dict.check(trimmed) {
            continue;
        }
        *misspelled_count += 1;
        if suggest {
            let suggestions = dict.entry(trimmed).suggest().unwrap_or_default();
            writeln!(out, "{trimmed}: {}", suggestions.join(", "))?;
        } else {
            writeln!(out, "{trimmed}")?;
        }
    }
    Ok(())
}
