use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;

pub(crate) fn execute(path: &Path, out: &mut impl Write, input: &mut impl BufRead) -> Result<bool> {
    write!(out, "Write changes to {}? (y/N): ", path.display())?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(input: &str) -> bool {
    let choice = input.trim().to_lowercase();
    choice == "y" || choice == "yes"
}
