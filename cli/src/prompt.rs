//! Line-oriented stdin prompts.

use std::io::{self, BufRead, Write};

use anyhow::Context as _;

/// Ask a yes/no question; anything but "y" or "yes" is a no.
pub(crate) fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let answer = read_line()?.unwrap_or_default();
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Value from `env_value`, or else the next stdin line without its newline.
pub(crate) fn secret(env_value: Option<String>, what: &str) -> anyhow::Result<String> {
    if let Some(value) = env_value {
        return Ok(value);
    }
    read_line()?
        .map(|line| line.trim_end_matches(['\r', '\n']).to_string())
        .with_context(|| format!("no {what} on stdin"))
}

fn read_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    Ok((read > 0).then_some(line))
}
