//! ampm-tk - Apple Music developer token generator
//!
//! One-shot interactive tool: loads the signing key config (writing a
//! template on first run), prints a freshly signed developer token for the
//! operator to copy, then offers to delete the file holding the private key.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use ampm_tk::config::{self, DEFAULT_CONFIG_FILE};
use ampm_tk::token::generate_developer_token;

#[derive(Debug, Parser)]
#[command(name = "ampm-tk", about = "Apple Music developer token generator")]
struct Args {
    /// Path to the signing key config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Keep the config file without asking
    #[arg(long)]
    keep: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let Some(signing_config) = config::load_or_create_template(&args.config)? else {
        println!("Configuration template created: {}", args.config.display());
        println!("Please fill in your TEAM_ID, KEY_ID, and PRIVATE_KEY, then rerun.");
        return Ok(());
    };

    let token = generate_developer_token(&signing_config, Utc::now().timestamp())?;
    println!("Developer Token: {token}");

    if args.keep {
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    if confirm_delete(&args.config, &mut stdin.lock(), &mut stdout)? {
        std::fs::remove_file(&args.config)?;
        println!("{} has been deleted.", args.config.display());
    } else {
        println!("{} has been kept.", args.config.display());
    }

    Ok(())
}

/// Ask whether to delete the key file. Only an exact "yes" deletes; any
/// other answer keeps the file.
fn confirm_delete(path: &Path, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(
        output,
        "Do you want to delete the {} file? (yes/no): ",
        path.display()
    )?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(text: &str) -> bool {
        let mut input = Cursor::new(text.to_string());
        let mut output = Vec::new();
        confirm_delete(Path::new("apple_music_config.json"), &mut input, &mut output).unwrap()
    }

    #[test]
    fn only_yes_deletes() {
        assert!(answer("yes\n"));
        assert!(answer("YES\n"));
        assert!(answer("  yes  \n"));
    }

    #[test]
    fn anything_else_keeps_the_file() {
        assert!(!answer("no\n"));
        assert!(!answer("y\n"));
        assert!(!answer("\n"));
        assert!(!answer("delete it\n"));
        assert!(!answer(""));
    }
}
