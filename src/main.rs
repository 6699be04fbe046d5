use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use padcalc::calculator::Operator;
use padcalc::{Config, Editor, InputEvent};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Keypad calculator driven from standard input.
///
/// Every character of a line is one key: digits, `.`, operators
/// (`+ - * x / × ÷`), `(` or `)` for the bracket key, `=` to evaluate,
/// `c` to clear and `<` for backspace. Lines starting with `:` are
/// commands: `:paste <text>`, `:copy` and `:history`.
#[derive(Debug, Parser)]
#[command(name = "padcalc", version, about)]
struct Cli {
    /// Config file (defaults to <config dir>/padcalc/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the input line width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Print the full editor state as JSON after each line
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config =
        Config::load_or_default(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(width) = cli.width {
        config.display.width = width;
    }

    let mut editor = config.editor();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;

        if let Some(command) = line.strip_prefix(':') {
            run_command(&mut editor, command, &mut stdout)?;
        } else {
            for key in line.chars() {
                let Some(event) = key_event(key) else {
                    warn!(%key, "unmapped key");
                    continue;
                };
                if let Err(e) = editor.handle(event) {
                    writeln!(stdout, "error: {}", e)?;
                }
            }
        }

        print_state(&editor, cli.json, &mut stdout)?;
    }

    Ok(())
}

/// Map a typed character to a keypad event.
fn key_event(key: char) -> Option<InputEvent> {
    let event = match key {
        '0'..='9' => InputEvent::Digit(key),
        '.' | '。' => InputEvent::Point,
        '(' | ')' | '（' | '）' => InputEvent::Bracket,
        '=' => InputEvent::Equals,
        'c' | 'C' => InputEvent::Clear,
        '<' => InputEvent::Backspace,
        other => InputEvent::Symbol(Operator::from_char(other)?),
    };
    Some(event)
}

fn run_command(editor: &mut Editor, command: &str, out: &mut impl Write) -> Result<()> {
    let (name, argument) = command.split_once(' ').unwrap_or((command, ""));

    match name {
        "paste" => {
            let mut text = editor.buffer().to_string();
            text.push_str(argument);
            let caret = text.chars().count();
            editor.handle(InputEvent::TextReplaced { text, caret })?;
        }
        "copy" => editor.handle(InputEvent::Copy)?,
        "history" => {
            for record in editor.history().records() {
                writeln!(out, "{}", record)?;
            }
        }
        other => writeln!(out, "unknown command: {}", other)?,
    }

    Ok(())
}

fn print_state(editor: &Editor, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        let state = serde_json::to_string(editor.state()).context("Failed to encode state")?;
        writeln!(out, "{}", state)?;
    } else {
        writeln!(out, "{}", editor.buffer())?;
    }
    Ok(())
}
