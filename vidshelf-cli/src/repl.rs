//! Interactive session loop.

use std::io::{self, BufRead, Write};

use vidshelf_core::VideoPlayer;

use crate::commands::{Command, ParseError, Response, handle_command};
use crate::render;

const PROMPT: &str = "vidshelf> ";

/// Reads commands from `input` until `EXIT` or end of input, writing every
/// response to `output`.
///
/// # Errors
/// - `io::Error` - Reading input or writing output failed
pub fn run<R: BufRead, W: Write>(
    player: &mut VideoPlayer,
    input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(output, "Hello and welcome to vidshelf, what would you like to do?")?;
    writeln!(output, "Enter HELP for list of available commands or EXIT to terminate.")?;

    let mut input_lines = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let Some(line) = input_lines.next() else {
            break;
        };
        let line = line?;

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(ParseError::Empty) => continue,
            Err(e) => {
                tracing::warn!("Rejected input '{}': {}", line.trim(), e);
                writeln!(output, "{e}")?;
                continue;
            }
        };

        match handle_command(player, command) {
            Response::Lines(lines) => write_lines(&mut output, &lines)?,
            Response::Search { lines, results } => {
                write_lines(&mut output, &lines)?;
                output.flush()?;

                let answer = input_lines.next().transpose()?.unwrap_or_default();
                match player.play_selection(&results, &answer) {
                    Ok(Some(transition)) => {
                        write_lines(&mut output, &render::transition(&transition))?;
                    }
                    Ok(None) => {}
                    Err(e) => writeln!(output, "{}", render::failure("Cannot play video", &e))?,
                }
            }
            Response::Exit => break,
        }
    }

    writeln!(output, "vidshelf is shutting down.")?;
    tracing::info!("Session ended");
    Ok(())
}

fn write_lines<W: Write>(output: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(output, "{line}")?;
    }
    Ok(())
}
