//! Line-oriented terminal I/O shared by every screen.
use std::fmt::Display;
use std::io::{self, BufRead, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use mech_core::{ScaleChooser, ScaleLevel};

/// Prompts and menu output over any reader/writer pair.
///
/// Reads return `None` once input is exhausted; screens treat that as quit.
pub struct Console<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, clear_screen: bool) -> Self {
        Self {
            input,
            output,
            clear_screen,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Clears the terminal when enabled.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    pub fn line(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    /// Writes `text` without a newline and reads one trimmed line.
    pub fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Waits for Enter. Returns `false` when input is exhausted.
    pub fn pause(&mut self, text: &str) -> io::Result<bool> {
        Ok(self.prompt(&format!("{text} "))?.is_some())
    }

    /// Prints `items` as a 1-based list and reads a selection.
    pub fn select(&mut self, items: &[String], prompt: &str) -> io::Result<Selection> {
        for (i, item) in items.iter().enumerate() {
            self.line(format!("{}. {}", i + 1, item))?;
        }
        Ok(match self.prompt(prompt)? {
            None => Selection::Closed,
            Some(answer) => match parse_index(&answer, items.len()) {
                Some(index) => Selection::Item(index),
                None => Selection::Other(answer),
            },
        })
    }

    fn prompt_scale(
        &mut self,
        part_name: &str,
        candidates: &[ScaleLevel],
    ) -> io::Result<Selection> {
        let labels: Vec<String> = candidates.iter().map(ScaleLevel::to_string).collect();
        self.line(format!("Select scale for {part_name}:"))?;
        self.select(&labels, "Enter number: ")
    }
}

/// Outcome of a numbered menu prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// 0-based index of the chosen entry.
    Item(usize),
    /// Anything that is not an entry number, trimmed.
    Other(String),
    /// Input is exhausted.
    Closed,
}

/// Parses a 1-based menu number into a 0-based index within `len`.
pub fn parse_index(input: &str, len: usize) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

impl<R: BufRead, W: Write> ScaleChooser for Console<R, W> {
    fn choose(&mut self, part_name: &str, candidates: &[ScaleLevel]) -> Option<usize> {
        match self.prompt_scale(part_name, candidates) {
            Ok(Selection::Item(index)) => Some(index),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Scale prompt failed: {}", e);
                None
            }
        }
    }
}
