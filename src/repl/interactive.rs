//! Interactive rustyline-backed input.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::{Repl, ReplError};

pub struct InteractiveRepl {
    editor: DefaultEditor,
}

impl InteractiveRepl {
    pub fn new() -> Result<Self, ReplError> {
        let editor = DefaultEditor::new().map_err(|e| ReplError::Io(e.to_string()))?;
        Ok(Self { editor })
    }
}

fn map_readline_error(err: ReadlineError) -> ReplError {
    match err {
        ReadlineError::Eof => ReplError::Eof,
        ReadlineError::Interrupted => ReplError::Cancelled,
        other => ReplError::Io(other.to_string()),
    }
}

impl Repl for InteractiveRepl {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReplError> {
        let line = self.editor.readline(prompt).map_err(map_readline_error)?;
        if !line.trim().is_empty() {
            let _ = self.editor.add_history_entry(line.as_str());
        }
        Ok(line)
    }

    fn select_one(&mut self, prompt: &str, options: &[String]) -> Result<usize, ReplError> {
        println!("{prompt}");
        for (i, option) in options.iter().enumerate() {
            println!("  {}) {}", i + 1, option);
        }

        // Accept a 1-based number or an exact name; reprompt on anything else.
        loop {
            let line = self.editor.readline("> ").map_err(map_readline_error)?;
            let answer = line.trim();

            if let Ok(n) = answer.parse::<usize>() {
                if n >= 1 && n <= options.len() {
                    return Ok(n - 1);
                }
            }
            if let Some(i) = options.iter().position(|o| o == answer) {
                return Ok(i);
            }

            println!("pick a number between 1 and {}", options.len());
        }
    }
}
