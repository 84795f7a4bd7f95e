//! Line-oriented terminal I/O
//!
//! Wraps an input and an output stream so the interactive session can be
//! driven by stdin/stdout in the binary and by in-memory buffers in tests.

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::{BillcoverError, BillcoverResult};

/// Prompting console over arbitrary streams
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line
    pub fn say(&mut self, text: impl Display) -> BillcoverResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line
    ///
    /// End of input is an error so that prompt loops cannot spin forever.
    pub fn prompt(&mut self, prompt: &str) -> BillcoverResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(BillcoverError::Io("Unexpected end of input".into()));
        }

        Ok(line.trim().to_string())
    }

    /// Ask until the answer is yes/y or no/n (case-insensitive)
    pub fn confirm(&mut self, prompt: &str) -> BillcoverResult<bool> {
        loop {
            match self.prompt(prompt)?.to_lowercase().as_str() {
                "yes" | "y" => return Ok(true),
                "no" | "n" => return Ok(false),
                _ => self.say("Please enter 'yes' or 'no'")?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_prompt_trims_answer() {
        let mut c = console("  hello  \n");
        assert_eq!(c.prompt("Name: ").unwrap(), "hello");
        assert_eq!(String::from_utf8(c.into_output()).unwrap(), "Name: ");
    }

    #[test]
    fn test_confirm_reprompts_until_valid() {
        let mut c = console("maybe\nY\n");
        assert!(c.confirm("Continue? ").unwrap());
        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Please enter 'yes' or 'no'"));
    }

    #[test]
    fn test_confirm_no() {
        let mut c = console("no\n");
        assert!(!c.confirm("Continue? ").unwrap());
    }

    #[test]
    fn test_end_of_input_is_error() {
        let mut c = console("");
        assert!(matches!(c.prompt("> "), Err(BillcoverError::Io(_))));
    }
}
