use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{Input, Password};

/// Blocking operator input.
///
/// Both calls block until the operator answers; there is no timeout.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Read a plain-text answer; the input is echoed.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Read an answer without echoing it to the terminal.
    fn read_secret(&mut self, prompt: &str) -> io::Result<String>;
}

/// Prompts on the controlling terminal.
///
/// When stdin is not a terminal (answers piped in by a script), the prompt
/// goes to stderr and the answer is the next line of stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        if !io::stdin().is_terminal() {
            return read_piped(prompt);
        }
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| io::Error::other(e.to_string()))
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        if !io::stdin().is_terminal() {
            return read_piped(prompt);
        }
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

fn read_piped(prompt: &str) -> io::Result<String> {
    read_answer(prompt, &mut io::stdin().lock(), &mut io::stderr())
}

/// Write `prompt` to `output` and read one line from `input`, without the line ending.
///
/// End of input before any answer is an error: the prompt would otherwise
/// resolve to an empty value nobody typed.
fn read_answer<R, W>(prompt: &str, input: &mut R, output: &mut W) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt}: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before an answer was given",
        ));
    }
    let answer = line.trim_end_matches(['\r', '\n']).to_string();
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn piped_answers_are_read_one_line_at_a_time() {
        let mut input = Cursor::new("alice\r\nhunter2\n");
        let mut output = Vec::new();

        let first = read_answer("Enter Username", &mut input, &mut output).unwrap();
        let second = read_answer("Enter Password", &mut input, &mut output).unwrap();

        assert_eq!(first, "alice");
        assert_eq!(second, "hunter2");
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Enter Username: Enter Password: "
        );
    }

    #[test]
    fn last_line_without_newline_is_accepted() {
        let mut input = Cursor::new("nextseq");
        let answer = read_answer("Enter Parser to use", &mut input, &mut io::sink()).unwrap();
        assert_eq!(answer, "nextseq");
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut input = Cursor::new("");
        let err = read_answer("Enter Username", &mut input, &mut io::sink()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
