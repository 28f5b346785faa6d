// REPL command handling

use crate::context::PERSONA_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Reset,
}

impl Command {
    /// Recognise a command line. `exit` and `quit` need no slash and ignore case.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            return Some(Command::Quit);
        }
        match input {
            "/help" => Some(Command::Help),
            "/quit" | "/exit" => Some(Command::Quit),
            "/reset" => Some(Command::Reset),
            _ => None,
        }
    }
}

pub fn format_help() -> String {
    format!(
        r#"Chat with {name} about places to eat.
  exit, quit - Leave the chat
  /reset     - Forget the conversation so far
  /help      - Show this help message"#,
        name = PERSONA_NAME
    )
}
