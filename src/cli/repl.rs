// Line-oriented chat loop

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use super::commands::{format_help, Command};
use crate::context::PERSONA_NAME;
use crate::session::ConversationSession;

pub struct ChatRepl {
    session: Arc<ConversationSession>,
}

impl ChatRepl {
    pub fn new(session: Arc<ConversationSession>) -> Self {
        Self { session }
    }

    /// Run against the terminal until `exit`/`quit` or end of input
    pub async fn run(&self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        self.run_with(stdin.lock(), &mut stdout).await
    }

    /// Run against arbitrary line input and output
    pub async fn run_with<R, W>(&self, mut input: R, out: &mut W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(out, "NumNum Chatbot")?;

        loop {
            write!(out, "You: ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            if let Some(command) = Command::parse(line) {
                match command {
                    Command::Quit => {
                        writeln!(out, "Exiting chat. Goodbye!")?;
                        break;
                    }
                    Command::Reset => {
                        self.session.clear().await;
                        writeln!(out, "Conversation cleared.")?;
                    }
                    Command::Help => writeln!(out, "{}", format_help())?,
                }
                continue;
            }

            match self.session.converse(line).await {
                Ok(reply) => writeln!(out, "{}: {}", PERSONA_NAME, reply)?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            }
        }

        Ok(())
    }
}
