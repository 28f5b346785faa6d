// Interactive command-line front end

pub mod commands;
pub mod repl;

pub use commands::Command;
pub use repl::ChatRepl;
