// Static instruction preamble
//
// The dataset file is read once at startup and folded into a fixed
// instruction block that accompanies every user message. Nothing here
// changes after construction.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::errors::{RelayError, Result};

/// Name the assistant introduces itself with.
pub const PERSONA_NAME: &str = "Num";

/// Where the user is assumed to be when answering "near me" questions.
pub const ASSUMED_LOCATION: &str = "Queen's University";

/// Follow-up actions offered once the user picks a restaurant.
pub const ACTION_MENU_OPTIONS: [&str; 3] = [
    "Book reservation",
    "Show routes to get there",
    "Show recommended dishes on the menu",
];

/// Dataset text injected into every prompt.
#[derive(Debug, Clone)]
pub struct ContextDocument {
    path: PathBuf,
    content: Arc<str>,
}

impl ContextDocument {
    /// Read the whole dataset file.
    ///
    /// A missing or unreadable file is a `ContextLoad` error; callers treat it
    /// as fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RelayError::ContextLoad {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            "Loaded context document {} ({} bytes)",
            path.display(),
            content.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            content: content.into(),
        })
    }

    /// Wrap in-memory text (tests, embedded datasets).
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            content: content.into().into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Instruction block sent ahead of every user message.
///
/// `context` carries the persona, dataset, location, and greeting rules;
/// `action_menu` is the reservation/route/dish offer. They are kept apart so
/// the menu can be inspected on its own, but always travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble {
    context: String,
    action_menu: String,
}

impl Preamble {
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn action_menu(&self) -> &str {
        &self.action_menu
    }

    /// Full instruction text (context followed by the action menu).
    pub fn text(&self) -> String {
        format!("{} {}", self.context, self.action_menu)
    }

    /// The single user-role message sent for one turn.
    pub fn compose(&self, user_input: &str) -> String {
        format!("{} {} {}", self.context, self.action_menu, user_input)
    }
}

/// Assemble the preamble for a loaded dataset. Pure: same document in,
/// same preamble out.
pub fn build_preamble(document: &ContextDocument) -> Preamble {
    let context = format!(
        "Hey! You are an AI assistant named {name}. \
         Here is the content from {name}_Data:\n{data}.\n\
         Assume the user's location is {location}. \
         You can access chat history from the history list. \
         If the user says hi or introduces themself, just introduce yourself \
         without using the information from the data set. \
         If the user asks a question related to the dataset, do not say hi again. \
         Just answer the question.",
        name = PERSONA_NAME,
        data = document.content(),
        location = ASSUMED_LOCATION,
    );

    Preamble {
        context,
        action_menu: render_action_menu(),
    }
}

fn render_action_menu() -> String {
    let mut menu = format!(
        "If the user decides that they want to go to one of the restaurants, \
         provide {} options for them to choose:",
        ACTION_MENU_OPTIONS.len()
    );
    for (i, option) in ACTION_MENU_OPTIONS.iter().enumerate() {
        let sep = if i == 0 { " " } else { ", " };
        let _ = write!(menu, "{}{}. {}", sep, i + 1, option);
    }
    menu
}
