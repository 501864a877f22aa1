use std::borrow::Cow;

use reedline::{Emacs, Prompt, Reedline, Signal, Vi};

/// Prompt echoed before every input line. Caret diagnostics are indented by
/// its width so they line up under the typed text.
pub const PROMPT: &str = "> ";

/// Literal line that ends a session.
pub const EXIT: &str = "exit";

pub struct Editor {
    editor: Reedline,
    prompt: KalkPrompt,
}

impl Editor {
    #[must_use]
    pub fn new(vi: bool) -> Self {
        let editor = if vi {
            Reedline::create().with_edit_mode(Box::new(Vi::default()))
        } else {
            Reedline::create().with_edit_mode(Box::new(Emacs::default()))
        };

        Self {
            editor,
            prompt: KalkPrompt,
        }
    }
}

pub enum EditorRead {
    Read(String),
    Break,
}

impl Editor {
    pub fn read(&mut self) -> std::io::Result<EditorRead> {
        match self.editor.read_line(&self.prompt)? {
            Signal::Success(input) if input == EXIT => Ok(EditorRead::Break),
            Signal::Success(input) => Ok(EditorRead::Read(input)),
            Signal::CtrlC | Signal::CtrlD => Ok(EditorRead::Break),
        }
    }
}

pub struct KalkPrompt;

impl Prompt for KalkPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(PROMPT)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: reedline::PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(".. ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: reedline::PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            reedline::PromptHistorySearchStatus::Passing => "",
            reedline::PromptHistorySearchStatus::Failing => "failing ",
        };

        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}
