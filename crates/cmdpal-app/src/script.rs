//! The line-oriented event script that drives a session.
//!
//! ```text
//! // comment
//! type >copy        replace the input text
//! up | down         move the highlight
//! select 2          highlight row 2
//! enter             run the highlighted command
//! pick 2            run row 2
//! answer 6*7        answer the open prompt
//! cancel            dismiss the open prompt
//! register {json}   deliver a page message
//! escape            close the palette
//! ```

use cmdpal_common::CmdpalError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Type(String),
    Up,
    Down,
    Select(usize),
    Enter,
    Pick(usize),
    Answer(String),
    Cancel,
    Register(String),
    Escape,
}

impl ScriptCommand {
    /// Parse one script line. Blank lines and `//` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CmdpalError> {
        let line = line.trim_start().trim_end_matches(|c: char| c == '\r' || c == '\n');
        if line.trim().is_empty() || line.starts_with("//") {
            return Ok(None);
        }

        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
        let command = match verb {
            "type" => Self::Type(rest.to_string()),
            "up" => Self::Up,
            "down" => Self::Down,
            "select" => Self::Select(parse_index(rest)?),
            "enter" => Self::Enter,
            "pick" => Self::Pick(parse_index(rest)?),
            "answer" => Self::Answer(rest.to_string()),
            "cancel" => Self::Cancel,
            "register" => Self::Register(rest.to_string()),
            "escape" => Self::Escape,
            other => {
                return Err(CmdpalError::Other(format!(
                    "unknown script command: {other}"
                )))
            }
        };
        Ok(Some(command))
    }
}

fn parse_index(raw: &str) -> Result<usize, CmdpalError> {
    raw.trim()
        .parse()
        .map_err(|_| CmdpalError::Other(format!("expected a row index, got {raw:?}")))
}
