//! Replay scripts: a JSON array of user events, tagged by `action`.
//!
//! ```json
//! [
//!   { "action": "toggle" },
//!   { "action": "selectMode", "mode": "edit" },
//!   { "action": "click", "target": "hero", "prompt": "b.png" },
//!   { "action": "key", "key": "Enter", "shift": false }
//! ]
//! ```

use element_editor::{
    simulate_click, ClickDisposition, DomError, EditSession, HeadlessHost, KeyInput, Mode, NodeId,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Step {
    Toggle,
    SelectMode {
        mode: Mode,
    },
    /// Click the element with this id; `prompt` answers an image URL prompt
    Click {
        target: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prompt: Option<String>,
    },
    /// Replace the text of the element being edited
    Type {
        text: String,
    },
    Key {
        key: String,
        #[serde(default)]
        shift: bool,
    },
    Blur,
    Undo,
    Close,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Toggle => write!(f, "toggle"),
            Step::SelectMode { mode } => write!(f, "select {:?}", mode),
            Step::Click { target, .. } => write!(f, "click #{}", target),
            Step::Type { text } => write!(f, "type {:?}", text),
            Step::Key { key, shift: true } => write!(f, "key Shift+{}", key),
            Step::Key { key, .. } => write!(f, "key {}", key),
            Step::Blur => write!(f, "blur"),
            Step::Undo => write!(f, "undo"),
            Step::Close => write!(f, "close"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Step {step}: no element with id '{target}'")]
    UnknownTarget { step: usize, target: String },

    #[error("Step {step}: '{action}' needs an element being edited")]
    NotEditing { step: usize, action: String },

    #[error("Step {step}: {source}")]
    Dom { step: usize, source: DomError },
}

pub fn parse_script(json: &str) -> Result<Vec<Step>, ScriptError> {
    Ok(serde_json::from_str(json)?)
}

/// What a single step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: Step,
    pub consumed: bool,
    pub messages: Vec<String>,
}

/// Drive `session` through `steps`, stopping at the first bad step
pub fn run_script(
    session: &mut EditSession<HeadlessHost>,
    steps: &[Step],
) -> Result<Vec<StepOutcome>, ScriptError> {
    let mut outcomes = Vec::with_capacity(steps.len());

    for (index, step) in steps.iter().enumerate() {
        let number = index + 1;
        let seen = session.host().notifications().history().len();
        debug!(number, %step, "Replaying");

        let consumed = apply(session, number, step)?;

        let messages = session.host().notifications().history()[seen..]
            .iter()
            .map(|n| n.message.clone())
            .collect();
        outcomes.push(StepOutcome {
            step: step.clone(),
            consumed,
            messages,
        });
    }

    Ok(outcomes)
}

fn apply(
    session: &mut EditSession<HeadlessHost>,
    number: usize,
    step: &Step,
) -> Result<bool, ScriptError> {
    match step {
        Step::Toggle => {
            session.toggle_activation();
        }
        Step::SelectMode { mode } => {
            session.select_mode(*mode);
        }
        Step::Click { target, prompt } => {
            let node = session
                .host()
                .document()
                .get_element_by_id(target)
                .ok_or_else(|| ScriptError::UnknownTarget {
                    step: number,
                    target: target.clone(),
                })?;
            // One answer per click; a missing `prompt` cancels
            session.host_mut().clear_prompt_answers();
            session.host_mut().answer_next_prompt(prompt.as_deref());
            let disposition = simulate_click(session, node);
            session.host_mut().clear_prompt_answers();
            return Ok(disposition == ClickDisposition::Consumed);
        }
        Step::Type { text } => {
            let node = editing(session, number, "type")?;
            session
                .host_mut()
                .type_text(node, text)
                .map_err(|source| ScriptError::Dom { step: number, source })?;
        }
        Step::Key { key, shift } => {
            let node = editing(session, number, "key")?;
            session.handle_keydown(&node, &KeyInput::new(key.as_str(), *shift));
        }
        Step::Blur => {
            if let Some(node) = session.editing().copied() {
                session.handle_blur(&node);
            }
        }
        Step::Undo => {
            session.undo();
        }
        Step::Close => session.close(),
    }
    Ok(false)
}

fn editing(
    session: &EditSession<HeadlessHost>,
    number: usize,
    action: &str,
) -> Result<NodeId, ScriptError> {
    session.editing().copied().ok_or_else(|| ScriptError::NotEditing {
        step: number,
        action: action.to_string(),
    })
}
