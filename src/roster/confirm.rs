//! Confirmation dialogs.
//!
//! Administrator changes and password resets ask before they act. The asking
//! is done by whatever UI hosts the controller, through the [`Confirm`] trait:
//! the CLI prompts on the terminal, tests script their answers.

use crate::error::Result;
use std::collections::VecDeque;

/// Everything a dialog needs to ask one yes/no question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub body: String,
    /// Label of the accepting button.
    pub primary: String,
    /// Label of the declining button.
    pub secondary: String,
}

pub trait Confirm {
    /// Returns `true` when the user accepts the prompt.
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> Result<bool>;
}

impl<C: Confirm + ?Sized> Confirm for Box<C> {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> Result<bool> {
        (**self).confirm(prompt)
    }
}

/// Accepts every prompt. Backs the CLI's `--yes` flag.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _prompt: &ConfirmPrompt) -> Result<bool> {
        Ok(true)
    }
}

/// Answers prompts from a queue and keeps every prompt it was shown.
/// Declines once the queue runs dry.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConfirm {
    answers: VecDeque<bool>,
    pub asked: Vec<ConfirmPrompt>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> Result<bool> {
        self.asked.push(prompt.clone());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}
