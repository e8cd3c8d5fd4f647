use crate::error::{Result, SemvertagError};
use crate::ui::Prompter;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Prompter answering from a pre-recorded script, for tests
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    confirms: RefCell<VecDeque<bool>>,
    inputs: RefCell<VecDeque<String>>,
    selections: RefCell<VecDeque<usize>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm_with(self, answer: bool) -> Self {
        self.confirms.borrow_mut().push_back(answer);
        self
    }

    pub fn input_with(self, answer: impl Into<String>) -> Self {
        self.inputs.borrow_mut().push_back(answer.into());
        self
    }

    pub fn select_with(self, index: usize) -> Self {
        self.selections.borrow_mut().push_back(index);
        self
    }

    /// Every prompt shown so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn record(&self, prompt: &str) {
        self.asked.borrow_mut().push(prompt.to_string());
    }
}

fn unscripted(prompt: &str) -> SemvertagError {
    SemvertagError::prompt(format!("no scripted answer for '{}'", prompt))
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.record(prompt);
        self.confirms
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| unscripted(prompt))
    }

    fn input(&self, prompt: &str) -> Result<String> {
        self.record(prompt);
        self.inputs
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| unscripted(prompt))
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        self.record(prompt);
        let index = self
            .selections
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| unscripted(prompt))?;
        if index >= items.len() {
            return Err(SemvertagError::prompt(format!(
                "selection {} out of range for '{}'",
                index, prompt
            )));
        }
        Ok(index)
    }
}
