//! Confirmation of destructive account operations.

use dialoguer::Confirm;
use helpdesk_core::AppResult;

/// Answers "Are you sure?" before an account is deleted.
pub trait ConfirmDeletion {
    fn confirm(&self, username: &str) -> AppResult<bool>;
}

/// Asks on the terminal. Defaults to "No".
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptConfirmation;

impl ConfirmDeletion for PromptConfirmation {
    fn confirm(&self, username: &str) -> AppResult<bool> {
        let answer = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to delete the account {}?",
                username
            ))
            .default(false)
            .interact()?;
        Ok(answer)
    }
}

/// Always gives the same answer, for non-interactive callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedConfirmation(pub bool);

impl ConfirmDeletion for FixedConfirmation {
    fn confirm(&self, _username: &str) -> AppResult<bool> {
        Ok(self.0)
    }
}

impl<F> ConfirmDeletion for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, username: &str) -> AppResult<bool> {
        Ok(self(username))
    }
}
