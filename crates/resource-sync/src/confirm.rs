//! Explicit user confirmation for destructive actions.

/// Asks the user a yes/no question before a destructive request is sent.
///
/// Any `Fn(&str) -> bool` closure is a `Confirm`, which keeps tests short:
///
/// ```ignore
/// client.remove(id, &|_prompt: &str| true).await?;
/// ```
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
