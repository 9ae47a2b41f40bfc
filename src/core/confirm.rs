//! Interactive confirmation
//!
//! Operations that accept risk on the user's behalf (losing unpushed
//! commits) go through this seam so tests can supply deterministic answers.

use std::io::{self, Write};

use crate::error::Result;

/// A yes/no question put to the user before a risky step
#[cfg_attr(test, mockall::automock)]
pub trait Confirmer {
    /// Returns true if the user accepts. Declining is not an error; the
    /// caller decides how to abort.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Confirmer that blocks on a `[y/N]` answer from stdin
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        print!("{} Continue? [y/N] ", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        Ok(input.trim().eq_ignore_ascii_case("y"))
    }
}
