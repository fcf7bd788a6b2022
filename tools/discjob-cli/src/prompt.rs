//! Terminal confirmation for validation warnings.

use std::io::{BufRead, Write};

use discjob_job_engine::{ValidationWarning, WarningPrompt};

/// Asks on stdin whether to continue past each warning.
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl WarningPrompt for TerminalPrompt {
    fn confirm(&mut self, warning: &ValidationWarning) -> bool {
        println!("Warning: {warning}");
        if self.assume_yes {
            println!("  Continuing (--yes).");
            return true;
        }

        print!("  Continue? [y/N] ");
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }

    #[test]
    fn test_assume_yes_skips_stdin() {
        let mut prompt = TerminalPrompt::new(true);
        assert!(prompt.confirm(&ValidationWarning::SelectedTitlesHidden));
    }
}
