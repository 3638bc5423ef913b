use simone_core::install::Console;
use std::io::{BufRead, Write};

/// Console on the process's stdin/stdout.
///
/// In JSON mode all human-facing text goes to stderr so stdout carries only
/// the final JSON document.
pub struct TerminalConsole {
    json: bool,
}

impl TerminalConsole {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn say(&self, line: &str) {
        if self.json {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

impl Console for TerminalConsole {
    fn confirm(&mut self, question: &str) -> simone_core::Result<bool> {
        let prompt = format!("{question} [y/N] ");
        if self.json {
            eprint!("{prompt}");
            let _ = std::io::stderr().flush();
        } else {
            print!("{prompt}");
            let _ = std::io::stdout().flush();
        }

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => Ok(is_yes(&answer)),
            Err(e) => {
                tracing::warn!(error = %e, "could not read answer, treating as no");
                Ok(false)
            }
        }
    }

    fn status(&mut self, message: &str) {
        self.say(&format!("  {message}"));
    }

    fn warn(&mut self, message: &str) {
        self.say(&format!("  warning: {message}"));
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_explicit_yes() {
        for yes in ["y", "Y\n", " yes ", "YES\r\n"] {
            assert!(is_yes(yes), "{yes:?}");
        }
        for no in ["", "\n", "n", "no", "yep", "sure"] {
            assert!(!is_yes(no), "{no:?}");
        }
    }
}
