use meson_runner_core::Host;
use std::cell::RefCell;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::warn;

/// [`Host`] that talks to the user over stderr and reads answers from stdin.
pub struct TerminalHost {
    assume_yes: bool,
    input: RefCell<Box<dyn BufRead>>,
}

impl TerminalHost {
    pub fn new(assume_yes: bool) -> Self {
        Self::with_input(assume_yes, io::stdin().lock())
    }

    pub fn with_input(assume_yes: bool, input: impl BufRead + 'static) -> Self {
        Self {
            assume_yes,
            input: RefCell::new(Box::new(input)),
        }
    }

    /// One trimmed line of input, `None` on EOF or a read error.
    fn read_answer(&self) -> Option<String> {
        let mut line = String::new();
        match self.input.borrow_mut().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                warn!("Failed to read answer: {}", e);
                None
            }
        }
    }
}

impl Host for TerminalHost {
    fn status_message(&self, message: &str) {
        eprintln!("{message}");
    }

    fn message_dialog(&self, message: &str) {
        eprintln!("{message}");
    }

    fn ok_cancel_dialog(&self, message: &str, ok_title: &str) -> bool {
        eprintln!("{message}");
        if self.assume_yes {
            eprintln!("{ok_title}: yes (--yes)");
            return true;
        }
        eprint!("{ok_title}? [y/N] ");

        matches!(
            self.read_answer().map(|a| a.to_ascii_lowercase()).as_deref(),
            Some("y" | "yes")
        )
    }

    fn choose_build_dir(&self, candidates: &[PathBuf]) -> Option<PathBuf> {
        eprintln!("Several build directories found:");
        for (index, dir) in candidates.iter().enumerate() {
            eprintln!("  {}) {}", index + 1, dir.display());
        }
        eprint!("Build directory [1-{}]: ", candidates.len());

        let choice: usize = self.read_answer()?.parse().ok()?;
        choice
            .checked_sub(1)
            .and_then(|index| candidates.get(index))
            .cloned()
    }
}
