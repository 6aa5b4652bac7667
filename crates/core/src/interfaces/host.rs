//! Host editor interface
//!
//! The capabilities an editor (or any other front end) lends the actions:
//! a transient status line, blocking dialogs and a picker for build
//! directories. Output goes through [`crate::sink::OutputSink`] instead.

use std::path::PathBuf;

/// Trait for the host's user-facing surfaces
pub trait Host {
    /// Short-lived status text. Already carries the product tag.
    fn status_message(&self, message: &str);

    /// Blocking informational dialog
    fn message_dialog(&self, message: &str);

    /// Blocking confirmation; `true` when the user picked `ok_title`
    fn ok_cancel_dialog(&self, message: &str, ok_title: &str) -> bool;

    /// Let the user pick one build directory; `None` when they made no choice
    fn choose_build_dir(&self, candidates: &[PathBuf]) -> Option<PathBuf>;
}
