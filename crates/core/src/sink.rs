//! Output sinks and the registry of named output panels

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// Append-only text surface provided by the host (an editor output panel,
/// a terminal, a buffer in tests).
pub trait OutputSink {
    fn append(&mut self, text: &str) -> Result<()>;

    fn show(&mut self);

    fn hide(&mut self);

    fn is_active(&self) -> bool;

    /// Drop all content. Only called on explicit request.
    fn clear(&mut self);

    /// Tag the sink with a highlighting profile. Hosts without highlighting ignore it.
    fn set_syntax(&mut self, _profile: &str) {}

    fn toggle(&mut self) {
        if self.is_active() {
            self.hide();
        } else {
            self.show();
        }
    }
}

/// In-memory sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    content: String,
    visible: bool,
    syntax: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn lines(&self) -> Vec<&str> {
        self.content.lines().collect()
    }

    pub fn syntax(&self) -> Option<&str> {
        self.syntax.as_deref()
    }
}

impl OutputSink for MemorySink {
    fn append(&mut self, text: &str) -> Result<()> {
        self.content.push_str(text);
        Ok(())
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn is_active(&self) -> bool {
        self.visible
    }

    fn clear(&mut self) {
        self.content.clear();
    }

    fn set_syntax(&mut self, profile: &str) {
        self.syntax = Some(profile.to_string());
    }
}

pub const DEFAULT_CHANNEL: &str = "Meson";

/// Highlighting profiles registered out of the box.
pub fn default_syntax_files() -> HashMap<String, String> {
    HashMap::from([(
        DEFAULT_CHANNEL.to_string(),
        "meson-output.sublime-syntax".to_string(),
    )])
}

/// Host identifier of a channel's panel.
pub fn panel_id(channel: &str) -> String {
    format!("output.{channel}")
}

type SinkFactory<S> = Box<dyn Fn(&str) -> S + Send + Sync>;

/// Long-lived sinks keyed by channel name.
///
/// A channel's sink is created on first use and then reused, so its content
/// accumulates across invocations until it is cleared.
pub struct OutputPanels<S> {
    panels: HashMap<String, S>,
    syntax_files: HashMap<String, String>,
    factory: SinkFactory<S>,
}

impl<S: OutputSink> OutputPanels<S> {
    pub fn new(factory: impl Fn(&str) -> S + Send + Sync + 'static) -> Self {
        Self {
            panels: HashMap::new(),
            syntax_files: default_syntax_files(),
            factory: Box::new(factory),
        }
    }

    pub fn with_syntax_files(mut self, syntax_files: HashMap<String, String>) -> Self {
        self.syntax_files = syntax_files;
        self
    }

    /// Existing sink for `name`, or a freshly created one. With `clear` the
    /// existing content is dropped.
    pub fn open(&mut self, name: &str, clear: bool) -> Result<&mut S> {
        if name.is_empty() {
            return Err(Error::ConfigError(
                "output panel name must not be empty".to_string(),
            ));
        }

        match self.panels.entry(name.to_string()) {
            Entry::Occupied(entry) => {
                let sink = entry.into_mut();
                if clear {
                    sink.clear();
                }
                Ok(sink)
            }
            Entry::Vacant(entry) => {
                let mut sink = (self.factory)(name);
                if let Some(profile) = self.syntax_files.get(name) {
                    sink.set_syntax(profile);
                }
                debug!("Created output panel {}", panel_id(name));
                Ok(entry.insert(sink))
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&S> {
        self.panels.get(name)
    }
}
