//! Message sinks for warnings and tips produced during a match

use std::sync::Mutex;

/// Receives human-oriented messages (missing snapshot warnings, file
/// creation notices, advisory tips)
pub trait MessageSink: Send + Sync {
    fn write(&self, message: &str);
}

/// Forwards messages to the `tracing` facade at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn write(&self, message: &str) {
        tracing::info!(component = module_path!(), message);
    }
}

/// Keeps every message in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages written so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.messages().iter().any(|m| m.contains(fragment))
    }

    pub fn clear(&self) {
        self.messages.lock().map(|mut m| m.clear()).ok();
    }
}

impl MessageSink for CollectingSink {
    fn write(&self, message: &str) {
        self.messages
            .lock()
            .map(|mut m| m.push(message.to_string()))
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_keeps_order() {
        let sink = CollectingSink::new();
        sink.write("first");
        sink.write("second");
        assert_eq!(sink.messages(), vec!["first", "second"]);
        assert!(sink.contains("sec"));
        sink.clear();
        assert!(sink.messages().is_empty());
    }
}
