use std::io::Write;
use std::sync::{Arc, Mutex};

use base64::{engine::general_purpose, Engine as _};

/// Destination for the copied product summary.
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> std::io::Result<()>;
}

/// Writes to the system clipboard through the terminal (OSC 52).
///
/// Terminals without OSC 52 support silently ignore the sequence, so the text
/// is echoed as well.
pub struct TerminalClipboard;

impl ClipboardSink for TerminalClipboard {
    fn write_text(&self, text: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "{}", osc52_sequence(text))?;
        writeln!(stdout, "Copiado:\n{}", text)?;
        stdout.flush()
    }
}

fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", general_purpose::STANDARD.encode(text))
}

/// Keeps every write in memory.
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    writes: Arc<Mutex<Vec<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .map(|writes| writes.clone())
            .unwrap_or_default()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&self, text: &str) -> std::io::Result<()> {
        self.writes
            .lock()
            .map_err(|_| std::io::Error::other("clipboard lock poisoned"))?
            .push(text.to_string());
        Ok(())
    }
}
