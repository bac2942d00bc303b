use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::domain::ClipboardSink;

// Desktop clipboard through arboard. arboard is blocking, so the copy runs on the
// blocking pool.
#[derive(Clone, Copy, Default)]
pub struct SystemClipboard;

#[async_trait]
impl ClipboardSink for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new().map_err(|err| err.to_string())?;
            clipboard.set_text(text).map_err(|err| err.to_string())
        })
        .await
        .map_err(|err| err.to_string())?
    }
}

// Writes the document to a file instead of a clipboard.
#[derive(Clone)]
pub struct FileSink {
    pub path: PathBuf,
}

#[async_trait]
impl ClipboardSink for FileSink {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|err| format!("{}: {err}", self.path.display()))
    }
}

// Writes the document to standard output, byte for byte the same as `FileSink`.
#[derive(Clone, Copy, Default)]
pub struct StdoutSink;

#[async_trait]
impl ClipboardSink for StdoutSink {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        write_document(&mut tokio::io::stdout(), text).await
    }
}

async fn write_document<W>(writer: &mut W, text: &str) -> Result<(), String>
where
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(text.as_bytes())
        .await
        .map_err(|err| err.to_string())?;
    writer.flush().await.map_err(|err| err.to_string())
}
