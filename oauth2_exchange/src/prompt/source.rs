use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

use super::errors::PromptError;

/// A source of operator-supplied lines
#[async_trait]
pub trait LineSource: Send {
    /// Wait for the next line, without its line ending.
    ///
    /// Returns `Ok(None)` once the input has ended. There is no timeout.
    async fn next_line(&mut self) -> Result<Option<String>, PromptError>;

    /// Release the underlying input. Must be safe to call more than once.
    fn close(&mut self);
}

/// Lines read from the process's standard input.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// mangled paste still reaches code extraction and stops there.
pub struct StdinLines {
    reader: Option<BufReader<Stdin>>,
}

impl StdinLines {
    pub fn new() -> Self {
        Self {
            reader: Some(BufReader::new(tokio::io::stdin())),
        }
    }
}

impl Default for StdinLines {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineSource for StdinLines {
    async fn next_line(&mut self) -> Result<Option<String>, PromptError> {
        let reader = self.reader.as_mut().ok_or(PromptError::Closed)?;
        read_lossy_line(reader).await
    }

    fn close(&mut self) {
        if self.reader.take().is_some() {
            tracing::debug!("Closed standard input");
        }
    }
}

async fn read_lossy_line<R>(reader: &mut R) -> Result<Option<String>, PromptError>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut raw = Vec::new();
    let read = reader
        .read_until(b'\n', &mut raw)
        .await
        .map_err(|e| PromptError::Read(e.to_string()))?;
    if read == 0 {
        return Ok(None);
    }

    let line = raw.strip_suffix(b"\n").unwrap_or(&raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    Ok(Some(String::from_utf8_lossy(line).into_owned()))
}

/// A fixed list of lines, for non-interactive runs and tests.
///
/// [`ScriptedLines::closed_flag`] hands out a shared flag that flips once the
/// source is closed, so callers can observe cleanup after giving the source away.
#[derive(Debug, Default)]
pub struct ScriptedLines {
    lines: VecDeque<String>,
    closed: Arc<AtomicBool>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }
}

#[async_trait]
impl LineSource for ScriptedLines {
    async fn next_line(&mut self) -> Result<Option<String>, PromptError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(PromptError::Closed);
        }
        Ok(self.lines.pop_front())
    }

    fn close(&mut self) {
        self.lines.clear();
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Owns a [`LineSource`] and closes it when dropped
pub struct ClosingGuard<S: LineSource> {
    source: S,
}

impl<S: LineSource> ClosingGuard<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: LineSource> Deref for ClosingGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.source
    }
}

impl<S: LineSource> DerefMut for ClosingGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: LineSource> Drop for ClosingGuard<S> {
    fn drop(&mut self) {
        self.source.close();
    }
}
