//! HTML → PDF export through an external rendering engine.
//!
//! The engine is a `wkhtmltopdf`-style executable configured by path. It
//! is invoked per request with `- -`: the HTML document goes to stdin,
//! the PDF bytes come back on stdout. The result is treated as an opaque
//! byte sequence; nothing inspects or validates the produced document.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Failure to produce a PDF. Unrecoverable for the request in progress.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("render engine {engine} is unavailable")]
    EngineUnavailable {
        engine: String,
        #[source]
        source: std::io::Error,
    },
    #[error("render engine exited with {status}: {stderr}")]
    EngineFailed {
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("render engine i/o failed")]
    Io(#[from] std::io::Error),
}

/// Handle to the configured rendering executable.
#[derive(Debug, Clone)]
pub struct PdfEngine {
    executable: PathBuf,
}

impl PdfEngine {
    pub fn new(executable: PathBuf) -> Self {
        Self { executable }
    }

    /// Convert an HTML document to PDF bytes.
    pub async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let mut child = Command::new(&self.executable)
            .arg("-")
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::EngineUnavailable {
                engine: self.executable.display().to_string(),
                source,
            })?;

        // A failing engine may exit before consuming its input; the write
        // error is then a broken pipe and the exit status is the real
        // signal, so the write result is only checked on success below.
        let mut write_result = Ok(());
        if let Some(mut stdin) = child.stdin.take() {
            write_result = stdin.write_all(html.as_bytes()).await;
            // Dropping stdin closes the pipe so the engine sees EOF.
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(RenderError::EngineFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        write_result?;

        tracing::debug!(bytes = output.stdout.len(), "rendered PDF");
        Ok(output.stdout)
    }
}
