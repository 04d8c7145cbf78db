//! CAPTCHA recognition for the SevenEleven search form.

use std::future::Future;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::TrackerError;

/// Turns a CAPTCHA image into the digit string the form expects.
pub trait CaptchaSolver: Send + Sync {
    fn solve(&self, image: &[u8]) -> impl Future<Output = Result<String, TrackerError>> + Send;
}

/// Runs the `tesseract` CLI in single-word mode with a digits-only whitelist.
///
/// The image is streamed over stdin and the recognised text read from stdout,
/// so nothing touches the filesystem.
#[derive(Debug, Clone)]
pub struct TesseractSolver {
    bin: String,
}

impl TesseractSolver {
    #[must_use]
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

impl CaptchaSolver for TesseractSolver {
    async fn solve(&self, image: &[u8]) -> Result<String, TrackerError> {
        let mut child = Command::new(&self.bin)
            .args([
                "stdin",
                "stdout",
                "-c",
                "tessedit_char_whitelist=0123456789",
                "--psm",
                "8",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // A solver that exits early breaks the pipe; its exit status is
        // reported first.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(image).await,
            None => Ok(()),
        };

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(TrackerError::Ocr(format!(
                "{} exited with {}: {}",
                self.bin,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        if let Err(e) = written {
            return Err(TrackerError::Ocr(format!(
                "{} closed stdin before reading the image: {e}",
                self.bin
            )));
        }

        let code = digits_only(&String::from_utf8_lossy(&output.stdout));
        if code.is_empty() {
            return Err(TrackerError::Ocr("no digits recognised".to_owned()));
        }
        tracing::debug!(code = %code, "CAPTCHA recognised");
        Ok(code)
    }
}

/// Keeps ASCII digits only; OCR output carries stray whitespace and form feeds.
pub(crate) fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::is_captcha_retryable;

    #[test]
    fn digits_only_strips_ocr_noise() {
        assert_eq!(digits_only(" 4 8 1 9\n\x0c"), "4819");
    }

    #[test]
    fn digits_only_of_garbage_is_empty() {
        assert_eq!(digits_only("O l\n"), "");
    }

    #[tokio::test]
    async fn missing_binary_reports_io_error() {
        let solver = TesseractSolver::new("/nonexistent/tesseract-binary");
        let result = solver.solve(b"\x89PNG").await;
        assert!(
            matches!(result, Err(TrackerError::Io(_))),
            "expected Io error, got: {result:?}"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn solver_exiting_before_reading_is_ocr_error() {
        let solver = TesseractSolver::new("false");
        let image = vec![0u8; 1 << 20];
        let err = solver.solve(&image).await.unwrap_err();
        assert!(matches!(err, TrackerError::Ocr(_)), "got: {err:?}");
        assert!(is_captcha_retryable(&err));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn solver_ignoring_stdin_is_ocr_error() {
        // `true` exits 0 without reading; the pipe write fails or nothing is
        // printed, and both surface as OCR failures.
        let solver = TesseractSolver::new("true");
        let image = vec![0u8; 1 << 20];
        let err = solver.solve(&image).await.unwrap_err();
        assert!(matches!(err, TrackerError::Ocr(_)), "got: {err:?}");
    }
}
