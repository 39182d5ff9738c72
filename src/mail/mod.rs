//! Outbound mail delivery.
//!
//! Delivery is a trait seam so the digest pipeline can be tested without a
//! mail system. The production implementation shells out to a local
//! `sendmail`-compatible binary; building the MIME text ourselves keeps the
//! wire format in one place and the subprocess call trivial.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

/// Default sendmail binary location.
pub const DEFAULT_SENDMAIL: &str = "/usr/sbin/sendmail";

/// MIME boundary for the multipart/alternative body.
const BOUNDARY: &str = "=_digest.alternative.0001";

/// A fully rendered digest ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestMessage {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Errors from a delivery attempt.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transport binary could not be spawned or written to.
    #[error("cannot run mail transport: {0}")]
    Io(#[from] std::io::Error),

    /// The transport ran but reported failure.
    #[error("mail transport failed: {command}\nstderr: {stderr}")]
    Failed { command: String, stderr: String },

    /// Delivery was attempted with no recipients configured.
    #[error("no recipients configured")]
    NoRecipients,
}

/// Delivery seam for the digest pipeline.
pub trait Transport {
    /// Delivers one message to all recipients. Whole-message semantics: on
    /// error, nothing may be assumed delivered to anyone.
    fn send(
        &self,
        from: &str,
        recipients: &[String],
        message: &DigestMessage,
    ) -> Result<(), TransportError>;
}

/// Transport that pipes a MIME message into a sendmail-compatible binary.
pub struct SendmailTransport {
    binary: PathBuf,
}

impl SendmailTransport {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        SendmailTransport {
            binary: binary.into(),
        }
    }
}

impl Default for SendmailTransport {
    fn default() -> Self {
        SendmailTransport::new(DEFAULT_SENDMAIL)
    }
}

impl Transport for SendmailTransport {
    fn send(
        &self,
        from: &str,
        recipients: &[String],
        message: &DigestMessage,
    ) -> Result<(), TransportError> {
        if recipients.is_empty() {
            return Err(TransportError::NoRecipients);
        }

        let mime = render_mime(from, recipients, message);
        debug!(bytes = mime.len(), "piping message to sendmail");

        // -i: don't treat a lone dot as end of input; -t: recipients from headers.
        let mut child = Command::new(&self.binary)
            .args(["-i", "-t"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(mime.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let command = format!("{} -i -t", self.binary.display());
            return Err(TransportError::Failed { command, stderr });
        }

        info!(recipients = recipients.len(), "digest delivered");
        Ok(())
    }
}

/// Builds the full RFC 2822 message: headers plus a multipart/alternative
/// body carrying the plain-text part first, then the HTML part.
pub fn render_mime(from: &str, recipients: &[String], message: &DigestMessage) -> String {
    let mut mime = String::new();
    mime.push_str(&format!("From: {from}\r\n"));
    mime.push_str(&format!("To: {}\r\n", recipients.join(", ")));
    mime.push_str(&format!("Subject: {}\r\n", message.subject));
    mime.push_str("MIME-Version: 1.0\r\n");
    mime.push_str(&format!(
        "Content-Type: multipart/alternative; boundary=\"{BOUNDARY}\"\r\n"
    ));
    mime.push_str("\r\n");

    for (content_type, body) in [
        ("text/plain", message.text_body.as_str()),
        ("text/html", message.html_body.as_str()),
    ] {
        mime.push_str(&format!("--{BOUNDARY}\r\n"));
        mime.push_str(&format!(
            "Content-Type: {content_type}; charset=\"utf-8\"\r\n"
        ));
        mime.push_str("\r\n");
        mime.push_str(body);
        mime.push_str("\r\n");
    }
    mime.push_str(&format!("--{BOUNDARY}--\r\n"));
    mime
}

/// Checks that the configured transport binary exists and is a file.
pub fn transport_available(binary: &Path) -> bool {
    binary.is_file()
}
