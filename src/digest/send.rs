//! The digest run: parse, select, render, deliver, log.

use std::path::Path;

use chrono::Local;
use thiserror::Error;
use tracing::{info, warn};

use crate::mail::{Transport, TransportError};
use crate::questions::read_question_blocks;
use crate::sentlog::SentLog;

use super::render::render_digest;
use super::select::select_unsent;

/// Outcome counts for one digest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigestReport {
    /// Valid blocks found in the questions file.
    pub total_blocks: usize,
    /// Blocks skipped because they were already logged as sent.
    pub already_sent: usize,
    /// Blocks delivered and logged this run.
    pub sent: usize,
    /// New blocks deferred to the next run by the per-digest ceiling.
    pub deferred: usize,
}

#[derive(Debug, Error)]
pub enum DigestError {
    /// The transport refused or failed the whole message. Nothing was
    /// logged as sent.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Runs one delivery cycle.
///
/// An empty questions file or a fully-sent backlog is a successful no-op.
/// The sent log is appended per block only after the transport confirms
/// the whole digest, so a transport failure leaves the log untouched. A
/// log append failure after delivery is warned about and skipped: the
/// block was delivered, and re-sending it once later is the cheaper side
/// of that gap.
pub fn run_digest(
    questions_path: &Path,
    sent_log: &mut SentLog,
    transport: &dyn Transport,
    from: &str,
    recipients: &[String],
    max_blocks: usize,
) -> Result<DigestReport, DigestError> {
    let blocks = read_question_blocks(questions_path);
    let total_blocks = blocks.len();
    if blocks.is_empty() {
        info!("no question blocks available, nothing to send");
        return Ok(DigestReport::default());
    }

    let selection = select_unsent(blocks, sent_log, max_blocks);
    if selection.to_send.is_empty() {
        info!(
            total = total_blocks,
            already_sent = selection.already_sent,
            "every block already sent"
        );
        return Ok(DigestReport {
            total_blocks,
            already_sent: selection.already_sent,
            ..DigestReport::default()
        });
    }

    info!(
        total = total_blocks,
        new = selection.to_send.len(),
        already_sent = selection.already_sent,
        deferred = selection.deferred,
        "sending digest"
    );

    let message = render_digest(&selection.to_send, Local::now());
    transport.send(from, recipients, &message)?;

    let mut logged = 0;
    for block in &selection.to_send {
        match sent_log.append(&block.link) {
            Ok(()) => logged += 1,
            Err(error) => {
                warn!(link = %block.link, %error, "delivered but not logged, may re-send once");
            }
        }
    }
    info!(sent = selection.to_send.len(), logged, "digest run complete");

    Ok(DigestReport {
        total_blocks,
        already_sent: selection.already_sent,
        sent: selection.to_send.len(),
        deferred: selection.deferred,
    })
}
