//! Pure selection of which blocks go into the next digest.

use tracing::debug;

use crate::sentlog::SentLog;
use crate::types::QuestionBlock;

/// Outcome of filtering parsed blocks against the sent log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Blocks chosen for this digest, in file order.
    pub to_send: Vec<QuestionBlock>,
    /// Blocks skipped because their link is already logged.
    pub already_sent: usize,
    /// New blocks beyond the ceiling, left for the next run.
    pub deferred: usize,
}

/// Filters out already-sent blocks, then takes at most `max_blocks` of the
/// remainder in file order. Selection never mutates anything; the sent log
/// is only consulted.
pub fn select_unsent(blocks: Vec<QuestionBlock>, log: &SentLog, max_blocks: usize) -> Selection {
    let total = blocks.len();
    let unsent: Vec<QuestionBlock> = blocks
        .into_iter()
        .filter(|block| {
            let sent = log.contains(&block.link);
            if sent {
                debug!(link = %block.link, "already sent, skipping");
            }
            !sent
        })
        .collect();

    let already_sent = total - unsent.len();
    let deferred = unsent.len().saturating_sub(max_blocks);
    let mut to_send = unsent;
    to_send.truncate(max_blocks);

    Selection {
        to_send,
        already_sent,
        deferred,
    }
}
