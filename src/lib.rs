//! extemp-digest - incremental practice-question generation and email digests.
//!
//! Two sibling pipelines share no in-memory state and communicate through
//! flat files: the generation pipeline drains a corpus of news articles
//! through an LLM in crash-safe batches, and the digest pipeline mails the
//! resulting question blocks exactly once each, tracked by an append-only
//! sent log.

pub mod batch;
pub mod config;
pub mod corpus;
pub mod digest;
pub mod fsutil;
pub mod generate;
pub mod mail;
pub mod questions;
pub mod retry;
pub mod sentlog;
pub mod types;

#[cfg(test)]
pub mod test_utils;
