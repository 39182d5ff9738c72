//! The delivery pipeline: select unsent question blocks, render them into
//! a digest, hand the digest to the transport, and log each block as sent.
//!
//! The ordering invariant lives here: the sent log is appended only after
//! the transport confirms delivery, so a failed send leaves the log
//! byte-identical and every block eligible for the next run.

pub mod render;
pub mod select;
pub mod send;

pub use render::render_digest;
pub use select::{select_unsent, Selection};
pub use send::{run_digest, DigestError, DigestReport};

/// Default ceiling on question blocks per digest.
pub const MAX_BLOCKS_PER_DIGEST: usize = 10;
