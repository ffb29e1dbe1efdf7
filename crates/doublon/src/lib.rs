//! doublon: duplicate detection for a brand controversy directory.
//!
//! Before a contributor files a new controversy report, doublon checks whether it plausibly
//! describes something already recorded: an existing brand, a published controversy or a
//! report still awaiting moderation. Matches are advisory; nothing is blocked or merged.
//!
//! The library half of this crate hosts the HTTP service so it can be embedded and tested;
//! the `doublon` binary adds the command-line interface.

#![warn(missing_docs)]

pub mod server;
pub mod telemetry;
