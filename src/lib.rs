//! A chat bot that occasionally swaps a word in someone's message for a
//! configured substitute ("buttification"), keeping the original casing
//! and punctuation.
//!
//! The transformation engine is pure: [`pipeline::buttify`] takes message
//! text, a channel's settings and a random source and returns the rewritten
//! text or `None`. [`bot::Bot`] wraps it with the per-channel rules (rate,
//! opt-out, cooldown, commands) and [`transport`] carries the result out.

pub mod bot;
pub mod command;
pub mod config;
pub mod error;
pub mod filter;
pub mod gate;
pub mod pipeline;
pub mod protocol;
pub mod random;
pub mod selector;
pub mod state;
pub mod substitute;
pub mod tokenizer;
pub mod transport;
pub mod types;
