//! Handcast - hand-gesture command recognition.
//!
//! Per-frame hand landmarks go through a [`gesture::GestureRecognizer`] and
//! come out as [`dispatch::GestureCommand`]s for the spell, slide and flow
//! demos in [`demo`].

pub mod demo;
pub mod dispatch;
pub mod gesture;
pub mod sexp;
pub mod trace;
