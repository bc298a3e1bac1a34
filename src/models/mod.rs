//! Durable record types

pub mod account;
pub mod guestbook;
pub mod tally;
pub mod visit;
