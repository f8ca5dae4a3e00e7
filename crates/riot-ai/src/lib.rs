//! Actor AI for RIOT RESPONSE.
//!
//! Officer behavior dispatch by division, rioter target seeking,
//! and the targeting helpers both share.

pub mod officer;
pub mod rioter;
pub mod targeting;

pub use riot_core as core;
