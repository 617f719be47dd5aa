//! Reactions of triggerable entities.
//!
//! Each interaction is split into a pure planning function over the
//! registry or player and a `pub(crate)` commit step. Planning never
//! mutates, so a command can be rejected at any point before its first
//! commit without leaving partial state behind.
pub mod boulder;
pub mod door;
pub mod exit;
pub mod portal;
pub mod spawner;
pub mod switch;

pub use boulder::BoulderPush;
pub use door::DoorPassage;
pub use portal::PortalTraversal;
pub use spawner::DestroyBlocker;
