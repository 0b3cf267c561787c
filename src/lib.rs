// Pedantic: suppress noise for internal crate code.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

//! Per-row action icon rendering core for tabular UIs.
//!
//! Three independently-changing things have to stay in sync: a
//! server-declared, order-stable action catalog; a compact per-row code
//! saying which actions a row shows; and client clicks that must resolve
//! back to a concrete `(item, action)` pair without full objects ever
//! crossing the wire. The pieces:
//!
//! - [`action`]: the frozen [`action::ActionCatalog`] of icon actions.
//! - [`registry`]: wire keys minted per action, with total reverse lookup.
//! - [`visibility`]: the per-row visibility string codec (`-1` wildcard).
//! - [`protocol`]: the two wire payloads, [`protocol::RenderState`] and
//!   [`protocol::ClickMessage`], plus the resolved
//!   [`protocol::ClickEvent`].
//! - [`panel`]: the displaying side's recycled per-row render unit.
//! - [`resolver`] / [`renderer`]: the defining side — key and ordinal
//!   resolution, listener fan-out, and the click dispatch loop.
//! - [`provider`]: the data-provider seam rows are addressed through.

pub mod action;
pub mod panel;
pub mod protocol;
pub mod provider;
pub mod registry;
pub mod renderer;
pub mod resolver;
pub mod visibility;
