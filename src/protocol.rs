//! Wire types exchanged between the defining side and the displaying side.
//!
//! Only two payloads ever cross the boundary: the full [`RenderState`]
//! (defining → displaying, sent whenever the catalog is bound) and one
//! [`ClickMessage`] per user click (displaying → defining). Full action
//! and item objects stay on the defining side.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::registry::ActionKey;

// ---------------------------------------------------------------------------
// Render state (defining side → displaying side)
// ---------------------------------------------------------------------------

/// One catalog entry as seen by the displaying side: enough to draw the
/// icon widget and to report clicks, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderAction {
    pub key: ActionKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub style_tags: Vec<String>,
}

/// The ordered action list transferred to the displaying side.
///
/// Order is catalog order. Replacing a panel's render state is always a
/// full replace — there is no incremental diff format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderState {
    pub actions: Vec<RenderAction>,
}

impl RenderState {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&RenderAction> {
        self.actions.get(position)
    }
}

// ---------------------------------------------------------------------------
// Pointer metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

/// Keyboard modifiers held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub alt: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ctrl: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub meta: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub shift: bool,
}

/// Where and how the user clicked. Opaque to the resolution path; carried
/// through to application listeners untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerMetadata {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub button: MouseButton,
    #[serde(default)]
    pub modifiers: Modifiers,
}

// ---------------------------------------------------------------------------
// Click message and resolved click event
// ---------------------------------------------------------------------------

/// One user click, as sent over the wire. Transient: produced by the
/// panel, consumed by the resolver, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickMessage {
    /// Position of the clicked row in the data provider's current
    /// ordering at render time.
    pub row_ordinal: usize,
    pub action_key: ActionKey,
    pub pointer: PointerMetadata,
}

/// A fully resolved click: the only object application listeners see.
#[derive(Debug, Clone)]
pub struct ClickEvent<T> {
    /// The data item of the clicked row.
    pub item: T,
    /// The action whose icon was clicked.
    pub action: Action,
    pub pointer: PointerMetadata,
}
