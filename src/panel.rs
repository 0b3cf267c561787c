use tokio::sync::mpsc::UnboundedSender;

use crate::protocol::{ClickMessage, PointerMetadata, RenderAction, RenderState};
use crate::registry::ActionKey;
use crate::visibility;

// ---------------------------------------------------------------------------
// Click channel handle
// ---------------------------------------------------------------------------

/// Handle to the defining side's click channel, held by every panel.
///
/// Cheaply cloneable. Sends are fire-and-forget: there is no
/// acknowledgment, retry, or timeout — a lost message simply means no
/// click event fires.
#[derive(Debug, Clone)]
pub struct ClickHandle {
    tx: UnboundedSender<ClickMessage>,
}

impl ClickHandle {
    pub(crate) fn new(tx: UnboundedSender<ClickMessage>) -> Self {
        Self { tx }
    }

    /// Send a click message. Non-blocking — returns immediately.
    pub fn send(&self, msg: ClickMessage) {
        // Ignore errors: if the receiver is gone the resolver has already
        // shut down.
        let _ = self.tx.send(msg);
    }
}

// ---------------------------------------------------------------------------
// Icon surface seam
// ---------------------------------------------------------------------------

/// Capability the host grid supplies for materializing action icons in a
/// row cell.
///
/// The panel drives this in catalog order; the surface owns tooltips,
/// styling, and the actual drawing. [`ActionPanel::set_visibility`] always
/// clears the surface and re-attaches the visible entries, so the host can
/// treat each call as a full replace of the cell's contents.
pub trait IconSurface {
    /// Attach the widget for `entry` after any previously attached ones.
    fn attach(&mut self, entry: &RenderAction);

    /// Detach every widget from the cell.
    fn clear(&mut self);
}

// ---------------------------------------------------------------------------
// Per-row panel
// ---------------------------------------------------------------------------

/// One recycled icon widget, one per catalog entry.
#[derive(Debug, Clone)]
pub struct ActionWidget {
    entry: RenderAction,
    visible: bool,
}

impl ActionWidget {
    pub fn key(&self) -> &ActionKey {
        &self.entry.key
    }

    pub fn description(&self) -> Option<&str> {
        self.entry.description.as_deref()
    }

    pub fn style_tags(&self) -> &[String] {
        &self.entry.style_tags
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Per-row render unit on the displaying side.
///
/// Host grids recycle panels across row slots, so the lifecycle per render
/// cycle is always: [`bind`](Self::bind) (only when the render state
/// changed) → [`set_coordinates`](Self::set_coordinates) →
/// [`set_visibility`](Self::set_visibility). The widget set is built once
/// per bind and reused; visibility changes only flip the visible/hidden
/// partition.
///
/// The panel never resolves items — it has no access to the data
/// collection. A click is forwarded as a [`ClickMessage`] carrying the
/// cached row ordinal and the clicked widget's action key.
#[derive(Debug)]
pub struct ActionPanel {
    widgets: Vec<ActionWidget>,
    column_index: usize,
    row_index: usize,
    clicks: ClickHandle,
}

impl ActionPanel {
    pub fn new(clicks: ClickHandle) -> Self {
        Self {
            widgets: Vec::new(),
            column_index: 0,
            row_index: 0,
            clicks,
        }
    }

    /// Rebuild the widget set from a freshly pushed render state.
    ///
    /// Full-replace semantics: the previous widget set is discarded, and
    /// all new widgets start hidden until the next
    /// [`set_visibility`](Self::set_visibility).
    pub fn bind(&mut self, state: &RenderState) {
        self.widgets = state
            .actions
            .iter()
            .map(|entry| ActionWidget {
                entry: entry.clone(),
                visible: false,
            })
            .collect();
    }

    /// Cache the cell address this panel currently renders, for the next
    /// click.
    pub fn set_coordinates(&mut self, column_index: usize, row_index: usize) {
        self.column_index = column_index;
        self.row_index = row_index;
    }

    pub fn column_index(&self) -> usize {
        self.column_index
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    /// Apply a row's visibility code and replay the visible widgets onto
    /// the surface, in catalog order.
    ///
    /// Idempotent: applying the same code twice leaves the same partition
    /// and the same surface contents.
    pub fn set_visibility(&mut self, code: &str, surface: &mut dyn IconSurface) {
        let decoded = visibility::decode(code);
        surface.clear();
        for (position, widget) in self.widgets.iter_mut().enumerate() {
            widget.visible = decoded.visibility.is_visible(position);
            if widget.visible {
                surface.attach(&widget.entry);
            }
        }
    }

    /// All widgets in catalog order, hidden ones included.
    pub fn widgets(&self) -> &[ActionWidget] {
        &self.widgets
    }

    /// Currently visible widgets, in catalog order.
    pub fn visible_widgets(&self) -> impl Iterator<Item = &ActionWidget> {
        self.widgets.iter().filter(|w| w.visible)
    }

    /// Report a click on the widget at `position` (catalog position).
    ///
    /// Emits one [`ClickMessage`] with the cached row ordinal and returns
    /// `true`. Clicks on hidden or out-of-range positions are ignored and
    /// return `false`.
    pub fn click(&self, position: usize, pointer: PointerMetadata) -> bool {
        let Some(widget) = self.widgets.get(position) else {
            return false;
        };
        if !widget.visible {
            return false;
        }
        self.clicks.send(ClickMessage {
            row_ordinal: self.row_index,
            action_key: widget.entry.key.clone(),
            pointer,
        });
        true
    }
}
