use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Icon handle
// ---------------------------------------------------------------------------

/// Opaque handle to a visual asset.
///
/// The core never interprets the asset: the host's icon renderer resolves
/// the handle (via [`crate::renderer::ActionRenderer::icon_resource`]) to
/// whatever glyph, image, or font icon it deals in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(String);

impl IconRef {
    pub fn new(resource: impl Into<String>) -> Self {
        Self(resource.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Action definition and catalog
// ---------------------------------------------------------------------------

/// Identity of one action within one catalog.
///
/// Assigned by [`ActionCatalog::new`]; catalogs are immutable after
/// construction, so the id doubles as the action's catalog position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(usize);

impl ActionId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Definition of a clickable action, before it is placed in a catalog.
#[derive(Debug, Clone)]
pub struct ActionDef {
    icon: IconRef,
    description: Option<String>,
    style_tags: Vec<String>,
}

impl ActionDef {
    /// An action with an icon and no tooltip description.
    pub fn new(icon: IconRef) -> Self {
        Self {
            icon,
            description: None,
            style_tags: Vec::new(),
        }
    }

    /// An action with an icon and a tooltip description.
    pub fn described(icon: IconRef, description: impl Into<String>) -> Self {
        Self {
            icon,
            description: Some(description.into()),
            style_tags: Vec::new(),
        }
    }

    /// Append a style tag. Tag order is preserved through the render state.
    pub fn with_style(mut self, tag: impl Into<String>) -> Self {
        self.style_tags.push(tag.into());
        self
    }
}

/// A clickable action as placed in a catalog, carrying its identity.
///
/// Immutable once the catalog is built; this is the value handed back to
/// application listeners inside a [`crate::protocol::ClickEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    id: ActionId,
    icon: IconRef,
    description: Option<String>,
    style_tags: Vec<String>,
}

impl Action {
    pub fn id(&self) -> ActionId {
        self.id
    }

    pub fn icon(&self) -> &IconRef {
        &self.icon
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn style_tags(&self) -> &[String] {
        &self.style_tags
    }
}

/// Ordered, immutable list of all actions a renderer can display.
///
/// The catalog order is the display order: per-row visibility codes select
/// positions in this list, never reorder them. There is no way to add or
/// remove actions after construction — renderers that need a different set
/// of actions are built with a new catalog.
#[derive(Debug, Clone)]
pub struct ActionCatalog {
    actions: Vec<Action>,
}

impl ActionCatalog {
    pub fn new(defs: Vec<ActionDef>) -> Self {
        let actions = defs
            .into_iter()
            .enumerate()
            .map(|(index, def)| Action {
                id: ActionId(index),
                icon: def.icon,
                description: def.description,
                style_tags: def.style_tags,
            })
            .collect();
        Self { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Action at a catalog position.
    pub fn get(&self, position: usize) -> Option<&Action> {
        self.actions.get(position)
    }

    /// Actions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }
}
