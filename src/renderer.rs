use indexmap::IndexMap;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::action::{ActionCatalog, IconRef};
use crate::panel::ClickHandle;
use crate::protocol::{ClickEvent, ClickMessage, RenderAction, RenderState};
use crate::provider::DataProvider;
use crate::registry::{ActionKey, ActionKeyRegistry};
use crate::resolver::{ClickResolver, ListenerId, ResolveError};

/// Defining-side owner of the action rendering core.
///
/// Construction mints one wire key per catalog action, records the icon
/// resource behind each key, and builds the [`RenderState`] pushed to the
/// displaying side. The catalog is consumed and frozen: there is no way
/// to add actions afterwards, so post-construction catalog changes are
/// unrepresentable rather than silently ignored.
pub struct ActionRenderer<T> {
    catalog: ActionCatalog,
    registry: ActionKeyRegistry,
    resolver: ClickResolver<T>,
    resources: IndexMap<ActionKey, IconRef>,
    state: RenderState,
}

impl<T: Clone> ActionRenderer<T> {
    pub fn new(catalog: ActionCatalog) -> Self {
        let mut registry = ActionKeyRegistry::new();
        let mut resources = IndexMap::new();
        let mut actions = Vec::with_capacity(catalog.len());

        for action in catalog.iter() {
            let key = registry.mint(action);
            resources.insert(key.clone(), action.icon().clone());
            actions.push(RenderAction {
                key,
                description: action.description().map(str::to_owned),
                style_tags: action.style_tags().to_vec(),
            });
        }

        Self {
            catalog,
            registry,
            resolver: ClickResolver::new(),
            resources,
            state: RenderState { actions },
        }
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    /// The transfer payload for the displaying side, in catalog order.
    ///
    /// Pushing it replaces the displaying side's previous state entirely.
    pub fn render_state(&self) -> &RenderState {
        &self.state
    }

    /// Icon resource behind a minted key, for the host's icon renderer.
    pub fn icon_resource(&self, key: &str) -> Option<&IconRef> {
        self.resources.get(key)
    }

    pub fn add_click_listener(
        &mut self,
        listener: impl Fn(&ClickEvent<T>) + Send + 'static,
    ) -> ListenerId {
        self.resolver.add_click_listener(listener)
    }

    pub fn remove_click_listener(&mut self, id: ListenerId) -> bool {
        self.resolver.remove_click_listener(id)
    }

    /// Resolve one click message against a snapshot taken from `provider`
    /// right now, and deliver the event to listeners.
    ///
    /// The snapshot is fresh on purpose: rows are addressed by position,
    /// so a collection mutated between render and click either resolves to
    /// whatever item now occupies the ordinal or fails with
    /// [`ResolveError::RowOutOfRange`].
    pub fn handle_click(
        &self,
        msg: &ClickMessage,
        provider: &dyn DataProvider<T>,
    ) -> Result<(), ResolveError> {
        let snapshot = provider.items();
        self.resolver.handle(&self.registry, msg, &snapshot)
    }
}

impl<T: Clone + Send + 'static> ActionRenderer<T> {
    /// Start the click dispatch loop and return the handle panels send
    /// clicks through.
    ///
    /// The loop processes messages sequentially in arrival order. A failed
    /// resolution is logged and dropped; the loop stays ready for the next
    /// message. When the last [`ClickHandle`] is dropped the channel
    /// closes and the loop shuts down.
    pub fn start(self, provider: impl DataProvider<T> + Send + 'static) -> ClickHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<ClickMessage>();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("click dispatch tokio runtime");
            rt.block_on(self.run_loop(rx, provider));
        });
        ClickHandle::new(tx)
    }

    async fn run_loop(
        self,
        mut rx: UnboundedReceiver<ClickMessage>,
        provider: impl DataProvider<T>,
    ) {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = self.handle_click(&msg, &provider) {
                tracing::warn!("dropping click for row {}: {e}", msg.row_ordinal);
            }
        }
        tracing::debug!("click dispatch loop shutting down");
    }
}
