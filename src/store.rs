//! The single storefront store
//!
//! Owns the [`RootState`] inside a `tokio::sync::watch` channel. Every
//! command is applied under the channel's lock, in submission order, and
//! subscribers are woken only when some slice actually changed.

use crate::ids::{IdGenerator, RequestId, UuidIdGenerator};
use crate::state::{AuthCommand, Command, ConstructorCommand, OrderCommand, RootState};
use burger_types::{Ingredient, InstanceId, Order, SelectedIngredient};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

pub struct Store {
    state: watch::Sender<RootState>,
    ids: Arc<dyn IdGenerator>,
    requests: AtomicU64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Arc::new(UuidIdGenerator))
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.state.borrow())
            .field("requests", &self.requests.load(Ordering::Relaxed))
            .finish()
    }
}

impl Store {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self::with_state(RootState::default(), ids)
    }

    pub fn with_state(initial: RootState, ids: Arc<dyn IdGenerator>) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            ids,
            requests: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state. Cheap: slices are shared.
    pub fn state(&self) -> RootState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RootState> {
        self.state.subscribe()
    }

    /// Apply one command. Returns whether any slice changed.
    pub fn dispatch(&self, command: impl Into<Command>) -> bool {
        let command = command.into();
        let label = command.label();
        let changed = self.state.send_if_modified(|state| {
            let next = state.apply(command);
            if next.ptr_eq(state) {
                return false;
            }
            *state = next;
            true
        });
        debug!(command = label, changed, "dispatched");
        changed
    }

    /// Apply `command` only if `guard` holds, checked under the same lock.
    /// Returns whether the guard admitted the command.
    pub fn dispatch_if(
        &self,
        guard: impl FnOnce(&RootState) -> bool,
        command: impl Into<Command>,
    ) -> bool {
        let command = command.into();
        let label = command.label();
        let mut admitted = false;
        let changed = self.state.send_if_modified(|state| {
            if !guard(state) {
                return false;
            }
            admitted = true;
            let next = state.apply(command);
            if next.ptr_eq(state) {
                return false;
            }
            *state = next;
            true
        });
        debug!(command = label, admitted, changed, "conditional dispatch");
        admitted
    }

    /// Fresh generation token for an async request
    pub fn next_request_id(&self) -> RequestId {
        RequestId::new(self.requests.fetch_add(1, Ordering::Relaxed) + 1)
    }

    // ------------------------------------------------------------------
    // Synchronous operations
    // ------------------------------------------------------------------

    /// Place `ingredient` in the constructor under a fresh instance id
    pub fn add_ingredient(&self, ingredient: Ingredient) -> InstanceId {
        let instance_id = self.ids.next_id();
        self.dispatch(ConstructorCommand::Add(SelectedIngredient::new(
            instance_id,
            ingredient,
        )));
        instance_id
    }

    pub fn remove_ingredient(&self, instance_id: InstanceId) -> bool {
        self.dispatch(ConstructorCommand::Remove(instance_id))
    }

    pub fn move_ingredient(&self, from: usize, to: usize) -> bool {
        self.dispatch(ConstructorCommand::Move { from, to })
    }

    pub fn clear_constructor(&self) {
        self.dispatch(ConstructorCommand::Clear);
    }

    pub fn set_order_data(&self, order: Option<Order>) {
        self.dispatch(OrderCommand::SetOrderData(order));
    }

    pub fn clear_order_error(&self) {
        self.dispatch(OrderCommand::ClearError);
    }

    pub fn reset_order(&self) {
        self.dispatch(OrderCommand::Reset);
    }

    pub fn mark_auth_checked(&self) {
        self.dispatch(AuthCommand::MarkAuthChecked);
    }

    pub fn reset_auth(&self) {
        self.dispatch(AuthCommand::Reset);
    }
}
