use super::{FlowError, OPTION_REQUIRED};
use crate::clients::CartClient;
use crate::model::{CartLineId, MenuItem, Section};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// How long the two post-commit timers wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowDelays {
    pub auto_close: Duration,
    pub added_signal: Duration,
}

impl Default for FlowDelays {
    fn default() -> Self {
        Self {
            auto_close: Duration::from_secs(1),
            added_signal: Duration::from_secs(10),
        }
    }
}

/// A timer that fired and was applied to the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowTimer {
    /// The overlay closed and the view returned to the menu.
    AutoClose,
    /// The "Added!" marker was cleared.
    AddedSignalExpired,
}

/// The in-progress selection for the open item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    item: MenuItem,
    option: String,
    quantity: u32,
    notes: String,
    error: Option<String>,
    added: bool,
}

impl Draft {
    fn new(item: MenuItem) -> Self {
        Self {
            item,
            option: String::new(),
            quantity: 1,
            notes: String::new(),
            error: None,
            added: false,
        }
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    pub fn option(&self) -> &str {
        &self.option
    }

    /// Batches to add; at least 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Validation message to show next to the option picker.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the draft has just been added to the cart.
    pub fn added(&self) -> bool {
        self.added
    }

    /// Whether the commit control is enabled.
    pub fn can_commit(&self) -> bool {
        !self.item.has_options() || !self.option.is_empty()
    }
}

/// The configuration overlay. One per view; it owns its pending timers.
pub struct ConfigurationFlow {
    cart: CartClient,
    delays: FlowDelays,
    draft: Option<Draft>,
    section: Section,
    timers: Vec<JoinHandle<()>>,
    fired: Option<mpsc::Receiver<FlowTimer>>,
}

impl ConfigurationFlow {
    pub fn new(cart: CartClient, delays: FlowDelays) -> Self {
        Self {
            cart,
            delays,
            draft: None,
            section: Section::Menu,
            timers: Vec::new(),
            fired: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// The section underneath the overlay.
    pub fn section(&self) -> Section {
        self.section
    }

    pub fn navigate(&mut self, section: Section) {
        self.section = section;
    }

    /// Opens `item` with a fresh draft, discarding any previous draft and its timers.
    pub fn open(&mut self, item: &MenuItem) {
        self.cancel_timers();
        debug!(item = %item.id, "Configuring");
        self.draft = Some(Draft::new(item.clone()));
    }

    /// Chooses a flavor and clears any validation message.
    pub fn select_option(&mut self, option: &str) -> Result<(), FlowError> {
        let draft = self.draft_mut()?;
        draft.option = option.to_string();
        draft.error = None;
        Ok(())
    }

    /// Sets the batch count, clamped to at least 1.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), FlowError> {
        self.draft_mut()?.quantity = quantity.max(1);
        Ok(())
    }

    pub fn increment(&mut self) -> Result<u32, FlowError> {
        let draft = self.draft_mut()?;
        draft.quantity = draft.quantity.saturating_add(1);
        Ok(draft.quantity)
    }

    /// Lowers the batch count by one; stays at 1.
    pub fn decrement(&mut self) -> Result<u32, FlowError> {
        let draft = self.draft_mut()?;
        draft.quantity = draft.quantity.saturating_sub(1).max(1);
        Ok(draft.quantity)
    }

    pub fn set_notes(&mut self, notes: &str) -> Result<(), FlowError> {
        self.draft_mut()?.notes = notes.to_string();
        Ok(())
    }

    /// Adds the draft to the cart and starts the auto-close and added-signal timers.
    ///
    /// Without a required flavor the draft gets a validation message and the cart is not touched.
    #[instrument(skip(self))]
    pub async fn commit(&mut self) -> Result<CartLineId, FlowError> {
        let draft = self.draft.as_mut().ok_or(FlowError::Closed)?;
        if !draft.can_commit() {
            draft.error = Some(OPTION_REQUIRED.to_string());
            return Err(FlowError::MissingOption);
        }

        let added = self
            .cart
            .add_line(&draft.item, &draft.option, draft.quantity, &draft.notes)
            .await;
        let id = match added {
            Ok(id) => id,
            Err(e) => {
                draft.error = Some(e.to_string());
                return Err(e.into());
            }
        };
        draft.error = None;
        draft.added = true;
        info!(item = %draft.item.id, %id, batches = draft.quantity, "Added to cart");

        self.schedule_timers();
        Ok(id)
    }

    /// Discards the draft without touching the cart.
    pub fn cancel(&mut self) {
        self.cancel_timers();
        self.draft = None;
    }

    /// Waits for the next pending timer of the current draft and applies it.
    ///
    /// Returns `None` when nothing is pending.
    pub async fn next_timer(&mut self) -> Option<FlowTimer> {
        let fired = self.fired.as_mut()?.recv().await;
        match fired {
            Some(timer) => {
                self.apply(timer);
                Some(timer)
            }
            None => {
                self.fired = None;
                None
            }
        }
    }

    /// Runs pending timers until the overlay has closed itself.
    pub async fn settle(&mut self) {
        while self.is_open() {
            if self.next_timer().await.is_none() {
                break;
            }
        }
    }

    fn apply(&mut self, timer: FlowTimer) {
        debug!(?timer, "Timer fired");
        match timer {
            FlowTimer::AutoClose => {
                // The draft is gone, so the added-signal timer has nothing left to clear
                self.cancel_timers();
                self.draft = None;
                self.section = Section::Menu;
            }
            FlowTimer::AddedSignalExpired => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.added = false;
                }
            }
        }
    }

    fn schedule_timers(&mut self) {
        self.cancel_timers();
        let (tx, rx) = mpsc::channel(2);
        for (delay, timer) in [
            (self.delays.auto_close, FlowTimer::AutoClose),
            (self.delays.added_signal, FlowTimer::AddedSignalExpired),
        ] {
            let tx = tx.clone();
            self.timers.push(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(timer).await;
            }));
        }
        self.fired = Some(rx);
    }

    fn cancel_timers(&mut self) {
        for handle in self.timers.drain(..) {
            handle.abort();
        }
        self.fired = None;
    }

    fn draft_mut(&mut self) -> Result<&mut Draft, FlowError> {
        self.draft.as_mut().ok_or(FlowError::Closed)
    }
}

impl Drop for ConfigurationFlow {
    fn drop(&mut self) {
        self.cancel_timers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_actor;
    use crate::model::Menu;
    use bakery_actor::MemorySnapshotStore;
    use std::sync::Arc;

    fn flow(delays: FlowDelays) -> (ConfigurationFlow, CartClient) {
        let (actor, cart) = cart_actor::new(8, Arc::new(MemorySnapshotStore::new()), "hb_cart");
        tokio::spawn(actor.run(()));
        (ConfigurationFlow::new(cart.clone(), delays), cart)
    }

    fn item(id: &str) -> MenuItem {
        Menu::standard().find(id).cloned().unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_resets_draft() {
        let (mut flow, _cart) = flow(FlowDelays::default());

        flow.open(&item("muffins"));
        flow.select_option("Raspberry").unwrap();
        flow.set_quantity(4).unwrap();
        flow.set_notes("extra crumble").unwrap();

        flow.open(&item("danishes"));
        let draft = flow.draft().unwrap();
        assert_eq!(draft.item().name, "Cream Cheese Danishes");
        assert_eq!(draft.option(), "");
        assert_eq!(draft.quantity(), 1);
        assert_eq!(draft.notes(), "");
        assert_eq!(draft.error(), None);
        assert!(!draft.added());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quantity_never_below_one() {
        let (mut flow, _cart) = flow(FlowDelays::default());
        flow.open(&item("scones"));

        flow.set_quantity(0).unwrap();
        assert_eq!(flow.draft().unwrap().quantity(), 1);
        assert_eq!(flow.decrement().unwrap(), 1);
        assert_eq!(flow.increment().unwrap(), 2);
        assert_eq!(flow.decrement().unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_option_blocks_commit() {
        let (mut flow, cart) = flow(FlowDelays::default());
        flow.open(&item("muffins"));

        assert_eq!(flow.commit().await, Err(FlowError::MissingOption));
        assert_eq!(flow.draft().unwrap().error(), Some(OPTION_REQUIRED));
        assert!(cart.lines().await.unwrap().is_empty());

        // Choosing a flavor clears the message
        flow.select_option("Blueberry").unwrap();
        assert_eq!(flow.draft().unwrap().error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_adds_then_auto_closes() {
        let (mut flow, cart) = flow(FlowDelays::default());
        flow.navigate(Section::Home);
        flow.open(&item("muffins"));
        flow.select_option("Blueberry").unwrap();
        flow.set_quantity(2).unwrap();

        let id = flow.commit().await.unwrap();
        assert!(flow.draft().unwrap().added());

        let lines = cart.lines().await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].cart_id, id);
        assert_eq!(lines[0].batches, 2);

        let started = tokio::time::Instant::now();
        assert_eq!(flow.next_timer().await, Some(FlowTimer::AutoClose));
        assert!(started.elapsed() >= Duration::from_secs(1));
        assert!(started.elapsed() < Duration::from_secs(10));
        assert!(!flow.is_open());
        assert_eq!(flow.section(), Section::Menu);

        // Closing dropped the added-signal timer with the draft
        assert_eq!(flow.next_timer().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_added_signal_clears_while_open() {
        let (mut flow, _cart) = flow(FlowDelays {
            auto_close: Duration::from_secs(30),
            added_signal: Duration::from_secs(10),
        });
        flow.open(&item("cinnamon"));
        flow.commit().await.unwrap();

        assert_eq!(flow.next_timer().await, Some(FlowTimer::AddedSignalExpired));
        let draft = flow.draft().unwrap();
        assert!(!draft.added());

        flow.settle().await;
        assert!(!flow.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timers_do_not_touch_new_draft() {
        let (mut flow, cart) = flow(FlowDelays::default());
        flow.open(&item("cinnamon"));
        flow.commit().await.unwrap();

        // Re-open before the auto-close fires
        flow.open(&item("scones"));
        tokio::time::sleep(Duration::from_secs(20)).await;

        assert!(flow.is_open());
        assert_eq!(flow.draft().unwrap().item().name, "White Chocolate Scones");
        assert_eq!(flow.next_timer().await, None);
        assert_eq!(cart.lines().await.unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_draft() {
        let (mut flow, cart) = flow(FlowDelays::default());
        flow.open(&item("danishes"));
        flow.select_option("Strawberry").unwrap();
        flow.cancel();

        assert!(!flow.is_open());
        assert_eq!(flow.select_option("Raspberry"), Err(FlowError::Closed));
        assert!(cart.lines().await.unwrap().is_empty());
    }
}
