//! Event-driven filter recomputation with a debounced search field.

use super::{filter_products, FilterState};
use crate::catalog::Product;
use crate::debounce::{sleep_until, Debounce};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

/// A user edit to the filter state.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    /// Search text changed (debounced)
    Search(String),
    PriceRange { min: Option<f64>, max: Option<f64> },
    ToggleBrand(String),
    MinRating(Option<f64>),
    MinDiscount(Option<f64>),
    SubCategory(Option<String>),
    /// Reset every field and show the full list
    Clear,
}

impl FilterEvent {
    /// Applies the edit to `state`.
    pub fn apply_to(self, state: &mut FilterState) {
        match self {
            FilterEvent::Search(text) => state.search = text,
            FilterEvent::PriceRange { min, max } => {
                state.min_price = min;
                state.max_price = max;
            }
            FilterEvent::ToggleBrand(brand) => state.toggle_brand(&brand),
            FilterEvent::MinRating(min) => state.min_rating = min,
            FilterEvent::MinDiscount(min) => state.min_discount = min,
            FilterEvent::SubCategory(category) => state.sub_category = category,
            FilterEvent::Clear => state.clear(),
        }
    }
}

enum Command {
    Event(FilterEvent),
    Products(Vec<Product>),
    Snapshot(oneshot::Sender<FilterState>),
}

/// Recomputes the filtered list as filter events arrive and hands each
/// result to a setter.
///
/// Search edits wait for a quiet window; every other edit is applied at
/// once against the last committed search text. The source list is never
/// modified. Dropping the composer stops it, discarding any pending search.
pub struct FilterComposer {
    tx: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl FilterComposer {
    /// Spawns the composer and immediately emits the list filtered by `state`.
    pub fn spawn<F>(
        products: Vec<Product>,
        state: FilterState,
        delay: Duration,
        set_filtered: F,
    ) -> Self
    where
        F: FnMut(Vec<Product>) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(products, state, delay, rx, set_filtered));
        Self { tx, task }
    }

    pub fn send(&self, event: FilterEvent) {
        let _ = self.tx.send(Command::Event(event));
    }

    /// Replaces the source list and re-filters it immediately.
    pub fn set_products(&self, products: Vec<Product>) {
        let _ = self.tx.send(Command::Products(products));
    }

    /// The committed filter state (pending search text excluded).
    pub async fn state(&self) -> Option<FilterState> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(Command::Snapshot(reply)).ok()?;
        rx.await.ok()
    }
}

impl Drop for FilterComposer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<F>(
    mut products: Vec<Product>,
    mut state: FilterState,
    delay: Duration,
    mut rx: mpsc::UnboundedReceiver<Command>,
    mut set_filtered: F,
) where
    F: FnMut(Vec<Product>),
{
    let mut pending_search = Debounce::new(delay);
    set_filtered(filter_products(&products, &state));

    loop {
        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Event(FilterEvent::Search(text))) => {
                    pending_search.push(text, Instant::now());
                }
                Some(Command::Event(FilterEvent::Clear)) => {
                    pending_search.cancel();
                    state.clear();
                    set_filtered(products.clone());
                }
                Some(Command::Event(event)) => {
                    debug!("Applying filter event: {:?}", event);
                    event.apply_to(&mut state);
                    set_filtered(filter_products(&products, &state));
                }
                Some(Command::Products(list)) => {
                    products = list;
                    set_filtered(filter_products(&products, &state));
                }
                Some(Command::Snapshot(reply)) => {
                    let _ = reply.send(state.clone());
                }
                None => break,
            },
            _ = sleep_until(pending_search.deadline()) => {
                if let Some(text) = pending_search.take_ready(Instant::now()) {
                    debug!("Applying search: {:?}", text);
                    FilterEvent::Search(text).apply_to(&mut state);
                    set_filtered(filter_products(&products, &state));
                }
            }
        }
    }
}
