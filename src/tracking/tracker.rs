use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info, info_span, instrument, warn, Instrument};

use crate::actor_framework::RowStream;
use crate::clients::{OrderClient, OrderItemClient};
use crate::domain::{LatLng, LineItemView, Order};
use crate::error::TrackingError;
use crate::tracking::position::{
    seed_position, DEFAULT_SEED_OFFSET_DEG, DEFAULT_STEP_FACTOR, DEFAULT_TICK_PERIOD,
};
use crate::tracking::status::{self, StatusPresentation};

/// Tunables for one tracking session. The defaults match the production
/// behavior; tests inject their own.
#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    pub tick_period: Duration,
    pub step_factor: f64,
    pub seed_offset_deg: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tick_period: DEFAULT_TICK_PERIOD,
            step_factor: DEFAULT_STEP_FACTOR,
            seed_offset_deg: DEFAULT_SEED_OFFSET_DEG,
        }
    }
}

/// The complete view state of one tracking session, published on every
/// change. The order snapshot is replaced wholesale by authoritative events;
/// `driver` is either the last authoritative position or the simulated one.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSnapshot {
    pub order: Order,
    pub items: Vec<LineItemView>,
    pub driver: LatLng,
    /// Whether the realtime feed is still open. Goes false permanently once
    /// the feed closes; there is no automatic reconnect.
    pub live: bool,
}

impl TrackingSnapshot {
    /// Pipeline index of the current status, for progress rendering.
    pub fn step_index(&self) -> usize {
        status::step_index(&self.order.status)
    }

    pub fn simulation_active(&self) -> bool {
        status::simulation_active(&self.order.status)
    }

    pub fn presentation(&self) -> StatusPresentation {
        status::presentation(&self.order.status)
    }
}

/// Handle to a running tracking session.
///
/// Dropping the handle tears the session down: the worker observes the stop
/// channel closing, exits its loop, and releases both the subscription and
/// the timer on that single exit path.
#[derive(Debug)]
pub struct TrackerHandle {
    snapshot: watch::Receiver<TrackingSnapshot>,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TrackerHandle {
    /// Current view state.
    pub fn snapshot(&self) -> TrackingSnapshot {
        self.snapshot.borrow().clone()
    }

    /// A watch receiver for awaiting state changes.
    pub fn watch(&self) -> watch::Receiver<TrackingSnapshot> {
        self.snapshot.clone()
    }

    /// Stops the session and waits for the worker to finish. After this
    /// returns, no further state writes can occur.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        let _ = self.task.await;
    }
}

/// Builds tracking sessions for individual orders.
pub struct OrderTracker {
    orders: OrderClient,
    items: OrderItemClient,
    config: TrackerConfig,
}

impl OrderTracker {
    pub fn new(orders: OrderClient, items: OrderItemClient) -> Self {
        Self::with_config(orders, items, TrackerConfig::default())
    }

    pub fn with_config(orders: OrderClient, items: OrderItemClient, config: TrackerConfig) -> Self {
        Self {
            orders,
            items,
            config,
        }
    }

    /// Starts tracking one order: a single authoritative fetch of the order
    /// and its line items, then a realtime subscription plus the local
    /// simulation timer.
    ///
    /// If the order does not exist, returns [`TrackingError::OrderNotFound`]
    /// before any subscription or timer is created.
    #[instrument(skip(self))]
    pub async fn track(&self, order_id: String) -> Result<TrackerHandle, TrackingError> {
        let order = self
            .orders
            .get_order(order_id.clone())
            .await
            .map_err(|e| TrackingError::FetchFailed(e.to_string()))?
            .ok_or_else(|| {
                info!("Order not found");
                TrackingError::OrderNotFound(order_id.clone())
            })?;

        let items = self
            .items
            .list_for_order(order_id.clone())
            .await
            .map_err(|e| TrackingError::FetchFailed(e.to_string()))?;

        let line_sum: f64 = items.iter().map(|item| item.line_total()).sum();
        if (line_sum - order.total_amount).abs() > 1e-6 {
            warn!(
                total = order.total_amount,
                line_sum, "Line items do not reconcile with order total"
            );
        }

        let updates = self
            .orders
            .subscribe_order(order_id.clone())
            .await
            .map_err(|e| TrackingError::SubscribeFailed(e.to_string()))?;

        let driver = seed_position(order.driver, order.destination, self.config.seed_offset_deg);
        let state = TrackingSnapshot {
            order,
            items,
            driver,
            live: true,
        };

        let (publisher, snapshot) = watch::channel(state.clone());
        let (stop_tx, stop_rx) = oneshot::channel();
        let worker = TrackerWorker {
            state,
            publisher,
            config: self.config,
        };
        let span = info_span!("tracking_session", order_id = %order_id);
        let task = tokio::spawn(worker.run(updates, stop_rx).instrument(span));

        Ok(TrackerHandle {
            snapshot,
            stop: Some(stop_tx),
            task,
        })
    }
}

/// Owns the single mutable view state. Exactly one writer: this task.
struct TrackerWorker {
    state: TrackingSnapshot,
    publisher: watch::Sender<TrackingSnapshot>,
    config: TrackerConfig,
}

impl TrackerWorker {
    async fn run(mut self, mut updates: RowStream<Order>, mut stop: oneshot::Receiver<()>) {
        info!("Tracking session started");
        // First tick one period from now; the seed position stands until then.
        let mut ticker = time::interval_at(
            Instant::now() + self.config.tick_period,
            self.config.tick_period,
        );

        loop {
            tokio::select! {
                _ = &mut stop => {
                    debug!("Stop requested");
                    break;
                }
                event = updates.recv(), if self.state.live => {
                    match event {
                        Some(row) => self.apply_authoritative(row),
                        None => {
                            warn!("Realtime feed closed, live updates unavailable");
                            self.state.live = false;
                            self.publish();
                        }
                    }
                }
                _ = ticker.tick() => self.apply_tick(),
            }
        }
        // Falling out of the loop drops the row stream (unsubscribing) and
        // the ticker, exactly once each.
        info!("Tracking session ended");
    }

    /// Replaces the whole order snapshot with the pushed row. If the row
    /// carries driver coordinates they overwrite the current position
    /// unconditionally; authoritative always wins over simulation.
    fn apply_authoritative(&mut self, row: Order) {
        debug!(status = %row.status, "Authoritative update");
        if let Some(driver) = row.driver {
            self.state.driver = driver;
        }
        self.state.order = row;
        self.publish();
    }

    /// One simulation step. The status is re-read from the owned state on
    /// every tick, so a transition to `delivered` that arrived mid-flight
    /// stops the simulation immediately.
    fn apply_tick(&mut self) {
        if !self.state.simulation_active() {
            return;
        }
        self.state.driver = self
            .state
            .driver
            .step_toward(self.state.order.destination, self.config.step_factor);
        self.publish();
    }

    fn publish(&self) {
        let _ = self.publisher.send(self.state.clone());
    }
}
