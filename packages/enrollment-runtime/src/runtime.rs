//! Runtime loop with tick timing and per-tick request limits.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use enrollment_core::config::StoreConfig;
use enrollment_core::EnrollmentStore;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::api_handlers::ApiHandlers;
use crate::api_request::ApiRequest;

/// Main runtime loop
///
/// Owns the store through [`ApiHandlers`]; it is the only writer.
pub struct Runtime {
    /// Configuration
    config: StoreConfig,
    /// Tick duration
    tick_duration: Duration,
    /// API request receiver
    api_rx: mpsc::Receiver<ApiRequest>,
    /// Requests drained from the channel but not yet processed
    queue: VecDeque<ApiRequest>,
    /// Set once every sender has been dropped
    disconnected: bool,
    /// Current tick count
    tick_count: u64,
    /// API handlers
    api_handlers: ApiHandlers,
}

impl Runtime {
    /// Create a new runtime
    pub fn new(
        store: EnrollmentStore,
        config: StoreConfig,
        api_rx: mpsc::Receiver<ApiRequest>,
    ) -> Self {
        let tick_duration = Duration::from_secs_f64(1.0 / config.tickrate.max(1) as f64);

        Self {
            config,
            tick_duration,
            api_rx,
            queue: VecDeque::new(),
            disconnected: false,
            tick_count: 0,
            api_handlers: ApiHandlers::new(store),
        }
    }

    /// Read-only access to the store
    pub fn store(&self) -> &EnrollmentStore {
        self.api_handlers.store()
    }

    /// Number of requests waiting for a later tick
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of ticks executed so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Returns true once all senders are gone and nothing is left to process.
    pub fn is_finished(&self) -> bool {
        self.disconnected && self.queue.is_empty()
    }

    /// Pull requests from the channel until the queue holds one tick's worth.
    ///
    /// Anything beyond that stays in the bounded channel, so senders feel
    /// backpressure instead of the queue growing.
    fn drain_api_channel(&mut self) {
        let budget = (self.config.max_api_requests_per_tick as usize).max(1);
        while self.queue.len() < budget {
            match self.api_rx.try_recv() {
                Ok(req) if req.is_abandoned() => {
                    tracing::debug!("Dropping request whose caller stopped waiting");
                }
                Ok(req) => self.queue.push_back(req),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.disconnected = true;
                    break;
                }
            }
        }
    }

    /// Process queued API requests up to limit and time budget.
    fn process_queued_requests(&mut self, tick_start: Instant) -> usize {
        let max_requests = (self.config.max_api_requests_per_tick as usize).max(1);
        let mut processed = 0;

        while processed < max_requests {
            if tick_start.elapsed() > self.tick_duration {
                break;
            }
            match self.queue.pop_front() {
                Some(req) if req.is_abandoned() => {
                    tracing::debug!("Dropping request whose caller stopped waiting");
                }
                Some(req) => {
                    self.api_handlers.handle_api_request(req);
                    processed += 1;
                }
                None => break,
            }
        }

        processed
    }

    /// Execute a single tick of the runtime
    ///
    /// Returns the number of requests processed.
    pub fn tick(&mut self) -> usize {
        let tick_start = Instant::now();

        self.drain_api_channel();
        let processed = self.process_queued_requests(tick_start);
        if processed > 0 {
            tracing::debug!(
                tick = self.tick_count,
                processed,
                pending = self.queue.len(),
                "Tick processed requests"
            );
        }

        // Sleep remainder of tick
        if let Some(remaining) = self.tick_duration.checked_sub(tick_start.elapsed()) {
            std::thread::sleep(remaining);
        }

        self.tick_count += 1;
        processed
    }

    /// Run the runtime loop (blocking) until every sender is dropped.
    pub fn run(&mut self) {
        tracing::info!(
            tickrate = self.config.tickrate,
            course_capacity = self.store().course_capacity(),
            "Runtime started"
        );
        while !self.is_finished() {
            self.tick();
        }
        tracing::info!(ticks = self.tick_count, "Runtime stopped");
    }
}
