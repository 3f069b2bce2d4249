//! One mounted dashboard: owns the agent's state from mount to teardown and
//! runs the scanning ticker for it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::compose::compose;
use crate::events::{emit_event, event_channel, DashboardEvent};
use crate::seed::SeedTable;
use crate::state::DashboardState;
use crate::types::agent::Agent;
use crate::types::anomaly::ItemAction;
use crate::types::config::AppConfig;
use crate::types::view::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Uninitialized,
    Seeded,
    Interacting,
    TornDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub scan_interval: Duration,
    pub switch_latency: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for SessionOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            scan_interval: config.scan_interval(),
            switch_latency: config.switch_latency(),
        }
    }
}

struct Mounted {
    agent: Agent,
    state: Arc<Mutex<DashboardState>>,
    /// Cleared under the state lock on teardown; the ticker checks it under
    /// the same lock, so no toggle lands after `TornDown`.
    live: Arc<AtomicBool>,
    ticker: Option<JoinHandle<()>>,
}

pub struct DashboardSession {
    seeds: Arc<SeedTable>,
    options: SessionOptions,
    events: broadcast::Sender<DashboardEvent>,
    mounted: Option<Mounted>,
    lifecycle: Lifecycle,
}

impl DashboardSession {
    pub fn new(seeds: Arc<SeedTable>, options: SessionOptions) -> Self {
        Self {
            seeds,
            options,
            events: event_channel(),
            mounted: None,
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Creates a session and mounts `agent` right away.
    pub fn open(agent: Agent, seeds: Arc<SeedTable>, options: SessionOptions) -> Self {
        let mut session = Self::new(seeds, options);
        session.mount(agent);
        session
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn agent(&self) -> Option<&Agent> {
        self.mounted.as_ref().map(|mounted| &mounted.agent)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    /// Copy of the current state, if an agent is mounted.
    pub fn state(&self) -> Option<DashboardState> {
        self.mounted.as_ref().map(|mounted| lock(&mounted.state).clone())
    }

    /// Seeds fresh state for `agent` and starts its scanning ticker. Anything
    /// mounted before is torn down first; nothing carries over.
    pub fn mount(&mut self, agent: Agent) {
        self.teardown();

        let state = Arc::new(Mutex::new(DashboardState::seeded(&agent.category, &self.seeds)));
        warn_if_unseeded(&self.seeds, &agent);
        let live = Arc::new(AtomicBool::new(true));
        let ticker = spawn_scan_ticker(
            Arc::downgrade(&state),
            live.clone(),
            self.events.clone(),
            self.options.scan_interval,
        );

        info!(agent_id = %agent.id, category = %agent.category, "Mounted dashboard");
        emit_event(
            &self.events,
            DashboardEvent::Seeded {
                agent_id: agent.id.clone(),
                category: agent.category.clone(),
            },
        );
        self.mounted = Some(Mounted {
            agent,
            state,
            live,
            ticker,
        });
        self.lifecycle = Lifecycle::Seeded;
    }

    /// Remounts when `agent` is a different agent. The same agent with a new
    /// category (a reloaded catalog) is reseeded in place. Returns whether
    /// anything changed.
    pub fn switch_agent(&mut self, agent: Agent) -> bool {
        let Some(mounted) = self.mounted.as_mut().filter(|m| m.agent.id == agent.id) else {
            self.mount(agent);
            return true;
        };

        if mounted.agent.category == agent.category {
            debug!(agent_id = %agent.id, "Agent unchanged, keeping dashboard state");
            mounted.agent = agent;
            return false;
        }

        lock(&mounted.state).reseed(&agent.category, &self.seeds);
        warn_if_unseeded(&self.seeds, &agent);
        info!(agent_id = %agent.id, category = %agent.category, "Reseeded dashboard for new category");
        emit_event(
            &self.events,
            DashboardEvent::Seeded {
                agent_id: agent.id.clone(),
                category: agent.category.clone(),
            },
        );
        mounted.agent = agent;
        self.lifecycle = Lifecycle::Seeded;
        true
    }

    /// `switch_agent` after the configured simulated latency. Dropping the
    /// future before the delay elapses leaves the session untouched.
    pub async fn switch_agent_after_latency(&mut self, agent: Agent) -> bool {
        time::sleep(self.options.switch_latency).await;
        self.switch_agent(agent)
    }

    /// Stops the ticker and discards the state.
    pub fn unmount(&mut self) {
        self.teardown();
    }

    /// Renders the mounted agent's page from current state.
    pub fn render(&self) -> Option<Page> {
        let mounted = self.mounted.as_ref()?;
        let state = lock(&mounted.state);
        Some(compose(&mounted.agent, &state))
    }

    /// Applies a confirm/reject to one decision item. Returns false when no
    /// agent is mounted or the item is already gone.
    pub fn apply(&mut self, item_id: u32, action: ItemAction) -> bool {
        let Some(mounted) = self.mounted.as_ref() else {
            return false;
        };

        let main_metric = {
            let mut state = lock(&mounted.state);
            if state.apply(item_id, action).is_none() {
                debug!(item_id, ?action, "Item already resolved, ignoring");
                return false;
            }
            state.main_metric
        };

        self.lifecycle = Lifecycle::Interacting;
        emit_event(
            &self.events,
            DashboardEvent::ItemResolved {
                item_id,
                action,
                main_metric,
            },
        );
        true
    }

    pub fn approve(&mut self, item_id: u32) -> bool {
        self.apply(item_id, ItemAction::Approve)
    }

    pub fn reject(&mut self, item_id: u32) -> bool {
        self.apply(item_id, ItemAction::Reject)
    }

    fn teardown(&mut self) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };
        {
            let _state = lock(&mounted.state);
            mounted.live.store(false, Ordering::Release);
        }
        if let Some(ticker) = mounted.ticker {
            ticker.abort();
        }
        info!(agent_id = %mounted.agent.id, "Tore down dashboard");
        emit_event(
            &self.events,
            DashboardEvent::TornDown {
                agent_id: mounted.agent.id,
            },
        );
        self.lifecycle = Lifecycle::TornDown;
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn warn_if_unseeded(seeds: &SeedTable, agent: &Agent) {
    if !seeds.contains(&agent.category) {
        warn!(
            agent_id = %agent.id,
            category = %agent.category,
            fallback = %seeds.default_category(),
            "No seed data for agent category, using default dataset"
        );
    }
}

fn lock(state: &Mutex<DashboardState>) -> std::sync::MutexGuard<'_, DashboardState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Toggles the scanning flag every `period`. The task holds only a weak
/// reference, so it ends by itself once the state it was started for is gone
/// or its mount is no longer `live`.
fn spawn_scan_ticker(
    state: Weak<Mutex<DashboardState>>,
    live: Arc<AtomicBool>,
    events: broadcast::Sender<DashboardEvent>,
    period: Duration,
) -> Option<JoinHandle<()>> {
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        warn!("No async runtime; scanning indicator will stay static");
        return None;
    };

    Some(handle.spawn(async move {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let Some(state) = state.upgrade() else {
                debug!("Dashboard state dropped, stopping scan ticker");
                break;
            };
            let mut guard = lock(&state);
            if !live.load(Ordering::Acquire) {
                debug!("Dashboard torn down, stopping scan ticker");
                break;
            }
            let scanning = guard.toggle_scanning();
            emit_event(&events, DashboardEvent::ScanToggled { scanning });
        }
    }))
}
