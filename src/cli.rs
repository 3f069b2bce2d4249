//! The `agentdeck` command line: catalog listing, one-shot rendering and a
//! live view that follows the scanning ticker.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};

use crate::catalog::{AgentFilter, Catalog};
use crate::commands::{agent, anomalies, config, dashboard};
use crate::events::DashboardEvent;
use crate::seed::SeedTable;
use crate::session::{DashboardSession, SessionOptions};
use crate::types::agent::{Agent, AgentUiType};
use crate::types::anomaly::ItemAction;
use crate::types::config::AppConfig;
use crate::types::view::Page;
use crate::watcher::{create_watcher, watch_dirs, WatchEvent, WatchPaths};

/// Render agent dashboards from their declarative layouts
#[derive(Parser)]
#[command(name = "agentdeck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Agent catalog file (defaults to the builtin catalog)
    #[arg(long, global = true, env = "AGENTDECK_CATALOG", value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Config file (defaults to ~/.agentdeck/config.json)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog agents
    List {
        /// Only agents in this category ("All" for every category)
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive match on name, description or category
        #[arg(long)]
        search: Option<String>,
    },

    /// Render an agent's dashboard once
    Render {
        agent_id: String,

        /// Confirm a decision item before rendering (repeatable)
        #[arg(long = "approve", value_name = "ID")]
        approve: Vec<u32>,

        /// Reject a decision item before rendering (repeatable)
        #[arg(long = "reject", value_name = "ID")]
        reject: Vec<u32>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Keep a dashboard mounted and print it as the scanning indicator toggles
    Live {
        agent_id: String,

        /// Exit after this many scanning toggles
        #[arg(long)]
        toggles: Option<u32>,
    },

    /// Show or patch the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective config
    Show,
    /// Deep-merge a JSON patch into the config file
    Update { patch: String },
}

struct Workspace {
    config_path: PathBuf,
    /// `--catalog` / `AGENTDECK_CATALOG`; wins over the config file.
    catalog_override: Option<PathBuf>,
    config: AppConfig,
    catalog_path: Option<PathBuf>,
    catalog: Catalog,
    seeds: Arc<SeedTable>,
}

impl Workspace {
    fn load(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => config::config_path().map_err(|e| anyhow!(e))?,
        };
        let config = config::load_app_config(&config_path)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("Failed to load config {}", config_path.display()))?;

        let catalog_path = cli.catalog.clone().or_else(|| config.catalog_path.clone());
        let catalog = Catalog::load_or_builtin(catalog_path.as_deref())?;
        let seeds = Arc::new(SeedTable::builtin_with_default(&config.default_category));

        Ok(Self {
            config_path,
            catalog_override: cli.catalog.clone(),
            config,
            catalog_path,
            catalog,
            seeds,
        })
    }
}

pub async fn execute(cli: Cli) -> Result<()> {
    let ctx = Workspace::load(&cli)?;

    match cli.command {
        Commands::List { category, search } => {
            list(&ctx.catalog, AgentFilter { category, search });
            Ok(())
        }
        Commands::Render {
            agent_id,
            approve,
            reject,
            json,
        } => render(&ctx, &agent_id, &approve, &reject, json),
        Commands::Live { agent_id, toggles } => live(ctx, &agent_id, toggles).await,
        Commands::Config { command } => match command {
            ConfigCommand::Show => {
                println!("{}", serde_json::to_string_pretty(&ctx.config)?);
                Ok(())
            }
            ConfigCommand::Update { patch } => {
                let merged = config::config_update_file(&ctx.config_path, &patch)
                    .map_err(|e| anyhow!(e))?;
                println!("{}", merged);
                Ok(())
            }
        },
    }
}

fn list(catalog: &Catalog, filter: AgentFilter) {
    let agents = agent::agents_list(catalog, &filter);
    if agents.is_empty() {
        println!("No agents match.");
        return;
    }
    for agent in &agents {
        println!("{}", list_line(agent));
    }
}

fn list_line(agent: &Agent) -> String {
    let layout = match (agent.ui_type, &agent.dashboard_config) {
        (AgentUiType::Dashboard, None) => " (no layout)",
        _ => "",
    };
    format!(
        "{:<12} {:<24} {:<18} {}{}",
        agent.id,
        agent.name,
        agent.category,
        agent.ui_type.label(),
        layout
    )
}

fn render(ctx: &Workspace, agent_id: &str, approve: &[u32], reject: &[u32], json: bool) -> Result<()> {
    let mut session = dashboard::dashboard_open(
        &ctx.catalog,
        ctx.seeds.clone(),
        &ctx.config,
        agent_id,
    )
    .map_err(|e| anyhow!(e))?;

    let feedback = approve
        .iter()
        .map(|id| (*id, ItemAction::Approve))
        .chain(reject.iter().map(|id| (*id, ItemAction::Reject)));
    for (item_id, action) in feedback {
        anomalies::anomalies_feedback(&mut session, item_id, action).map_err(|e| anyhow!(e))?;
    }

    let page = dashboard::dashboard_render(&session).map_err(|e| anyhow!(e))?;
    print_page(&page, json)
}

fn print_page(page: &Page, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
    } else {
        println!("{}", page);
    }
    Ok(())
}

/// Live dashboard plus everything it was built from, so file changes can be
/// applied without restarting.
struct LiveView {
    agent_id: String,
    config_path: PathBuf,
    catalog_override: Option<PathBuf>,
    config: AppConfig,
    catalog_path: Option<PathBuf>,
    catalog: Catalog,
    seeds: Arc<SeedTable>,
    session: DashboardSession,
}

impl LiveView {
    fn open(ws: Workspace, agent_id: &str) -> Result<Self> {
        let session = dashboard::dashboard_open(&ws.catalog, ws.seeds.clone(), &ws.config, agent_id)
            .map_err(|e| anyhow!(e))?;
        Ok(Self {
            agent_id: agent_id.to_string(),
            config_path: ws.config_path,
            catalog_override: ws.catalog_override,
            config: ws.config,
            catalog_path: ws.catalog_path,
            catalog: ws.catalog,
            seeds: ws.seeds,
            session,
        })
    }

    fn watch_paths(&self) -> WatchPaths {
        WatchPaths {
            config: self.config_path.clone(),
            catalog: self.catalog_path.clone(),
        }
    }

    /// Re-reads the catalog file. Returns whether the page changed.
    fn reload_catalog(&mut self, path: &Path) -> bool {
        match Catalog::load(path) {
            Ok(reloaded) => {
                self.catalog = reloaded;
                match agent::agent_get(&self.catalog, &self.agent_id) {
                    Ok(agent) => self.session.switch_agent(agent),
                    Err(e) => {
                        warn!(error = %e, "Agent left the catalog, keeping last layout");
                        false
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Catalog reload failed, keeping previous catalog");
                false
            }
        }
    }

    /// Re-reads the config file and remounts with fresh seeds when anything
    /// changed. Returns whether a new session was mounted.
    fn reload_config(&mut self) -> bool {
        let reloaded = match config::load_app_config(&self.config_path) {
            Ok(reloaded) if reloaded != self.config => reloaded,
            Ok(_) => return false,
            Err(e) => {
                warn!(error = %e, "Config reload failed");
                return false;
            }
        };

        info!("Config changed, remounting dashboard");
        self.seeds = Arc::new(SeedTable::builtin_with_default(&reloaded.default_category));

        let catalog_path = self
            .catalog_override
            .clone()
            .or_else(|| reloaded.catalog_path.clone());
        if catalog_path != self.catalog_path {
            match Catalog::load_or_builtin(catalog_path.as_deref()) {
                Ok(catalog) => {
                    self.catalog = catalog;
                    self.catalog_path = catalog_path;
                }
                Err(e) => warn!(error = %e, "New catalog unreadable, keeping previous catalog"),
            }
        }
        self.config = reloaded;

        match agent::agent_get(&self.catalog, &self.agent_id) {
            Ok(agent) => {
                self.session = DashboardSession::open(
                    agent,
                    self.seeds.clone(),
                    SessionOptions::from(&self.config),
                );
                true
            }
            Err(e) => {
                warn!(error = %e, "Agent missing after config reload, keeping last layout");
                false
            }
        }
    }

    fn render(&self) -> Result<Page> {
        dashboard::dashboard_render(&self.session).map_err(|e| anyhow!(e))
    }
}

fn start_watcher(
    tx: &mpsc::UnboundedSender<WatchEvent>,
    paths: &WatchPaths,
) -> Result<RecommendedWatcher> {
    let mut watcher = create_watcher(tx.clone(), paths.clone())?;
    for dir in watch_dirs(paths) {
        if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
            warn!(dir = %dir.display(), error = %e, "Cannot watch directory");
        }
    }
    Ok(watcher)
}

async fn live(ws: Workspace, agent_id: &str, toggles: Option<u32>) -> Result<()> {
    let mut view = LiveView::open(ws, agent_id)?;
    let mut events = view.session.subscribe();

    let (tx, mut watch_rx) = mpsc::unbounded_channel();
    let mut watched = view.watch_paths();
    let mut _watcher = start_watcher(&tx, &watched)?;

    print_page(&view.render()?, false)?;

    let mut seen = 0u32;
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(DashboardEvent::ScanToggled { .. }) => {
                    seen += 1;
                    if let Ok(Page::Dashboard(page)) = view.render() {
                        println!("{}", page.header.status.label());
                    }
                    if toggles.is_some_and(|limit| seen >= limit) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live view fell behind dashboard events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            Some(change) = watch_rx.recv() => {
                let changed = match change {
                    WatchEvent::CatalogChanged { path } => view.reload_catalog(&path),
                    WatchEvent::ConfigChanged => {
                        let remounted = view.reload_config();
                        if remounted {
                            events = view.session.subscribe();
                        }
                        let paths = view.watch_paths();
                        if paths != watched {
                            match start_watcher(&tx, &paths) {
                                Ok(watcher) => {
                                    _watcher = watcher;
                                    watched = paths;
                                }
                                Err(e) => warn!(error = %e, "Cannot watch new catalog path"),
                            }
                        }
                        remounted
                    }
                };
                if changed {
                    print_page(&view.render()?, false)?;
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    view.session.unmount();
    Ok(())
}
