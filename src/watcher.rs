use notify::{Event, EventKind, RecommendedWatcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    ConfigChanged,
    CatalogChanged { path: PathBuf },
}

/// Files whose changes the live view reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchPaths {
    pub config: PathBuf,
    pub catalog: Option<PathBuf>,
}

pub fn classify_event(event: &Event, paths: &WatchPaths) -> Option<WatchEvent> {
    match event.kind {
        EventKind::Modify(_) | EventKind::Create(_) => {
            for path in &event.paths {
                if path == &paths.config {
                    return Some(WatchEvent::ConfigChanged);
                }
                if paths.catalog.as_deref() == Some(path.as_path()) {
                    return Some(WatchEvent::CatalogChanged { path: path.clone() });
                }
            }
            None
        }
        _ => None,
    }
}

/// Directories to register so that editors replacing a file (write to temp,
/// rename over) are still seen.
pub fn watch_dirs(paths: &WatchPaths) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    let files = std::iter::once(paths.config.as_path()).chain(paths.catalog.as_deref());
    for dir in files.filter_map(Path::parent) {
        if !dirs.iter().any(|d| d == dir) {
            dirs.push(dir.to_path_buf());
        }
    }
    dirs
}

pub fn create_watcher(
    tx: mpsc::UnboundedSender<WatchEvent>,
    paths: WatchPaths,
) -> Result<RecommendedWatcher, notify::Error> {
    let watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
        if let Ok(event) = res {
            if let Some(watch_event) = classify_event(&event, &paths) {
                let _ = tx.send(watch_event);
            }
        }
    })?;
    Ok(watcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, ModifyKind, RemoveKind};

    fn make_event(kind: EventKind, paths: Vec<PathBuf>) -> Event {
        Event {
            kind,
            paths,
            attrs: Default::default(),
        }
    }

    fn paths() -> WatchPaths {
        WatchPaths {
            config: PathBuf::from("/home/user/.agentdeck/config.json"),
            catalog: Some(PathBuf::from("/srv/catalog/agents.json")),
        }
    }

    #[test]
    fn classify_config_modify() {
        let paths = paths();
        let event = make_event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            vec![paths.config.clone()],
        );
        assert_eq!(classify_event(&event, &paths), Some(WatchEvent::ConfigChanged));
    }

    #[test]
    fn classify_catalog_create() {
        let paths = paths();
        let catalog = paths.catalog.clone().unwrap();
        let event = make_event(EventKind::Create(CreateKind::File), vec![catalog.clone()]);
        assert_eq!(
            classify_event(&event, &paths),
            Some(WatchEvent::CatalogChanged { path: catalog })
        );
    }

    #[test]
    fn classify_ignores_delete() {
        let paths = paths();
        let event = make_event(EventKind::Remove(RemoveKind::File), vec![paths.config.clone()]);
        assert!(classify_event(&event, &paths).is_none());
    }

    #[test]
    fn classify_ignores_unrelated_json() {
        let paths = paths();
        let other = PathBuf::from("/srv/catalog/other.json");
        let event = make_event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            vec![other],
        );
        assert!(classify_event(&event, &paths).is_none());
    }

    #[test]
    fn builtin_catalog_is_never_matched() {
        let paths = WatchPaths {
            catalog: None,
            ..paths()
        };
        let event = make_event(
            EventKind::Modify(ModifyKind::Any),
            vec![PathBuf::from("/srv/catalog/agents.json")],
        );
        assert!(classify_event(&event, &paths).is_none());
    }

    #[test]
    fn watch_dirs_are_deduplicated() {
        let paths = WatchPaths {
            config: PathBuf::from("/a/config.json"),
            catalog: Some(PathBuf::from("/a/agents.json")),
        };
        assert_eq!(watch_dirs(&paths), vec![PathBuf::from("/a")]);
        assert_eq!(watch_dirs(&self::paths()).len(), 2);
    }

    #[test]
    fn create_watcher_compiles() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let result = create_watcher(tx, paths());
        assert!(result.is_ok());
    }
}
