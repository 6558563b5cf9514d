//! In-memory session store with optional JSON-file persistence
//!
//! Snapshots handed out are deep copies; callers never share state with the
//! store. When a persistence path is set, the whole store is rewritten after
//! every mutation.

use chrono::Utc;
use council_application::ports::session_store::{SessionStoreError, SessionStorePort};
use council_domain::{
    AuditLogEntry, ConversationTurn, NodeId, SaveBucket, SavedItem, SessionSnapshot,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

type Sessions = BTreeMap<String, SessionSnapshot>;

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<Sessions>,
    path: Option<PathBuf>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load sessions from `path` if it exists and persist to it afterwards.
    ///
    /// An unreadable or malformed file is logged and treated as empty.
    pub fn with_persistence(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let sessions = load_sessions(&path);
        info!(
            "Session store at {} ({} sessions)",
            path.display(),
            sessions.len()
        );
        Self {
            sessions: Mutex::new(sessions),
            path: Some(path),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn mutate(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut SessionSnapshot),
    ) -> Result<(), SessionStoreError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| SessionStoreError::Persistence("session store lock poisoned".to_string()))?;
        let session = sessions.entry(session_id.to_string()).or_default();
        f(session);
        session.updated_at = Some(Utc::now().to_rfc3339());

        if let Some(path) = &self.path {
            persist(path, &sessions)?;
        }
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&Sessions) -> T) -> T {
        match self.sessions.lock() {
            Ok(sessions) => f(&sessions),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }
}

fn load_sessions(path: &Path) -> Sessions {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("No session file at {}: {}", path.display(), e);
            return Sessions::new();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!("Ignoring malformed session file {}: {}", path.display(), e);
        Sessions::new()
    })
}

fn persist(path: &Path, sessions: &Sessions) -> Result<(), SessionStoreError> {
    let json = serde_json::to_string_pretty(sessions)
        .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| SessionStoreError::Persistence(e.to_string()))?;
    }
    std::fs::write(path, json).map_err(|e| SessionStoreError::Persistence(e.to_string()))
}

impl SessionStorePort for InMemorySessionStore {
    fn snapshot(&self, session_id: &str) -> SessionSnapshot {
        self.read(|sessions| sessions.get(session_id).cloned().unwrap_or_default())
    }

    fn append_turn(
        &self,
        session_id: &str,
        turn: ConversationTurn,
    ) -> Result<(), SessionStoreError> {
        self.mutate(session_id, |s| s.conversation_history.push(turn))
    }

    fn set_structured_symptom_list(
        &self,
        session_id: &str,
        symptoms: Vec<String>,
    ) -> Result<(), SessionStoreError> {
        self.mutate(session_id, |s| s.structured_symptom_list = symptoms)
    }

    fn set_active_nodes(
        &self,
        session_id: &str,
        nodes: Vec<NodeId>,
    ) -> Result<(), SessionStoreError> {
        self.mutate(session_id, |s| s.active_nodes = nodes)
    }

    fn append_audit_log(
        &self,
        session_id: &str,
        entry: AuditLogEntry,
    ) -> Result<(), SessionStoreError> {
        let content = serde_json::to_string(&entry)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        let mirrored = SavedItem {
            timestamp: entry.timestamp.clone(),
            node: Some(NodeId::Auditor),
            message: None,
            content,
        };
        self.mutate(session_id, |s| {
            s.audit_log.push(entry);
            s.saved
                .entry(SaveBucket::AuditLogs)
                .or_default()
                .push(mirrored);
        })
    }

    fn save(
        &self,
        session_id: &str,
        bucket: SaveBucket,
        item: SavedItem,
    ) -> Result<(), SessionStoreError> {
        self.mutate(session_id, |s| s.saved.entry(bucket).or_default().push(item))
    }

    fn session_ids(&self) -> Vec<String> {
        self.read(|sessions| sessions.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> AuditLogEntry {
        AuditLogEntry {
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            active_node: NodeId::Yapper,
            flagged_segments: vec!["percentage figure: \"80%\"".to_string()],
            revision_suggestions: vec![],
        }
    }

    #[test]
    fn test_unknown_session_is_empty() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.snapshot("nobody"), SessionSnapshot::default());
        assert!(store.session_ids().is_empty());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let store = InMemorySessionStore::new();
        store.append_turn("s1", ConversationTurn::user("hi")).unwrap();

        let mut snapshot = store.snapshot("s1");
        snapshot.conversation_history.clear();

        assert_eq!(store.history("s1").len(), 1);
        assert!(store.snapshot("s1").updated_at.is_some());
    }

    #[test]
    fn test_audit_log_is_mirrored_into_bucket() {
        let store = InMemorySessionStore::new();
        store.append_audit_log("s1", entry()).unwrap();

        let snapshot = store.snapshot("s1");
        assert_eq!(snapshot.audit_log.len(), 1);
        let mirrored = store.list_saved("s1", SaveBucket::AuditLogs);
        assert_eq!(mirrored.len(), 1);
        let parsed: AuditLogEntry = serde_json::from_str(&mirrored[0].content).unwrap();
        assert_eq!(parsed, entry());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = InMemorySessionStore::new();
        store.set_structured_symptom_list("a", vec!["bloating".to_string()]).unwrap();
        store.set_active_nodes("b", vec![NodeId::Definer]).unwrap();

        assert_eq!(store.snapshot("a").structured_symptom_list, vec!["bloating"]);
        assert!(store.snapshot("a").active_nodes.is_empty());
        assert_eq!(store.session_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_persistence_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("sessions.json");

        {
            let store = InMemorySessionStore::with_persistence(&path);
            store.append_turn("s1", ConversationTurn::user("log this")).unwrap();
            store
                .save(
                    "s1",
                    SaveBucket::Journal,
                    SavedItem {
                        timestamp: "t".to_string(),
                        node: None,
                        message: None,
                        content: "cramps day 3".to_string(),
                    },
                )
                .unwrap();
        }

        let reloaded = InMemorySessionStore::with_persistence(&path);
        assert_eq!(reloaded.history("s1")[0].content, "log this");
        assert_eq!(
            reloaded.list_saved("s1", SaveBucket::Journal)[0].content,
            "cramps day 3"
        );
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        std::fs::write(&path, "not json").unwrap();

        let store = InMemorySessionStore::with_persistence(&path);
        assert!(store.session_ids().is_empty());
    }
}
