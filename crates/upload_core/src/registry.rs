use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use sync_logging::{sync_debug, sync_trace};

use crate::TaskId;

/// Local knowledge of a transfer handle. Only exists while the engine holds
/// the task, so `running` always implies `exists`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Liveness {
    exists: bool,
    running: bool,
}

impl Liveness {
    pub fn running() -> Self {
        Self {
            exists: true,
            running: true,
        }
    }

    pub fn paused() -> Self {
        Self {
            exists: true,
            running: false,
        }
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Read access to local liveness, joined with snapshot rows at render time.
pub trait LivenessLookup {
    fn liveness(&self, id: TaskId) -> Option<Liveness>;
}

/// Control surface the transfer engine exposes to the synchronization core.
pub trait TransferControl: LivenessLookup + Send + Sync {
    /// Pause if running, resume if paused, nothing if the task is not held.
    fn request_toggle(&self, id: TaskId);

    /// Bumped on every liveness mutation; lets front ends notice changes.
    fn revision(&self) -> u64;
}

impl LivenessLookup for HashMap<TaskId, Liveness> {
    fn liveness(&self, id: TaskId) -> Option<Liveness> {
        self.get(&id).copied()
    }
}

type ToggleHandler = Box<dyn Fn(TaskId, bool) + Send + Sync>;

/// Per-task liveness written by the transfer engine's lifecycle hooks.
///
/// The registry is not persisted; a fresh process starts empty.
#[derive(Default)]
pub struct TaskRegistry {
    running: RwLock<HashMap<TaskId, bool>>,
    revision: AtomicU64,
    on_toggle: RwLock<Option<ToggleHandler>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the engine callback invoked with the new running flag after
    /// each successful toggle.
    pub fn set_toggle_handler(&self, handler: impl Fn(TaskId, bool) + Send + Sync + 'static) {
        *self
            .on_toggle
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Box::new(handler));
    }

    pub fn task_started(&self, id: TaskId) {
        self.write(id, Some(true));
    }

    pub fn task_paused(&self, id: TaskId) {
        self.update_existing(id, false);
    }

    pub fn task_resumed(&self, id: TaskId) {
        self.update_existing(id, true);
    }

    /// Completion, cancellation or any other reason the engine drops the handle.
    pub fn task_discarded(&self, id: TaskId) {
        self.write(id, None);
    }

    pub fn len(&self) -> usize {
        self.running
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn update_existing(&self, id: TaskId, running: bool) {
        let changed = {
            let mut entries = self.running.write().unwrap_or_else(PoisonError::into_inner);
            match entries.get_mut(&id) {
                Some(flag) => {
                    *flag = running;
                    true
                }
                None => false,
            }
        };
        if changed {
            self.revision.fetch_add(1, Ordering::AcqRel);
        }
    }

    fn write(&self, id: TaskId, running: Option<bool>) {
        {
            let mut entries = self.running.write().unwrap_or_else(PoisonError::into_inner);
            match running {
                Some(flag) => {
                    entries.insert(id, flag);
                }
                None => {
                    entries.remove(&id);
                }
            }
        }
        self.revision.fetch_add(1, Ordering::AcqRel);
    }
}

impl std::fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRegistry")
            .field("tasks", &self.len())
            .field("revision", &self.revision())
            .finish()
    }
}

impl LivenessLookup for TaskRegistry {
    fn liveness(&self, id: TaskId) -> Option<Liveness> {
        let entries = self.running.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&id).map(|&running| {
            if running {
                Liveness::running()
            } else {
                Liveness::paused()
            }
        })
    }
}

impl TransferControl for TaskRegistry {
    fn request_toggle(&self, id: TaskId) {
        let toggled = {
            let mut entries = self.running.write().unwrap_or_else(PoisonError::into_inner);
            entries.get_mut(&id).map(|flag| {
                *flag = !*flag;
                *flag
            })
        };
        let Some(running) = toggled else {
            sync_trace!("toggle ignored, task {} not held locally", id);
            return;
        };
        self.revision.fetch_add(1, Ordering::AcqRel);
        sync_debug!("task {} toggled, running={}", id, running);
        if let Some(handler) = self
            .on_toggle
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            handler(id, running);
        }
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn lifecycle_hooks_drive_liveness() {
        let registry = TaskRegistry::new();
        assert_eq!(registry.liveness(1), None);

        registry.task_started(1);
        assert_eq!(registry.liveness(1), Some(Liveness::running()));
        registry.task_paused(1);
        assert_eq!(registry.liveness(1), Some(Liveness::paused()));
        registry.task_resumed(1);
        assert_eq!(registry.liveness(1), Some(Liveness::running()));
        registry.task_discarded(1);
        assert_eq!(registry.liveness(1), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn pause_of_unknown_task_does_not_create_entry() {
        let registry = TaskRegistry::new();
        registry.task_paused(9);
        assert_eq!(registry.liveness(9), None);
        assert_eq!(registry.revision(), 0);
    }

    #[test]
    fn toggle_flips_running_and_notifies_engine() {
        let registry = TaskRegistry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        registry.set_toggle_handler(move |id, running| sink.lock().unwrap().push((id, running)));

        registry.task_started(4);
        registry.request_toggle(4);
        assert_eq!(registry.liveness(4), Some(Liveness::paused()));
        registry.request_toggle(4);
        assert_eq!(registry.liveness(4), Some(Liveness::running()));

        assert_eq!(*seen.lock().unwrap(), vec![(4, false), (4, true)]);
    }

    #[test]
    fn toggle_of_absent_task_is_noop() {
        let registry = TaskRegistry::new();
        let calls = Arc::new(Mutex::new(0));
        let sink = calls.clone();
        registry.set_toggle_handler(move |_, _| *sink.lock().unwrap() += 1);

        let before = registry.revision();
        registry.request_toggle(42);

        assert_eq!(registry.liveness(42), None);
        assert_eq!(registry.revision(), before);
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn revision_moves_on_each_mutation() {
        let registry = TaskRegistry::new();
        registry.task_started(1);
        registry.task_paused(1);
        registry.task_discarded(1);
        assert_eq!(registry.revision(), 3);
    }

    #[test]
    fn running_implies_exists() {
        for liveness in [Liveness::running(), Liveness::paused()] {
            assert!(!liveness.is_running() || liveness.exists());
        }
    }
}
