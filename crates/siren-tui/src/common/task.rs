//! Async task lifecycle bookkeeping.
//!
//! The reducer allocates a `TaskId` when it emits an effect that spawns
//! work; the runtime reports `TaskStarted`/`TaskCompleted` around it. A
//! completion whose id no longer matches the active task is dropped, which
//! is how results of torn-down views are discarded without cancellation.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Detail view load (event, then acknowledgements).
    DetailsLoad,
    /// Next-id refresh probe from the list view.
    Refresh,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in `AppState`, mutated only by the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub details_load: TaskState,
    pub refresh: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::DetailsLoad => &self.details_load,
            TaskKind::Refresh => &self.refresh,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::DetailsLoad => &mut self.details_load,
            TaskKind::Refresh => &mut self.refresh,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.details_load.is_running() || self.refresh.is_running()
    }
}
