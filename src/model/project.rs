//! Project model: the read-only problem instance the core consumes.
//!
//! A project bundles the activity list, the per-activity mode table, the
//! immediate-successor lists of the precedence graph, the resource table,
//! the `source`/`sink` sentinels, and the planning horizon. Parsers and
//! solver frontends own construction; the simulation core only reads it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{ActivityId, ExecutionMode, ModeAssignment, ModeId, Resource};

/// A resource-constrained project scheduling instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// All activities, in instance order (sentinels included).
    pub activities: Vec<ActivityId>,
    /// Execution modes per activity, keyed by mode id.
    pub modes: HashMap<ActivityId, BTreeMap<ModeId, ExecutionMode>>,
    /// Immediate successors per activity. Activities without successors may
    /// be absent.
    pub successors: HashMap<ActivityId, Vec<ActivityId>>,
    /// Resource table.
    pub resources: Vec<Resource>,
    /// Sentinel preceding all work (zero duration, zero demand).
    pub source: ActivityId,
    /// Sentinel following all work (zero duration, zero demand).
    pub sink: ActivityId,
    /// Planning horizon in time units; capacity vectors are materialized up
    /// to this length.
    pub horizon: i64,
}

impl Project {
    /// Creates an empty project with the given sentinels.
    ///
    /// The sentinels themselves still need [`with_activity`] entries (zero
    /// duration, no demand) like every other activity.
    ///
    /// [`with_activity`]: Project::with_activity
    pub fn new(source: ActivityId, sink: ActivityId) -> Self {
        Self {
            activities: Vec::new(),
            modes: HashMap::new(),
            successors: HashMap::new(),
            resources: Vec::new(),
            source,
            sink,
            horizon: 0,
        }
    }

    /// Adds an activity with a single mode (mode id 1).
    pub fn with_activity(mut self, id: ActivityId, mode: ExecutionMode) -> Self {
        self.activities.push(id);
        self.modes.entry(id).or_default().insert(1, mode);
        self
    }

    /// Adds an additional mode to an already-registered activity.
    pub fn with_mode(mut self, id: ActivityId, mode_id: ModeId, mode: ExecutionMode) -> Self {
        self.modes.entry(id).or_default().insert(mode_id, mode);
        self
    }

    /// Adds one precedence edge `from → to`.
    pub fn with_successor(mut self, from: ActivityId, to: ActivityId) -> Self {
        self.successors.entry(from).or_default().push(to);
        self
    }

    /// Adds several precedence edges out of `from`.
    pub fn with_successors(
        mut self,
        from: ActivityId,
        to: impl IntoIterator<Item = ActivityId>,
    ) -> Self {
        self.successors.entry(from).or_default().extend(to);
        self
    }

    /// Adds a resource.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Sets the planning horizon.
    pub fn with_horizon(mut self, horizon: i64) -> Self {
        self.horizon = horizon;
        self
    }

    /// Number of activities, sentinels included.
    #[inline]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Whether the project has no activities.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Whether `id` is the source or sink sentinel.
    #[inline]
    pub fn is_sentinel(&self, id: ActivityId) -> bool {
        id == self.source || id == self.sink
    }

    /// Activities excluding the sentinels, in instance order.
    pub fn non_dummy_activities(&self) -> impl Iterator<Item = ActivityId> + '_ {
        self.activities
            .iter()
            .copied()
            .filter(move |&id| !self.is_sentinel(id))
    }

    /// The mode table of one activity.
    pub fn modes_of(&self, id: ActivityId) -> Option<&BTreeMap<ModeId, ExecutionMode>> {
        self.modes.get(&id)
    }

    /// A specific execution mode.
    pub fn mode(&self, id: ActivityId, mode: ModeId) -> Option<&ExecutionMode> {
        self.modes.get(&id).and_then(|m| m.get(&mode))
    }

    /// Duration of `id` under `mode`; zero when the mode is unknown
    /// (validation rejects such projects up front).
    pub fn duration(&self, id: ActivityId, mode: ModeId) -> i64 {
        self.mode(id, mode).map(|m| m.duration).unwrap_or(0)
    }

    /// Immediate successors of `id` (empty slice when none are recorded).
    pub fn successors_of(&self, id: ActivityId) -> &[ActivityId] {
        self.successors.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Looks up a resource by name.
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Mode assignment selecting each activity's lowest-numbered mode.
    ///
    /// This is the single-mode default; multi-mode instances get their
    /// assignment from an external mode-selection solver.
    pub fn default_modes(&self) -> ModeAssignment {
        let mut assignment = ModeAssignment::new();
        for (&id, modes) in &self.modes {
            if let Some((&first, _)) = modes.iter().next() {
                assignment.set(id, first);
            }
        }
        assignment
    }
}
