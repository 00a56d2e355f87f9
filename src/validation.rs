//! Input validation for project instances.
//!
//! Checks structural integrity of a [`Project`] before simulation. Detects:
//! - Duplicate activity ids
//! - Missing `source`/`sink` sentinels
//! - Activities without execution modes
//! - Negative durations, demands, or horizon
//! - Demand on resources the project never declares
//! - Successor references to undeclared activities
//! - Circular precedence dependencies (DAG validation)
//! - Empty capacity calendars
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::model::{ActivityId, Capacity, Project};
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two activities share the same id.
    DuplicateId,
    /// `source` or `sink` has no activity entry.
    MissingSentinel,
    /// An activity has no execution modes.
    MissingModes,
    /// A duration, demand, or the horizon is negative.
    NegativeValue,
    /// A mode demands a resource that doesn't exist.
    InvalidResourceReference,
    /// A successor list references an activity that doesn't exist.
    InvalidSuccessor,
    /// Precedence graph contains a cycle.
    CyclicDependency,
    /// A calendar capacity has no entries.
    EmptyCalendar,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a project instance.
///
/// Collects every detected issue instead of stopping at the first.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_project(project: &Project) -> ValidationResult {
    let mut errors = Vec::new();

    // Activity ids and sentinels
    let mut activity_ids = HashSet::new();
    for &id in &project.activities {
        if !activity_ids.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate activity id: {id}"),
            ));
        }
    }
    for (label, sentinel) in [("source", project.source), ("sink", project.sink)] {
        if !activity_ids.contains(&sentinel) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingSentinel,
                format!("{label} activity {sentinel} is not in the activity list"),
            ));
        }
    }

    if project.horizon < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeValue,
            format!("Horizon is negative: {}", project.horizon),
        ));
    }

    // Resources
    let mut resource_names = HashSet::new();
    for resource in &project.resources {
        resource_names.insert(resource.name.as_str());
        if let Capacity::Calendar(values) = &resource.capacity {
            if values.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyCalendar,
                    format!("Resource '{}' has an empty calendar", resource.name),
                ));
            }
        }
    }

    // Modes
    for &id in &project.activities {
        let modes = project.modes_of(id);
        if modes.map(|m| m.is_empty()).unwrap_or(true) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingModes,
                format!("Activity {id} has no execution modes"),
            ));
            continue;
        }
        for (mode_id, mode) in modes.into_iter().flatten() {
            if mode.duration < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeValue,
                    format!("Activity {id} mode {mode_id} has negative duration"),
                ));
            }
            for (resource, &amount) in &mode.demand {
                if amount < 0 {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::NegativeValue,
                        format!("Activity {id} mode {mode_id} demands {amount} of '{resource}'"),
                    ));
                }
                if !resource_names.contains(resource.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidResourceReference,
                        format!(
                            "Activity {id} mode {mode_id} references unknown resource '{resource}'"
                        ),
                    ));
                }
            }
        }
    }

    // Successor references
    for (&from, succs) in &project.successors {
        if !activity_ids.contains(&from) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSuccessor,
                format!("Successor list belongs to unknown activity {from}"),
            ));
        }
        for &to in succs {
            if !activity_ids.contains(&to) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidSuccessor,
                    format!("Activity {from} references unknown successor {to}"),
                ));
            }
        }
    }

    // Cycle detection (DFS-based)
    if let Some(cycle_err) = detect_cycles(project) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the precedence graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists.
fn detect_cycles(project: &Project) -> Option<ValidationError> {
    let adj: HashMap<ActivityId, &[ActivityId]> = project
        .activities
        .iter()
        .map(|&id| (id, project.successors_of(id)))
        .collect();

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for &node in &project.activities {
        if !visited.contains(&node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving activity {node}"),
            ));
        }
    }

    None
}

fn has_cycle_dfs(
    node: ActivityId,
    adj: &HashMap<ActivityId, &[ActivityId]>,
    visited: &mut HashSet<ActivityId>,
    in_stack: &mut HashSet<ActivityId>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(&node) {
        for &next in *neighbors {
            if in_stack.contains(&next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(&next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(&node);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExecutionMode, Resource};

    fn sample_project() -> Project {
        Project::new(0, 3)
            .with_activity(0, ExecutionMode::new(0))
            .with_activity(1, ExecutionMode::new(2).with_demand("R1", 1))
            .with_activity(2, ExecutionMode::new(3).with_demand("R1", 1))
            .with_activity(3, ExecutionMode::new(0))
            .with_successors(0, [1, 2])
            .with_successor(1, 3)
            .with_successor(2, 3)
            .with_resource(Resource::renewable("R1", 2))
            .with_horizon(10)
    }

    #[test]
    fn test_valid_project() {
        assert!(validate_project(&sample_project()).is_ok());
    }

    #[test]
    fn test_duplicate_activity_id() {
        let project = sample_project().with_activity(1, ExecutionMode::new(1));
        let errors = validate_project(&project).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_missing_sentinel() {
        let mut project = sample_project();
        project.sink = 99;
        let errors = validate_project(&project).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MissingSentinel));
    }

    #[test]
    fn test_missing_modes() {
        let mut project = sample_project();
        project.activities.push(7);
        let errors = validate_project(&project).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MissingModes));
    }

    #[test]
    fn test_negative_duration() {
        let project = sample_project().with_mode(1, 2, ExecutionMode::new(-1));
        let errors = validate_project(&project).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeValue));
    }

    #[test]
    fn test_negative_demand() {
        let project =
            sample_project().with_mode(1, 2, ExecutionMode::new(1).with_demand("R1", -2));
        let errors = validate_project(&project).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeValue));
    }

    #[test]
    fn test_invalid_resource_reference() {
        let project =
            sample_project().with_mode(2, 2, ExecutionMode::new(1).with_demand("NONEXISTENT", 1));
        let errors = validate_project(&project).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidResourceReference));
    }

    #[test]
    fn test_invalid_successor() {
        let project = sample_project().with_successor(1, 42);
        let errors = validate_project(&project).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidSuccessor));
    }

    #[test]
    fn test_cyclic_dependency() {
        // 1 → 2 → 1 (cycle)
        let project = sample_project().with_successor(1, 2).with_successor(2, 1);
        let errors = validate_project(&project).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_empty_calendar() {
        let project =
            sample_project().with_resource(Resource::renewable("R2", 0).with_calendar(vec![]));
        let errors = validate_project(&project).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyCalendar));
    }

    #[test]
    fn test_multiple_errors() {
        let mut project = sample_project().with_successor(1, 42);
        project.activities.push(7);
        let errors = validate_project(&project).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
