//! Project scheduling domain models.
//!
//! Read-only input types the simulation core consumes: activities with
//! execution modes, renewable/non-renewable resources with constant or
//! calendar capacity, the project instance itself, and the solution types
//! the generator produces.
//!
//! # Domain Mapping
//!
//! | rcpsp-core | PSPLIB | Multi-mode RCPSP |
//! |------------|--------|------------------|
//! | Activity | Job | Job |
//! | ExecutionMode | (single mode) | Mode |
//! | Resource | R/N resource | R/N resource |
//! | ScheduleSolution | Schedule | Schedule + mode vector |

mod activity;
mod project;
mod resource;
mod solution;

pub use activity::{ActivityId, ExecutionMode, ModeAssignment, ModeId, DEFAULT_MODE};
pub use project::Project;
pub use resource::{Capacity, Resource, ResourceKind};
pub use solution::{PartialSchedule, ScheduleSolution, TimeWindow};
