//! Scheduling-simulation and solution-ranking core for RCPSP optimizers.
//!
//! Provides the discrete-event serial schedule generator and the solution
//! accumulation structures shared by every solver backend. Solver
//! algorithms (CP, LP, GA, LNS) live elsewhere — they produce candidate
//! solutions and push them through this crate's archives.
//!
//! # Modules
//!
//! - **`model`**: Input domain types — `Project`, `ExecutionMode`,
//!   `Resource`, `Capacity`, `ScheduleSolution`, `PartialSchedule`
//! - **`validation`**: Input integrity checks (duplicate ids, DAG cycles,
//!   resource refs)
//! - **`precedence`**: Transitive successor/ancestor sets per activity
//! - **`profile`**: Time-indexed resource availability under consumption
//! - **`generator`**: Serial SGS with priority rules and partial-schedule
//!   seeding
//! - **`archive`**: Bounded top-K solution archive and Pareto front
//!
//! # References
//!
//! - Kolisch (1996), "Serial and parallel resource-constrained project
//!   scheduling methods revisited"
//! - Kolisch & Hartmann (2006), "Experimental investigation of heuristics
//!   for resource-constrained project scheduling"
//! - Deb (2001), "Multi-Objective Optimization Using Evolutionary Algorithms"

pub mod archive;
pub mod generator;
pub mod model;
pub mod precedence;
pub mod profile;
pub mod validation;

pub use archive::{Fitness, ObjectiveSense, ParetoFront, SolutionArchive, TupleFitness};
pub use generator::{GeneratorError, GreedyChoice, SerialScheduleGenerator};
pub use model::{PartialSchedule, Project, ScheduleSolution};
pub use precedence::{ModelError, PrecedenceIndex};
pub use profile::ResourceProfile;
