//! # hello-core
//!
//! Activation manager for the hello module.
//!
//! On activation the manager validates the configured count, allocates that many
//! timestamped records into an ordered registry and reports each step through a
//! [`NoticeSink`]. On deactivation it drains the registry in insertion order,
//! releasing every record exactly once.
//!
//! ### Key Submodules:
//! - `alloc`: record allocators (heap and fixed budget) with allocation statistics
//! - `clock`: monotonic and virtual clocks used to stamp records
//! - `manager`: the activation lifecycle
//! - `notice`: leveled notices and the sinks that receive them
//! - `policy`: classification of the configured count
//! - `registry`: owned, insertion-ordered record storage

pub mod alloc;
pub mod clock;
pub mod error;
pub mod manager;
pub mod notice;
pub mod policy;
pub mod record;
pub mod registry;

pub mod prelude {
    pub use crate::alloc::*;
    pub use crate::clock::*;
    pub use crate::error::*;
    pub use crate::manager::*;
    pub use crate::notice::*;
    pub use crate::policy::*;
    pub use crate::record::*;
}

pub use error::ActivationError;
pub use manager::{ActivationManager, Lifecycle};
pub use notice::{Level, Notice, NoticeSink, TracingSink};
pub use policy::{CountPolicy, DEFAULT_COUNT, MAX_COUNT};
