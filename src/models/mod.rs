// Domain models

mod container;
mod snapshot;
mod view;

pub use container::{ContainerDetails, ContainerSummary};
pub use snapshot::{CpuCounters, MemoryGauge, NetworkCounters, RawSnapshot};
pub use view::{ContainerView, DashboardSnapshot, DerivedView, NetworkDirection};
