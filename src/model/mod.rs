pub mod calendar;
pub mod constraint;
pub mod dataset;
pub mod priority;
pub mod time_index;
pub mod view;

pub use constraint::{ActiveValue, ConstraintSeries, Sample, Transition, TransitionTable};
pub use dataset::{Dataset, SeriesId};
pub use time_index::{TimeIndex, TimeIndexEntry};
pub use view::{AxisScale, DragState, Layout, ViewRange};
