//! Presentation boundary: filter/sort pipeline and view-models.
//!
//! Rendering is synchronous, pure, and reentrant; nothing here mutates
//! shared state, so any trigger (keystroke, filter change, timer tick) can
//! re-render without coordination.

pub mod filter;
pub mod model;

pub use filter::{apply, BookmakerSelection, FilterCriteria, LeagueSelection, SortMode};
pub use model::{build_views, BookmakerRow, FixtureView};
