pub mod calendar;
pub mod event;
pub mod grid;
pub mod store;

pub use calendar::Calendar;
pub use event::{Event, EventDraft};
pub use store::Store;
