pub mod event;
pub mod location;
pub mod weather;

pub use event::Event;
pub use location::{Location, LocationRef};
pub use weather::Weather;
