mod check;
mod location;

pub use check::cmd_check;
pub use location::cmd_location;
