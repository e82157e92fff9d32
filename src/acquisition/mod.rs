//! Location permission and fix acquisition

mod driver;
mod machine;
mod platform;

pub use driver::acquire;
pub use machine::*;
pub use platform::*;
