mod options;
mod point;
mod polygon;
mod region;
mod verdict;

pub use options::*;
pub use point::*;
pub use polygon::*;
pub use region::*;
pub use verdict::*;
