pub mod posting;
pub mod skill;
pub mod report;

pub use posting::*;
pub use skill::*;
pub use report::*;
