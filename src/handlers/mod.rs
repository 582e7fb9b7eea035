mod dashboard;
mod health;
mod logs;

pub use dashboard::*;
pub use health::*;
pub use logs::*;
