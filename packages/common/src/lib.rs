pub mod clock;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
