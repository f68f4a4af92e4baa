pub mod clock;
pub mod config;
pub mod error;
pub mod types;

pub use clock::{Clock, Cooldown, ManualClock, SystemClock};
pub use config::{PriceTable, SimulationConfig};
