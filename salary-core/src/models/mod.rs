mod clock_time;
mod pay_configuration;
mod pay_scheme;
mod snapshot;

pub use clock_time::{ClockTime, ClockTimeError};
pub use pay_configuration::PayConfiguration;
pub use pay_scheme::{OvertimePolicy, PayScheme};
pub use snapshot::Snapshot;
