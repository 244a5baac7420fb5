pub mod app_state;
pub mod clock;
pub mod security_config;

pub use app_state::AppState;
pub use clock::{Clock, ManualClock, SystemClock};
pub use security_config::SecurityConfig;
