pub mod aggregate;
pub mod session;
pub mod state;

pub use session::{DetectionSession, SessionConfig};
pub use state::{SessionEvent, SessionPhase};
