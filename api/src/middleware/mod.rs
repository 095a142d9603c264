pub mod cors;
pub mod session;

pub use cors::create_cors;
pub use session::{Authenticated, GateMode, OptionalPrincipal, SessionGate};
