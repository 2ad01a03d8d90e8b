pub mod access_log;
pub mod auth_gate;
pub mod cors;
pub mod request_trace;

pub use access_log::AccessLog;
pub use auth_gate::{AuthGate, GateDecision, GatePolicy, RejectReason};
pub use cors::cors_middleware;
pub use request_trace::RequestTrace;
