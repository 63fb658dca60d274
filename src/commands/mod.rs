mod audit;
mod similar;

pub use audit::run_audit_command;
pub use similar::run_similar;
