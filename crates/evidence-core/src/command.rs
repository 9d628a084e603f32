//! Command abstractions.
//!
//! Every user intent that reaches the game controller (begin, register,
//! choose, toggle shadow, restart) is modelled as a command.

use uuid::Uuid;

/// Trait that all commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted type name for this command, used in logs.
    fn command_type(&self) -> &'static str;

    /// Correlation ID tying the command to the events and log lines it causes.
    fn correlation_id(&self) -> Uuid;
}
