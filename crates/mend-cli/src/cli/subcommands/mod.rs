mod audit;
mod fix;

pub use audit::AuditCommands;
pub use fix::FixCommands;
