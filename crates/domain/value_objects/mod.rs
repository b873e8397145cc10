pub mod enums;
pub mod payments;
pub mod scalars;
pub mod webhooks;
