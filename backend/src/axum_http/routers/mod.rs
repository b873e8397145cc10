pub mod docs;
pub mod payments;
pub mod simulate;
pub mod webhooks;
