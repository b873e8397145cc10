pub mod webhook_signature;
