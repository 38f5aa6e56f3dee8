pub mod session;
pub mod webhook;
