pub mod delay;
pub mod session;
pub mod webhook;
