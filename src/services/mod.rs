pub mod points;
pub mod reply;
pub mod webhook;
