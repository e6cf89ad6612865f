pub mod constants;
pub mod events;
