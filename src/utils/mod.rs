pub mod blocking;
pub mod crypto;
pub mod time;
