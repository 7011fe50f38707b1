//! Admin session storage
//!
//! The `SessionStore` port with an in-memory implementation (default) and a
//! Redis implementation for deployments that need sessions to outlive the process.

mod clock;
mod memory;
mod redis_store;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use memory::InMemorySessionStore;
pub use redis_store::RedisSessionStore;
pub use store::{SessionData, SessionStore};
