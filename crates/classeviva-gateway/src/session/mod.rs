pub mod gate;
pub mod store;

pub use gate::{authorize, Authenticated, SESSION_COOKIE};
pub use store::{SessionError, SessionStore};
