pub mod agent;
pub mod category;
pub mod message;
pub mod session;
pub mod turn;

pub use agent::*;
pub use category::*;
pub use message::*;
pub use session::*;
pub use turn::*;
