pub mod diagnostics;
pub mod document;
pub mod error;
pub mod health;
pub mod messages;
pub mod ready;
pub mod snapshot;
pub mod update;

pub use diagnostics::*;
pub use document::*;
pub use error::*;
pub use health::*;
pub use messages::*;
pub use ready::*;
pub use snapshot::*;
pub use update::*;
