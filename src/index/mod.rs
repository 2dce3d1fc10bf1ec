pub mod corpus;
pub mod shared;
pub mod store;
pub mod types;

pub use shared::SharedIndex;
pub use store::TrigramIndex;
pub use types::*;
