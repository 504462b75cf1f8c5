pub mod crop;
pub mod summary;
pub mod weather;

pub use crop::*;
pub use summary::*;
pub use weather::*;
