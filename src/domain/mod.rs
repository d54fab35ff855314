pub mod env;
pub mod identity;
pub mod platform;

pub use env::EnvSnapshot;
pub use identity::BinaryIdentity;
pub use platform::{Platform, UnsupportedPlatform};
