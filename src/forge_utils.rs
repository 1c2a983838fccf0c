pub mod common;
pub mod create;
pub mod verify;

pub use self::common::ContractSpec;
pub use self::create::{ForgeCreate, ForgeOutput};
pub use self::verify::ForgeVerify;
