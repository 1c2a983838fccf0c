pub mod announce;
pub mod await_confirmations;
pub mod deploy_contract;
pub mod persist_record;
pub mod summary;
pub mod verify_source;
