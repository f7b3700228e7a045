#![allow(non_snake_case)]

pub mod enquiries;
pub mod error;
pub mod fleet;
pub mod inventory;
pub mod parties;
pub mod seed;
pub mod store;
pub mod users;
pub mod vouchers;

pub use error::{StoreError, StoreResult};
pub use store::{AuthSettings, Store};
