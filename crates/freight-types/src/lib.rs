#![allow(non_snake_case)]

#[macro_use]
mod macros;

pub mod api;
pub mod branding;
pub mod display;
pub mod enquiry;
pub mod fleet;
pub mod inventory;
pub mod parties;
pub mod session;
pub mod users;
pub mod validation;
pub mod vouchers;

pub use api::*;
pub use branding::Branding;
pub use enquiry::*;
pub use fleet::*;
pub use inventory::*;
pub use parties::*;
pub use session::{AuthSession, SessionUser};
pub use users::*;
pub use validation::{FieldErrors, UnknownVariant};
pub use vouchers::*;
