pub mod change_password;
pub mod driver_details;
pub mod fleet;
pub mod inventory;
pub mod item_details;
pub mod landing;
pub mod login;
pub mod pricing_override_form;
pub mod printable_voucher;
pub mod users;
pub mod vehicle_details;
pub mod voucher_details;
pub mod voucher_form;
pub mod vouchers;
