pub mod aurora;
pub mod badge;
pub mod contact_form;
pub mod footer;
pub mod hero;
pub mod logo;
pub mod nav;
pub mod partners;
pub mod process_stepper;
pub mod reveal;
pub mod section_wrapper;
pub mod service_card;
pub mod services;
pub mod skeleton;
pub mod slide_over;
pub mod split_text;
pub mod story_scroll;
pub mod toast;
pub mod tooltip;
