pub mod help_request;
pub mod menu_item_review;
pub mod ucsb_dining_commons;
pub mod ucsb_dining_commons_menu_item;
pub mod ucsb_organization;

pub use help_request::HelpRequest;
pub use menu_item_review::MenuItemReview;
pub use ucsb_dining_commons::UCSBDiningCommons;
pub use ucsb_dining_commons_menu_item::UCSBDiningCommonsMenuItem;
pub use ucsb_organization::UCSBOrganization;
