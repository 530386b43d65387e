//! Module for importers for https://admin.starwarsunlimited.com/api/ resources

mod card_list;
pub use card_list::*;

mod api_client;
pub use api_client::*;
