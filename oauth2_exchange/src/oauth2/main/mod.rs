mod core;
mod google;
mod utils;

pub use core::{build_consent_url, extract_authorization_code};

pub(crate) use google::{exchange_code_for_token, fetch_profile};
pub(crate) use utils::get_client;
