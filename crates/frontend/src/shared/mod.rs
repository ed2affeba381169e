pub mod api_utils;
pub mod export;
