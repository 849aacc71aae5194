pub mod money;
pub mod month;
pub mod time_utils;
