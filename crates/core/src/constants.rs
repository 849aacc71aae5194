/// Number of expenses returned by the recent-activity listing when no limit is given
pub const DEFAULT_RECENT_EXPENSES: i64 = 10;

/// Upper bound for the recent-activity listing
pub const MAX_RECENT_EXPENSES: i64 = 100;

/// Minimum accepted password length at signup
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Largest accepted category limit or expense amount
pub const MAX_MONEY_AMOUNT: i64 = 1_000_000_000_000;
