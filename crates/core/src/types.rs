/// Natural key of a set record: the user-assigned catalog article number.
pub type SetKey = String;

/// Number of parts in a set. Stored as SQLite `INTEGER`.
pub type PartCount = i64;
