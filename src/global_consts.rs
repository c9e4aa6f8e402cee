/// How many suffixes [`OsFs`](crate::OsFs) tries before giving up on a unique name.
pub const NUM_RETRY: usize = 10_000;

/// The last occurrence of this character in a prefix is replaced by the random suffix.
pub(crate) const PATTERN_WILDCARD: char = '*';
