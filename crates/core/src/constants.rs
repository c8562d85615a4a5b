/// Bounded mailbox size for the favorite store worker
pub const DEFAULT_MAILBOX_CAPACITY: usize = 1024;

/// Detail button title when the symbol is not a favorite
pub const ADD_TO_FAVORITE_TITLE: &str = "Add to Favorite";

/// Detail button title when the symbol is a favorite
pub const REMOVE_FROM_FAVORITE_TITLE: &str = "Remove from Favorite";
