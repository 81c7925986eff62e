//! Layout constants shared by providers and hosts

/// Width of the hidden value column (index 0)
pub const HIDDEN_COLUMN_WIDTH: i32 = 0;

/// Column width reply asking the host to use its own default
pub const HOST_DEFAULT_WIDTH: i32 = -1;

/// Indent of the text portion of a combo box, in twips
pub const COMBO_LEFT_MARGIN: i32 = 57;
