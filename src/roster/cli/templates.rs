//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept in stand-alone
//! `.tmp` files and included here as string constants.
//!
//! The environment runs with `trim_blocks` and `lstrip_blocks`, so a block
//! tag on its own line produces no output at all. A line that *ends* in a
//! block tag (the pager's number row) loses its newline too, which is why it
//! is followed by an empty line in the source.
//!
//! Layout math (column widths, truncation, time-ago) stays in Rust; templates
//! pick style names and arrange lines.

pub const USER_LIST_TEMPLATE: &str = include_str!("templates/user_list.tmp");
pub const PAGER_TEMPLATE: &str = include_str!("templates/pager.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const TEXT_LIST_TEMPLATE: &str = include_str!("templates/text_list.tmp");
pub const PROMPT_TEMPLATE: &str = include_str!("templates/prompt.tmp");

/// Every template, keyed by the name templates use to `include` each other.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("user_list", USER_LIST_TEMPLATE),
    ("pager", PAGER_TEMPLATE),
    ("messages", MESSAGES_TEMPLATE),
    ("text_list", TEXT_LIST_TEMPLATE),
    ("prompt", PROMPT_TEMPLATE),
];
