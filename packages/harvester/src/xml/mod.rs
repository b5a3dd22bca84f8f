//! XML accessors shared by all record parsers.

mod utils;

pub use utils::{
    child_tags, element_children, expect_tag, find_by_path, find_child, find_child_ns,
    find_children, get_attribute, get_tag_name, has_tag, items, node_path, text_or_none,
};
