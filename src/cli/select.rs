//! Incrementally filtered tag selection

use crate::cli::prompt::prompt_error;
use crate::Result;
use inquire::Select;

/// Rows shown by the selector at once
const PAGE_ROWS: usize = 15;

fn squash(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case-insensitive substring match, ignoring whitespace on both sides
pub fn matches(query: &str, tag: &str) -> bool {
    squash(tag).contains(&squash(query))
}

/// Tags matching `query`, in their original order
pub fn filter_tags<'a>(tags: &'a [String], query: &str) -> Vec<&'a str> {
    tags.iter()
        .map(String::as_str)
        .filter(|tag| matches(query, tag))
        .collect()
}

/// Let the user pick one of `tags`, narrowing the list as they type
pub fn select_tag(tags: &[String]) -> Result<String> {
    let filter = |query: &str, _tag: &String, value: &str, _index: usize| matches(query, value);

    Select::new("Select Tag", tags.to_vec())
        .with_page_size(PAGE_ROWS)
        .with_filter(&filter)
        .prompt()
        .map_err(prompt_error)
}
