//! Tag grouping
//!
//! Buckets entries by primary tag. Group order is the order in which each
//! primary tag is first seen; entry order inside a group follows the input.

use indexmap::IndexMap;

use crate::models::SiteEntry;

/// Name of the single group produced when not grouping by tag
pub const ALL_GROUP: &str = "All";

/// Ordered groups of borrowed entries
pub type Groups<'a> = IndexMap<String, Vec<&'a SiteEntry>>;

/// Partition entries into named groups
///
/// With `by_tag` unset, everything lands in [`ALL_GROUP`]. With it set,
/// entries are keyed by their first tag and untagged entries are left out.
pub fn group<'a, I>(entries: I, by_tag: bool) -> Groups<'a>
where
    I: IntoIterator<Item = &'a SiteEntry>,
{
    let mut groups = Groups::new();

    if !by_tag {
        groups.insert(ALL_GROUP.to_string(), entries.into_iter().collect());
        return groups;
    }

    for entry in entries {
        if let Some(tag) = entry.primary_tag() {
            // get_mut first so existing keys don't allocate
            match groups.get_mut(tag) {
                Some(bucket) => bucket.push(entry),
                None => {
                    groups.insert(tag.to_string(), vec![entry]);
                }
            }
        }
    }

    groups
}
