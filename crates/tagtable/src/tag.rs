//! Parser for field annotation strings.
//!
//! A tag is a comma separated list. The first segment is the primary value;
//! every following segment is either a flag (`flatten`) or a key/value pair
//! (`prefix=net`).
//!
//! ```rust
//! use tagtable::Tag;
//!
//! let tag = Tag::parse("Resources,flatten,prefix=res");
//! assert_eq!(tag.val, "Resources");
//! assert!(tag.flag("flatten"));
//! assert_eq!(tag.key("prefix"), Some("res"));
//! ```

use std::collections::{BTreeMap, BTreeSet};

/// A parsed annotation: primary value, flags and key/value pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tag {
    /// Text before the first separator.
    pub val: String,
    /// Bare segments after the primary value.
    pub flags: BTreeSet<String>,
    /// `name=value` segments after the primary value.
    pub keys: BTreeMap<String, String>,
}

impl Tag {
    /// Parses a raw tag string.
    ///
    /// Surrounding whitespace is ignored, both for the whole tag and for each
    /// segment. Empty trailing segments (`"Name,"`) are dropped.
    pub fn parse(raw: &str) -> Self {
        let mut tag = Tag::default();
        let mut segments = raw.trim().split(',');

        if let Some(first) = segments.next() {
            tag.val = first.trim().to_string();
        }

        for segment in segments {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            match segment.split_once('=') {
                Some((name, value)) => {
                    tag.keys
                        .insert(name.trim().to_string(), value.trim().to_string());
                }
                None => {
                    tag.flags.insert(segment.to_string());
                }
            }
        }

        tag
    }

    /// Whether the flag is set.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    /// Value of a key/value segment.
    pub fn key(&self, name: &str) -> Option<&str> {
        self.keys.get(name).map(String::as_str)
    }

    /// True when the tag carried nothing at all.
    pub fn is_empty(&self) -> bool {
        self.val.is_empty() && self.flags.is_empty() && self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_value_only() {
        let tag = Tag::parse("Full Name");
        assert_eq!(tag.val, "Full Name");
        assert!(tag.flags.is_empty());
        assert!(tag.keys.is_empty());
    }

    #[test]
    fn empty_tag() {
        let tag = Tag::parse("");
        assert!(tag.is_empty());
        assert_eq!(tag, Tag::default());
    }

    #[test]
    fn flags_and_keys() {
        let tag = Tag::parse("Network, flatten, prefix=net");
        assert_eq!(tag.val, "Network");
        assert!(tag.flag("flatten"));
        assert!(!tag.flag("prefix"));
        assert_eq!(tag.key("prefix"), Some("net"));
        assert_eq!(tag.key("flatten"), None);
    }

    #[test]
    fn empty_primary_with_flag() {
        let tag = Tag::parse(",flatten");
        assert_eq!(tag.val, "");
        assert!(tag.flag("flatten"));
    }

    #[test]
    fn value_keeps_later_equals_signs() {
        let tag = Tag::parse("x,expr=a=b");
        assert_eq!(tag.key("expr"), Some("a=b"));
    }

    #[test]
    fn trailing_separator_ignored() {
        let tag = Tag::parse("Stats,");
        assert_eq!(tag.val, "Stats");
        assert!(tag.flags.is_empty());
    }
}
