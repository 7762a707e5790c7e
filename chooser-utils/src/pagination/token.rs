//! Action tag encoding and exact-match decoding.
//!
//! Button custom ids carry `<namespace>:<kind>[:<payload>]`. Choice buttons
//! carry the option's index rather than its text, so option values never have
//! to be unique or free of routing keywords.

use chooser_core::TagSet;

/// Decoded action carried by a chooser button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionTag {
    /// Pick the option at this absolute index.
    Choose(usize),
    Cancel,
    /// Go back to this offset.
    Prev(usize),
    /// Go forward to this offset.
    Next(usize),
    /// Page-indicator tap: start typed page entry.
    PageEntry,
}

impl ActionTag {
    /// Build the custom id for this action.
    pub fn encode(self, tags: &TagSet) -> String {
        let namespace = &tags.namespace;
        match self {
            Self::Choose(index) => format!("{namespace}:{}:{index}", tags.choose),
            Self::Cancel => format!("{namespace}:{}", tags.cancel),
            Self::Prev(offset) => format!("{namespace}:{}:{offset}", tags.prev),
            Self::Next(offset) => format!("{namespace}:{}:{offset}", tags.next),
            Self::PageEntry => format!("{namespace}:{}", tags.page),
        }
    }
}

/// Parse a custom id into an action.
///
/// Returns `None` for anything that is not exactly one of this chooser's tags.
pub fn parse_action_tag(custom_id: &str, tags: &TagSet) -> Option<ActionTag> {
    let mut parts = custom_id.split(':');

    if parts.next()? != tags.namespace {
        return None;
    }

    let kind = parts.next()?;
    let payload = parts.next();

    if parts.next().is_some() {
        return None;
    }

    let number = || payload?.parse::<usize>().ok();

    if kind == tags.choose {
        number().map(ActionTag::Choose)
    } else if kind == tags.cancel {
        payload.is_none().then_some(ActionTag::Cancel)
    } else if kind == tags.prev {
        number().map(ActionTag::Prev)
    } else if kind == tags.next {
        number().map(ActionTag::Next)
    } else if kind == tags.page {
        payload.is_none().then_some(ActionTag::PageEntry)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_structured_ids() {
        let tags = TagSet::default();
        assert_eq!(ActionTag::Choose(7).encode(&tags), "chs:choose:7");
        assert_eq!(ActionTag::Cancel.encode(&tags), "chs:cancel");
        assert_eq!(ActionTag::Prev(0).encode(&tags), "chs:prev:0");
        assert_eq!(ActionTag::Next(12).encode(&tags), "chs:next:12");
        assert_eq!(ActionTag::PageEntry.encode(&tags), "chs:page");
    }

    #[test]
    fn decodes_every_kind() {
        let tags = TagSet::default();
        for tag in [
            ActionTag::Choose(3),
            ActionTag::Cancel,
            ActionTag::Prev(4),
            ActionTag::Next(8),
            ActionTag::PageEntry,
        ] {
            assert_eq!(parse_action_tag(&tag.encode(&tags), &tags), Some(tag));
        }
    }

    #[test]
    fn rejects_foreign_and_malformed_ids() {
        let tags = TagSet::default();
        assert_eq!(parse_action_tag("pg:help:next:2:3:1:9", &tags), None);
        assert_eq!(parse_action_tag("chs", &tags), None);
        assert_eq!(parse_action_tag("chs:choose", &tags), None);
        assert_eq!(parse_action_tag("chs:choose:x", &tags), None);
        assert_eq!(parse_action_tag("chs:next:-1", &tags), None);
        assert_eq!(parse_action_tag("chs:cancel:1", &tags), None);
        assert_eq!(parse_action_tag("chs:prev:1:2", &tags), None);
        assert_eq!(parse_action_tag("chs:unknown:1", &tags), None);
    }

    #[test]
    fn matching_is_exact_not_substring() {
        let tags = TagSet {
            prev: "p".to_owned(),
            page: "pp".to_owned(),
            ..TagSet::default()
        };
        assert_eq!(parse_action_tag("chs:pp", &tags), Some(ActionTag::PageEntry));
        assert_eq!(parse_action_tag("chs:p:2", &tags), Some(ActionTag::Prev(2)));
        assert_eq!(parse_action_tag("xchs:p:2", &tags), None);
    }
}
