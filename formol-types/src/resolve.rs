//! Reading and writing item values by [`FieldPath`].
//!
//! Both functions are total: a missing or wrong-shaped container reads as
//! `None`, and writing through a scalar (or through a list with a key
//! segment) replaces it with a fresh container of the right shape.
//!
//! A write that would grow a list by more than [`MAX_LIST_GROWTH`] slots is
//! ignored and returns the item unchanged.

use std::sync::Arc;

use crate::{FieldPath, ItemValue, Segment};

/// Most `Null` holes a single write may add to a list.
pub const MAX_LIST_GROWTH: usize = 4096;

/// Read the value at `path`, or `None` if any step is missing.
///
/// The empty path returns `root` itself. A numeric segment on a map reads
/// the key of the same spelling.
pub fn get<'a>(root: &'a ItemValue, path: &FieldPath) -> Option<&'a ItemValue> {
    let mut node = root;
    for raw in path.segments() {
        node = match node {
            ItemValue::Map(map) => map.get(raw)?,
            ItemValue::List(items) => match Segment::parse(raw) {
                Segment::Index(index) => items.get(index)?,
                Segment::Key(_) => return None,
            },
            _ => return None,
        };
    }
    Some(node)
}

/// Return a copy of `root` with `value` written at `path`.
///
/// Only the containers along `path` are copied; every other subtree is
/// shared with `root`, which is left untouched. Missing intermediate nodes
/// are created as a list when the following segment is numeric and as a
/// map otherwise. Holes in a list are filled with [`ItemValue::Null`].
/// An index more than [`MAX_LIST_GROWTH`] past the end of its list leaves
/// `root` as it is.
pub fn set(root: &ItemValue, path: &FieldPath, value: ItemValue) -> ItemValue {
    let segments: Vec<Segment<'_>> = path.parsed().collect();
    if !within_reach(root, &segments) {
        return root.clone();
    }
    write(root.clone(), &segments, value)
}

fn write(node: ItemValue, segments: &[Segment<'_>], value: ItemValue) -> ItemValue {
    let Some((&head, rest)) = segments.split_first() else {
        return value;
    };

    match (node, head) {
        (ItemValue::Map(mut map), segment) => {
            let entries = Arc::make_mut(&mut map);
            let key = segment.as_key().into_owned();
            let child = entries.remove(&key).unwrap_or_default();
            entries.insert(key, write(child, rest, value));
            ItemValue::Map(map)
        }
        (ItemValue::List(mut items), Segment::Index(index)) => {
            let entries = Arc::make_mut(&mut items);
            if entries.len() <= index {
                entries.resize(index + 1, ItemValue::Null);
            }
            let child = std::mem::take(&mut entries[index]);
            entries[index] = write(child, rest, value);
            ItemValue::List(items)
        }
        (_, Segment::Index(_)) => write(ItemValue::empty_list(), segments, value),
        (_, Segment::Key(_)) => write(ItemValue::empty_map(), segments, value),
    }
}

/// Whether no list along `segments` would grow past [`MAX_LIST_GROWTH`].
fn within_reach(root: &ItemValue, segments: &[Segment<'_>]) -> bool {
    let mut node = Some(root);
    for segment in segments {
        let current = node.take();
        match (current, segment) {
            (Some(ItemValue::Map(map)), segment) => {
                node = map.get(segment.as_key().as_ref());
            }
            (current, Segment::Index(index)) => {
                let items = current.and_then(ItemValue::as_list).unwrap_or_default();
                if index.saturating_sub(items.len()) > MAX_LIST_GROWTH {
                    return false;
                }
                node = items.get(*index);
            }
            (_, Segment::Key(_)) => {}
        }
    }
    true
}
