//! Index splicing shared by the ordered lists in the document (G-code items,
//! timeline lanes, timeline slots).

use crate::action::AddRemoveEdit;

/// Applies `are` to `list`.
///
/// Returns `None` when the index is out of range. Otherwise returns the value
/// that was replaced or removed (`Some(None)` for an insert).
pub fn splice<T: Clone>(list: &mut Vec<T>, are: &AddRemoveEdit<T>) -> Option<Option<T>> {
    match are {
        AddRemoveEdit::Add { key, value } => {
            if *key > list.len() {
                return None;
            }
            list.insert(*key, value.clone());
            Some(None)
        }
        AddRemoveEdit::Edit { key, value } => {
            let slot = list.get_mut(*key)?;
            Some(Some(std::mem::replace(slot, value.clone())))
        }
        AddRemoveEdit::Remove { key } => {
            if *key >= list.len() {
                return None;
            }
            Some(Some(list.remove(*key)))
        }
    }
}

/// Reverses a [`splice`] given the value it returned.
///
/// Returns `false` if the list no longer has the shape the splice left.
pub fn unsplice<T: Clone>(list: &mut Vec<T>, are: &AddRemoveEdit<T>, prev: Option<&T>) -> bool {
    match (are, prev) {
        (AddRemoveEdit::Add { key, .. }, _) if *key < list.len() => {
            list.remove(*key);
            true
        }
        (AddRemoveEdit::Edit { key, .. }, Some(prev)) if *key < list.len() => {
            list[*key] = prev.clone();
            true
        }
        (AddRemoveEdit::Remove { key }, Some(prev)) if *key <= list.len() => {
            list.insert(*key, prev.clone());
            true
        }
        _ => false,
    }
}

/// Moves the item at `from` so it ends up at `to`.
pub fn move_item<T>(list: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= list.len() || to >= list.len() {
        return false;
    }
    let item = list.remove(from);
    list.insert(to, item);
    true
}
