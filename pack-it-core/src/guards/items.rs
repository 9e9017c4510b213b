//! Duplicate-item policy for "to buy" and "to pack".

use crate::models::{normalize_name, ListType, PackingListData};

use super::GuardError;

/// Where a name would land relative to what's already in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemCheck {
    /// Not present in either sub-list
    New,
    /// Already present in the target sub-list
    Duplicate,
    /// Present in the other sub-list; the caller may offer a move
    ExistsInOther { list: ListType, item_id: String },
}

/// Checks a new item name against the target sub-list and its counterpart.
///
/// Comparison is trimmed and case-insensitive. Suggestions are never checked.
pub fn check_new_item(
    list: &PackingListData,
    target: ListType,
    name: &str,
) -> Result<ItemCheck, GuardError> {
    let wanted = normalize_name(name);
    if wanted.is_empty() {
        return Err(GuardError::EmptyItemName);
    }

    let Some(other) = target.counterpart() else {
        return Ok(ItemCheck::New);
    };

    if list
        .items(target)
        .iter()
        .any(|i| i.normalized_name() == wanted)
    {
        return Ok(ItemCheck::Duplicate);
    }

    match list
        .items(other)
        .iter()
        .find(|i| i.normalized_name() == wanted)
    {
        Some(existing) => Ok(ItemCheck::ExistsInOther {
            list: other,
            item_id: existing.id.clone(),
        }),
        None => Ok(ItemCheck::New),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PackingItem;

    fn sample_list() -> PackingListData {
        let mut list = PackingListData::new("Trip");
        list.to_buy.push(PackingItem::with_id("b1", "Socks"));
        list.to_pack.push(PackingItem::with_id("p1", "Passport"));
        list
    }

    #[test]
    fn test_new_name() {
        let list = sample_list();
        assert_eq!(
            check_new_item(&list, ListType::ToBuy, "Hat").unwrap(),
            ItemCheck::New
        );
    }

    #[test]
    fn test_duplicate_in_target() {
        let list = sample_list();
        assert_eq!(
            check_new_item(&list, ListType::ToBuy, "  socks ").unwrap(),
            ItemCheck::Duplicate
        );
    }

    #[test]
    fn test_exists_in_other_offers_move() {
        let list = sample_list();
        assert_eq!(
            check_new_item(&list, ListType::ToBuy, "PASSPORT").unwrap(),
            ItemCheck::ExistsInOther {
                list: ListType::ToPack,
                item_id: "p1".to_string()
            }
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let list = sample_list();
        assert_eq!(
            check_new_item(&list, ListType::ToPack, "   "),
            Err(GuardError::EmptyItemName)
        );
    }

    #[test]
    fn test_suggestions_not_checked() {
        let mut list = sample_list();
        list.suggestions.push(PackingItem::with_id("s1", "Socks"));
        assert_eq!(
            check_new_item(&list, ListType::Suggestions, "Socks").unwrap(),
            ItemCheck::New
        );
    }
}
