use invmgr_core::DomainResult;
use invmgr_inventory::{Item, ItemList};

use super::CommandOutput;
use crate::ui;

pub(super) fn add(
    items: &mut ItemList,
    name: &str,
    quantity: i64,
    description: &str,
) -> DomainResult<CommandOutput> {
    let item = Item::new(name, quantity, description)?;
    let line = format!("{item} has been added to the list.");
    items.add_item(item);

    tracing::info!(item = name, quantity, size = items.size(), "item added");
    Ok(CommandOutput::line(line))
}

pub(super) fn delete(items: &mut ItemList, index: i64) -> DomainResult<CommandOutput> {
    let position = items.checked_index(index)?;
    let removed = items.remove_item(position)?;

    tracing::info!(item = removed.name(), index = position, "item deleted");
    Ok(CommandOutput::line(format!("{removed} has been deleted.")))
}

/// All-or-nothing: fields are applied to a copy which replaces the stored
/// item only if every change validates.
pub(super) fn edit(
    items: &mut ItemList,
    index: i64,
    name: Option<&str>,
    quantity: Option<i64>,
    description: Option<&str>,
) -> DomainResult<CommandOutput> {
    let position = items.checked_index(index)?;
    let stored = items.get_item_mut(position)?;

    let mut updated = stored.clone();
    if let Some(name) = name {
        updated.set_name(name)?;
    }
    if let Some(quantity) = quantity {
        updated.set_quantity(quantity)?;
    }
    if let Some(description) = description {
        updated.set_description(description)?;
    }
    *stored = updated;

    tracing::info!(index = position, item = stored.name(), "item edited");
    Ok(CommandOutput::line(format!("{stored} has been edited.")))
}

pub(super) fn list(items: &ItemList) -> CommandOutput {
    if items.is_empty() {
        return CommandOutput::line(ui::EMPTY_LIST);
    }
    let mut lines = vec!["Here are the items in your list:".to_string()];
    lines.extend(
        items
            .iter()
            .enumerate()
            .map(|(i, item)| ui::numbered(i, ui::item_summary(item))),
    );
    CommandOutput::lines(lines)
}

pub(super) fn describe(items: &ItemList, index: i64) -> DomainResult<CommandOutput> {
    let item = items.get_item(items.checked_index(index)?)?;

    let mut lines = vec![item.to_detailed_string()];
    if item.is_lost() {
        lines.push("This item has been marked as lost.".to_string());
    }
    Ok(CommandOutput::lines(lines))
}

pub(super) fn find(items: &ItemList, name: &str) -> CommandOutput {
    let lines: Vec<String> = items
        .find(name)
        .map(|(i, item)| ui::numbered(i, item))
        .collect();

    if lines.is_empty() {
        return CommandOutput::line(format!("No items named {name} were found."));
    }
    let mut out = vec!["Here are the matching items:".to_string()];
    out.extend(lines);
    CommandOutput::lines(out)
}

pub(super) fn mark_lost(items: &mut ItemList, index: i64) -> DomainResult<CommandOutput> {
    let position = items.checked_index(index)?;
    let item = items.get_item_mut(position)?;
    item.mark_as_lost();

    tracing::info!(index = position, item = item.name(), "item marked lost");
    Ok(CommandOutput::line(format!("{item} has been marked as lost.")))
}

pub(super) fn list_lost(items: &ItemList) -> CommandOutput {
    let lines: Vec<String> = items
        .lost_items()
        .map(|(i, item)| ui::numbered(i, item))
        .collect();

    if lines.is_empty() {
        return CommandOutput::line("There are no lost items.");
    }
    let mut out = vec!["Here are the lost items:".to_string()];
    out.extend(lines);
    CommandOutput::lines(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use invmgr_core::DomainError;

    fn sample() -> ItemList {
        ItemList::new(vec![
            Item::new("camera", 2, "DSLR body").unwrap(),
            Item::new("tripod", 1, "aluminium legs").unwrap(),
            Item::new("camera", 1, "compact").unwrap(),
        ])
    }

    #[test]
    fn add_appends_and_reports() {
        let mut items = ItemList::default();
        let out = add(&mut items, "lens", 3, "50mm").unwrap();
        assert_eq!(out.lines, vec!["lens | 3 has been added to the list."]);
        assert_eq!(items.size(), 1);
    }

    #[test]
    fn add_rejects_invalid_quantity() {
        let mut items = ItemList::default();
        let err = add(&mut items, "lens", 0, "50mm").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(items.is_empty());
    }

    #[test]
    fn delete_shifts_remaining_items() {
        let mut items = sample();
        let out = delete(&mut items, 0).unwrap();
        assert_eq!(out.lines, vec!["camera | 2 has been deleted."]);
        assert_eq!(items.get_item(0).unwrap().name(), "tripod");
    }

    #[test]
    fn delete_out_of_range() {
        let mut items = sample();
        assert!(matches!(
            delete(&mut items, 3),
            Err(DomainError::IndexOutOfRange { index: 3, size: 3 })
        ));
        assert!(matches!(
            delete(&mut items, -1),
            Err(DomainError::IndexOutOfRange { index: -1, .. })
        ));
    }

    #[test]
    fn edit_is_all_or_nothing() {
        let mut items = sample();
        let err = edit(&mut items, 1, Some("stand"), Some(0), None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let tripod = items.get_item(1).unwrap();
        assert_eq!(tripod.name(), "tripod");
        assert_eq!(tripod.quantity(), 1);

        edit(&mut items, 1, Some("stand"), Some(4), None).unwrap();
        let stand = items.get_item(1).unwrap();
        assert_eq!(stand.name(), "stand");
        assert_eq!(stand.quantity(), 4);
        assert_eq!(stand.description(), "aluminium legs");
    }

    #[test]
    fn list_numbers_from_one() {
        let out = list(&sample());
        assert_eq!(out.lines[1], "1. camera | 2");
        assert_eq!(out.lines[3], "3. camera | 1");
        assert_eq!(list(&ItemList::default()).lines, vec![ui::EMPTY_LIST]);
    }

    #[test]
    fn list_tags_lost_items() {
        let mut items = sample();
        items.get_item_mut(1).unwrap().mark_as_lost();
        assert_eq!(list(&items).lines[2], "2. tripod | 1 [LOST]");
    }

    #[test]
    fn describe_shows_detailed_form_once() {
        let out = describe(&sample(), 1).unwrap();
        assert_eq!(out.lines, vec!["tripod | 1 | aluminium legs"]);

        let mut items = sample();
        items.get_item_mut(1).unwrap().mark_as_lost();
        let out = describe(&items, 1).unwrap();
        assert_eq!(
            out.lines,
            vec!["tripod | 1 | aluminium legs", "This item has been marked as lost."]
        );
    }

    #[test]
    fn edit_rejects_separator_in_name() {
        let mut items = sample();
        let err = edit(&mut items, 0, Some("camera | body"), Some(5), None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(items.get_item(0).unwrap().name(), "camera");
        assert_eq!(items.get_item(0).unwrap().quantity(), 2);
    }

    #[test]
    fn find_is_exact() {
        let out = find(&sample(), "camera");
        assert_eq!(out.lines[1..], ["1. camera | 2", "3. camera | 1"]);

        let out = find(&sample(), "cam");
        assert_eq!(out.lines, vec!["No items named cam were found."]);
    }

    #[test]
    fn lost_items_are_listed() {
        let mut items = sample();
        mark_lost(&mut items, 2).unwrap();
        let out = list_lost(&items);
        assert_eq!(out.lines[1..], ["3. camera | 1"]);
    }
}
