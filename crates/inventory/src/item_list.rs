use invmgr_core::{DomainError, DomainResult};

use crate::borrow_record::BorrowRecord;
use crate::filter::RecordFilter;
use crate::item::Item;

/// Ordered collection of every item in the session.
///
/// Indices are 0-based and contiguous; removing an item shifts the ones
/// after it down by one. Duplicate names are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemList {
    items: Vec<Item>,
}

impl ItemList {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn remove_item(&mut self, index: usize) -> DomainResult<Item> {
        self.ensure_in_range(index)?;
        Ok(self.items.remove(index))
    }

    pub fn get_item(&self, index: usize) -> DomainResult<&Item> {
        self.items
            .get(index)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Mutable handle to a stored item. Field changes still go through the
    /// item's validating setters.
    pub fn get_item_mut(&mut self, index: usize) -> DomainResult<&mut Item> {
        let size = self.items.len();
        self.items
            .get_mut(index)
            .ok_or_else(|| DomainError::index_out_of_range(to_signed(index), size))
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert a raw (possibly negative) index into a valid position.
    pub fn checked_index(&self, raw: i64) -> DomainResult<usize> {
        usize::try_from(raw)
            .ok()
            .filter(|&index| index < self.items.len())
            .ok_or_else(|| DomainError::index_out_of_range(raw, self.items.len()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Items whose name exactly matches `term`, with their positions.
    pub fn find<'a>(&'a self, term: &'a str) -> impl Iterator<Item = (usize, &'a Item)> + 'a {
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, item)| item.contains(term))
    }

    pub fn lost_items(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.items.iter().enumerate().filter(|(_, item)| item.is_lost())
    }

    /// Every matching record across all items, item order then record order.
    pub fn filter_records<'a>(
        &'a self,
        filter: &'a RecordFilter,
    ) -> impl Iterator<Item = (usize, &'a Item, &'a BorrowRecord)> + 'a {
        self.items.iter().enumerate().flat_map(move |(index, item)| {
            item.filter_records(filter)
                .map(move |record| (index, item, record))
        })
    }

    fn ensure_in_range(&self, index: usize) -> DomainResult<()> {
        if index >= self.items.len() {
            return Err(self.out_of_range(index));
        }
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> DomainError {
        DomainError::index_out_of_range(to_signed(index), self.items.len())
    }
}

impl From<Vec<Item>> for ItemList {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}

fn to_signed(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(name: &str) -> Item {
        Item::new(name, 1, format!("{name} description")).unwrap()
    }

    fn three_items() -> ItemList {
        ItemList::new(vec![item("a"), item("b"), item("c")])
    }

    #[test]
    fn add_item_appends() {
        let mut list = ItemList::default();
        list.add_item(item("a"));
        list.add_item(item("a"));
        assert_eq!(list.size(), 2);
        assert_eq!(list.get_item(1).unwrap().name(), "a");
    }

    #[test]
    fn get_item_rejects_index_equal_to_size() {
        let list = three_items();
        assert!(matches!(
            list.get_item(3),
            Err(DomainError::IndexOutOfRange { index: 3, size: 3 })
        ));
    }

    #[test]
    fn remove_item_rejects_index_equal_to_size() {
        let mut list = three_items();
        assert!(matches!(
            list.remove_item(3),
            Err(DomainError::IndexOutOfRange { index: 3, size: 3 })
        ));
        assert_eq!(list.size(), 3);
    }

    #[test]
    fn negative_index_is_out_of_range() {
        let list = three_items();
        assert!(matches!(
            list.checked_index(-1),
            Err(DomainError::IndexOutOfRange { index: -1, size: 3 })
        ));
        assert!(list.checked_index(3).is_err());
        assert_eq!(list.checked_index(2).unwrap(), 2);
    }

    #[test]
    fn remove_first_shifts_the_rest_down() {
        let mut list = three_items();
        let removed = list.remove_item(0).unwrap();

        assert_eq!(removed.name(), "a");
        assert_eq!(list.size(), 2);
        assert_eq!(list.get_item(0).unwrap().name(), "b");
        assert_eq!(list.get_item(1).unwrap().name(), "c");
    }

    #[test]
    fn get_item_mut_edits_in_place() {
        let mut list = three_items();
        list.get_item_mut(1).unwrap().set_quantity(9).unwrap();
        assert_eq!(list.get_item(1).unwrap().quantity(), 9);
        assert!(list.get_item_mut(5).is_err());
    }

    #[test]
    fn find_and_lost_items_report_positions() {
        let mut list = ItemList::new(vec![item("a"), item("b"), item("a")]);
        list.get_item_mut(1).unwrap().mark_as_lost();

        let found: Vec<_> = list.find("a").map(|(i, _)| i).collect();
        assert_eq!(found, vec![0, 2]);

        let lost: Vec<_> = list.lost_items().map(|(i, _)| i).collect();
        assert_eq!(lost, vec![1]);
    }

    #[test]
    fn filter_records_spans_items() {
        let mut list = three_items();
        let today = date(2023, 1, 20);
        list.get_item_mut(0)
            .unwrap()
            .add_borrow_record(BorrowRecord::new("x", date(2023, 1, 1), Some(date(2023, 1, 5))).unwrap())
            .unwrap();
        list.get_item_mut(2)
            .unwrap()
            .add_borrow_record(BorrowRecord::new("y", date(2023, 1, 1), Some(date(2023, 1, 9))).unwrap())
            .unwrap();
        list.get_item_mut(2)
            .unwrap()
            .add_borrow_record(BorrowRecord::new("x", date(2023, 1, 18), Some(date(2023, 1, 25))).unwrap())
            .unwrap();

        let overdue = RecordFilter::overdue(today);
        let hits: Vec<_> = list
            .filter_records(&overdue)
            .map(|(i, _, r)| (i, r.borrower().to_string()))
            .collect();
        assert_eq!(hits, vec![(0, "x".to_string()), (2, "y".to_string())]);

        let current_x = RecordFilter::current(today).with_borrower(Some("x".into()));
        let hits: Vec<_> = list.filter_records(&current_x).map(|(i, _, _)| i).collect();
        assert_eq!(hits, vec![2]);
    }
}
