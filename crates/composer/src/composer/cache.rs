//! Paginated accumulation cache
//!
//! Backs the browse screens: successive pages merge into one deduplicated,
//! insertion-ordered list keyed by entity id. Page 1 replaces the list
//! outright (pull-to-refresh), later pages append only unseen ids.

use std::collections::HashSet;

use contracts::domain::common::EntityRecord;
use contracts::shared::paging::{total_pages, PagedResponse};

#[derive(Debug)]
pub struct AccumulatedList {
    items: Vec<EntityRecord>,
    ids: HashSet<i64>,
    current_page: u32,
    page_size: u32,
    has_more: bool,
}

impl AccumulatedList {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            ids: HashSet::new(),
            current_page: 1,
            page_size,
            has_more: true,
        }
    }

    pub fn items(&self) -> &[EntityRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// Clear everything; invoked whenever the active category/filter changes
    pub fn reset(&mut self) {
        self.items.clear();
        self.ids.clear();
        self.current_page = 1;
        self.has_more = true;
    }

    /// Merge one fetched page into the accumulated list
    pub fn apply_page(&mut self, page: u32, response: PagedResponse<EntityRecord>) {
        if page <= 1 {
            self.items.clear();
            self.ids.clear();
        }
        for record in response.data {
            let Some(id) = record.id() else {
                continue;
            };
            if self.ids.insert(id) {
                self.items.push(record);
            }
        }
        self.current_page = page.max(1);
        self.has_more = self.current_page < total_pages(response.total_registros, self.page_size);
    }

    /// A created record is shown first; pagination restarts so the next
    /// load-more recomputes boundaries instead of assuming a shift
    pub fn on_create(&mut self, record: EntityRecord) {
        if let Some(id) = record.id() {
            if self.ids.insert(id) {
                self.items.insert(0, record);
            }
        }
        self.reset_pagination();
    }

    /// Remove by id and restart pagination
    pub fn on_delete(&mut self, id: i64) {
        if self.ids.remove(&id) {
            self.items.retain(|r| r.id() != Some(id));
        }
        self.reset_pagination();
    }

    /// Replace in place by id; order and count unaffected, no pagination reset
    pub fn on_update(&mut self, record: EntityRecord) {
        let Some(id) = record.id() else { return };
        if let Some(slot) = self.items.iter_mut().find(|r| r.id() == Some(id)) {
            *slot = record;
        }
    }

    /// Mutation failed: restart pagination so a stale id set cannot diverge
    /// from the server, but keep the visible items
    pub fn on_mutation_error(&mut self) {
        self.reset_pagination();
    }

    fn reset_pagination(&mut self) {
        self.current_page = 1;
        self.has_more = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: i64) -> EntityRecord {
        EntityRecord::from_value(json!({"id": id, "nombre": format!("item {}", id)}))
    }

    fn page_of(ids: &[i64], total: u64) -> PagedResponse<EntityRecord> {
        PagedResponse::new(ids.iter().copied().map(record).collect(), total)
    }

    #[test]
    fn refresh_is_idempotent() {
        let mut list = AccumulatedList::new(10);
        list.apply_page(1, page_of(&[1, 2, 3], 3));
        list.apply_page(1, page_of(&[1, 2, 3], 3));
        assert_eq!(list.len(), 3);
        assert_eq!(list.current_page(), 1);
        assert!(!list.has_more());
    }

    #[test]
    fn append_is_monotonic_and_deduplicated() {
        let mut list = AccumulatedList::new(10);
        list.apply_page(1, page_of(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 25));
        assert!(list.has_more());

        // id 10 repeats on page 2; it must be dropped
        list.apply_page(2, page_of(&[10, 11, 12, 13, 14, 15, 16, 17, 18, 19], 25));
        assert_eq!(list.len(), 19);
        assert!(list.has_more());

        list.apply_page(3, page_of(&[20, 21, 22, 23, 24], 25));
        assert_eq!(list.len(), 24);
        assert!(!list.has_more());

        // insertion order preserved across pages
        let first: Vec<i64> = list.items().iter().filter_map(|r| r.id()).take(3).collect();
        assert_eq!(first, vec![1, 2, 3]);
    }

    #[test]
    fn create_prepends_and_resets_pagination() {
        let mut list = AccumulatedList::new(10);
        list.apply_page(1, page_of(&[1, 2, 3], 3));
        list.on_create(record(99));
        assert_eq!(list.items()[0].id(), Some(99));
        assert_eq!(list.current_page(), 1);
        assert!(list.has_more());
    }

    #[test]
    fn delete_removes_and_resets_pagination() {
        let mut list = AccumulatedList::new(10);
        list.apply_page(1, page_of(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 15));
        list.apply_page(2, page_of(&[11, 12, 13, 14, 15], 15));
        assert_eq!(list.len(), 15);

        list.on_delete(7);
        assert_eq!(list.len(), 14);
        assert!(!list.contains(7));
        assert_eq!(list.current_page(), 1);
        assert!(list.has_more());
    }

    #[test]
    fn update_replaces_in_place_without_reset() {
        let mut list = AccumulatedList::new(10);
        list.apply_page(1, page_of(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 20));
        list.apply_page(2, page_of(&[11, 12], 20));
        let page_before = list.current_page();

        list.on_update(EntityRecord::from_value(json!({"id": 2, "nombre": "renamed"})));
        assert_eq!(list.current_page(), page_before);
        assert_eq!(list.items()[1].get("nombre"), Some(&json!("renamed")));
        assert_eq!(list.items()[1].id(), Some(2));
        assert_eq!(list.len(), 12);
    }

    #[test]
    fn mutation_error_keeps_items() {
        let mut list = AccumulatedList::new(10);
        list.apply_page(1, page_of(&[1, 2, 3], 3));
        list.on_mutation_error();
        assert_eq!(list.len(), 3);
        assert_eq!(list.current_page(), 1);
        assert!(list.has_more());
    }
}
