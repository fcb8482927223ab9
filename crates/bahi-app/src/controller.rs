// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use time::{OffsetDateTime, UtcOffset};
use tracing::info;

use crate::{Bill, BillBook, BillFormInput, BillId, BillStorage};

/// Add/edit/delete transitions of the bill form over a [`BillBook`].
pub struct FormController<'a, S: BillStorage + ?Sized> {
    book: BillBook<'a, S>,
    offset: UtcOffset,
}

impl<'a, S: BillStorage + ?Sized> FormController<'a, S> {
    pub fn new(book: BillBook<'a, S>, offset: UtcOffset) -> Self {
        Self { book, offset }
    }

    pub fn book(&self) -> &BillBook<'a, S> {
        &self.book
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    pub fn find(&self, id: BillId) -> Option<&Bill> {
        self.book.find_by_id(id)
    }

    pub fn submit(&mut self, form: &BillFormInput, now: OffsetDateTime) -> Result<BillId> {
        let id = self.book.next_id(now);
        let bill = form.to_bill(id, now, self.offset);
        let id = self.book.add(bill)?;
        info!(%id, "bill added");
        Ok(id)
    }

    /// Returns the form pre-filled from the bill and drops the bill from the
    /// book right away. Resubmitting the form adds it back under a new id; an
    /// abandoned form leaves it deleted.
    pub fn begin_edit(&mut self, id: BillId) -> Result<Option<BillFormInput>> {
        let Some(bill) = self.book.find_by_id(id) else {
            return Ok(None);
        };
        let form = BillFormInput::from_bill(bill, self.offset);
        self.book.remove(id)?;
        info!(%id, "bill opened for edit");
        Ok(Some(form))
    }

    /// Removes a bill the user already confirmed. `false` means not found.
    pub fn delete(&mut self, id: BillId) -> Result<bool> {
        let removed = self.book.remove(id)?.is_some();
        if removed {
            info!(%id, "bill deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::FormController;
    use crate::{Bill, BillBook, BillFormInput, BillId, BillStorage};
    use anyhow::Result;
    use std::cell::RefCell;
    use time::UtcOffset;
    use time::macros::datetime;

    #[derive(Default)]
    struct MemoryStorage {
        saved: RefCell<Vec<Bill>>,
    }

    impl BillStorage for MemoryStorage {
        fn load_bills(&self) -> Vec<Bill> {
            self.saved.borrow().clone()
        }

        fn save_bills(&self, bills: &[Bill]) -> Result<()> {
            *self.saved.borrow_mut() = bills.to_vec();
            Ok(())
        }
    }

    fn ravi_form() -> BillFormInput {
        BillFormInput {
            name: "Ravi".to_owned(),
            location: "Pune".to_owned(),
            mobile: "9800000000".to_owned(),
            product: "Chain".to_owned(),
            amount: "150".to_owned(),
            gst: "5".to_owned(),
            datetime: String::new(),
        }
    }

    #[test]
    fn submit_then_delete_empties_store() -> Result<()> {
        let storage = MemoryStorage::default();
        let mut controller = FormController::new(BillBook::load(&storage), UtcOffset::UTC);

        let id = controller.submit(&ravi_form(), datetime!(2026-01-05 04:30:00 UTC))?;
        assert_eq!(controller.book().len(), 1);
        assert_eq!(storage.saved.borrow().len(), 1);
        assert_eq!(
            controller.find(id).map(Bill::amount_label),
            Some("₹150.00".to_owned())
        );

        assert!(controller.delete(id)?);
        assert!(controller.book().is_empty());
        assert!(storage.saved.borrow().is_empty());
        Ok(())
    }

    #[test]
    fn begin_edit_removes_bill_immediately() -> Result<()> {
        let storage = MemoryStorage::default();
        let mut controller = FormController::new(BillBook::load(&storage), UtcOffset::UTC);
        let id = controller.submit(&ravi_form(), datetime!(2026-01-05 04:30:00 UTC))?;

        let form = controller.begin_edit(id)?.expect("bill exists");
        assert_eq!(form.name, "Ravi");
        assert_eq!(form.amount, "150");
        assert_eq!(form.datetime, "2026-01-05T04:30");
        assert!(controller.find(id).is_none());
        assert!(storage.saved.borrow().is_empty());

        let reloaded = BillBook::load(&storage);
        assert!(reloaded.is_empty(), "abandoned edit leaves the bill deleted");
        Ok(())
    }

    #[test]
    fn resubmitted_edit_moves_bill_to_end_with_new_id() -> Result<()> {
        let storage = MemoryStorage::default();
        let mut controller = FormController::new(BillBook::load(&storage), UtcOffset::UTC);
        let now = datetime!(2026-01-05 04:30:00 UTC);
        let first = controller.submit(&ravi_form(), now)?;
        let mut other = ravi_form();
        other.name = "Asha".to_owned();
        controller.submit(&other, now)?;

        let mut form = controller.begin_edit(first)?.expect("bill exists");
        form.amount = "175".to_owned();
        let resubmitted = controller.submit(&form, datetime!(2026-01-06 00:00:00 UTC))?;

        let bills = controller.book().all();
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].name, "Asha");
        assert_eq!(bills[1].name, "Ravi");
        assert_eq!(bills[1].amount, 175.0);
        assert_eq!(bills[1].datetime, now);
        assert_eq!(bills[1].id, resubmitted);
        Ok(())
    }

    #[test]
    fn missing_ids_report_not_found_without_mutation() -> Result<()> {
        let storage = MemoryStorage::default();
        let mut controller = FormController::new(BillBook::load(&storage), UtcOffset::UTC);
        controller.submit(&ravi_form(), datetime!(2026-01-05 04:30:00 UTC))?;

        assert!(controller.begin_edit(BillId::new(1))?.is_none());
        assert!(!controller.delete(BillId::new(1))?);
        assert_eq!(controller.book().len(), 1);
        assert_eq!(storage.saved.borrow().len(), 1);
        Ok(())
    }
}
