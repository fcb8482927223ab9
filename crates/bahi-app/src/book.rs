// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use time::OffsetDateTime;
use tracing::debug;

use crate::{Bill, BillId};

const ID_JITTER_MILLIS: i64 = 999;

/// Backing slot for the bill list. `load_bills` never fails: absent or
/// unreadable data is an empty list.
pub trait BillStorage {
    fn load_bills(&self) -> Vec<Bill>;
    fn save_bills(&self, bills: &[Bill]) -> Result<()>;
}

/// Ordered, insertion-order bill list mirrored to a [`BillStorage`] after
/// every mutation.
pub struct BillBook<'a, S: BillStorage + ?Sized> {
    storage: &'a S,
    bills: Vec<Bill>,
}

impl<'a, S: BillStorage + ?Sized> BillBook<'a, S> {
    pub fn load(storage: &'a S) -> Self {
        let bills = storage.load_bills();
        debug!(count = bills.len(), "loaded bills");
        Self { storage, bills }
    }

    pub fn all(&self) -> &[Bill] {
        &self.bills
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    pub fn contains(&self, id: BillId) -> bool {
        self.bills.iter().any(|bill| bill.id == id)
    }

    pub fn find_by_id(&self, id: BillId) -> Option<&Bill> {
        self.bills.iter().find(|bill| bill.id == id)
    }

    /// Current epoch millis plus a random jitter, bumped until unused.
    pub fn next_id(&self, now: OffsetDateTime) -> BillId {
        let millis = i64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX / 2);
        let mut candidate = millis.saturating_add(rand::random_range(0..ID_JITTER_MILLIS));
        while self.contains(BillId::new(candidate)) {
            candidate = candidate.saturating_add(1);
        }
        BillId::new(candidate)
    }

    /// Appends and persists. A bill whose id is already taken is re-keyed.
    pub fn add(&mut self, mut bill: Bill) -> Result<BillId> {
        if self.contains(bill.id) {
            let fresh = self.next_id(OffsetDateTime::now_utc());
            debug!(old = %bill.id, new = %fresh, "re-keyed colliding bill id");
            bill.id = fresh;
        }
        let id = bill.id;
        let mut next = self.bills.clone();
        next.push(bill);
        self.commit(next)?;
        Ok(id)
    }

    /// Removes and persists. Absent ids are a silent no-op returning `None`.
    pub fn remove(&mut self, id: BillId) -> Result<Option<Bill>> {
        let Some(index) = self.bills.iter().position(|bill| bill.id == id) else {
            return Ok(None);
        };
        let mut next = self.bills.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        Ok(Some(removed))
    }

    // The in-memory list only changes once storage accepted the new one.
    fn commit(&mut self, next: Vec<Bill>) -> Result<()> {
        self.storage.save_bills(&next)?;
        self.bills = next;
        debug!(count = self.bills.len(), "persisted bills");
        Ok(())
    }
}
