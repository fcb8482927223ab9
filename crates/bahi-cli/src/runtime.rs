// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use bahi_app::{
    Bill, BillBook, BillFormInput, BillId, Composer, DispatchOutcome, FormController,
    MessagingSurface, PlatformFamily, SmsDraft, Theme, dispatch,
};
use bahi_db::Store;
use time::{OffsetDateTime, UtcOffset};
use tracing::info;

pub struct DbRuntime<'a, M: MessagingSurface> {
    store: &'a Store,
    controller: FormController<'a, Store>,
    composer: Composer,
    platform: PlatformFamily,
    surface: M,
}

impl<'a, M: MessagingSurface> DbRuntime<'a, M> {
    pub fn new(
        store: &'a Store,
        composer: Composer,
        platform: PlatformFamily,
        offset: UtcOffset,
        surface: M,
    ) -> Self {
        Self {
            store,
            controller: FormController::new(BillBook::load(store), offset),
            composer,
            platform,
            surface,
        }
    }
}

impl<M: MessagingSurface> bahi_tui::AppRuntime for DbRuntime<'_, M> {
    fn shop_name(&self) -> &str {
        self.composer.shop_name()
    }

    fn local_offset(&self) -> UtcOffset {
        self.controller.offset()
    }

    fn load_bills(&mut self) -> Result<Vec<Bill>> {
        Ok(self.controller.book().all().to_vec())
    }

    fn find_bill(&mut self, id: BillId) -> Result<Option<Bill>> {
        Ok(self.controller.find(id).cloned())
    }

    fn submit_bill(&mut self, form: &BillFormInput) -> Result<BillId> {
        self.controller.submit(form, OffsetDateTime::now_utc())
    }

    fn begin_edit(&mut self, id: BillId) -> Result<Option<BillFormInput>> {
        self.controller.begin_edit(id)
    }

    fn delete_bill(&mut self, id: BillId) -> Result<bool> {
        self.controller.delete(id)
    }

    fn compose_sms(&mut self, id: BillId) -> Result<Option<SmsDraft>> {
        Ok(self.controller.find(id).map(|bill| self.composer.draft(bill)))
    }

    fn send_sms(&mut self, draft: &SmsDraft) -> DispatchOutcome {
        let outcome = dispatch(&mut self.surface, draft, self.platform);
        info!(?outcome, platform = self.platform.as_str(), "sms dispatched");
        outcome
    }

    fn save_theme(&mut self, theme: Theme) -> Result<()> {
        self.store.save_theme(theme)
    }
}
