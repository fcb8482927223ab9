// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use bahi_app::{
    BILLS_KEY, BillBook, BillFormInput, BillStorage, FormController, THEME_KEY, Theme, format_local,
};
use bahi_db::{Store, validate_db_path};
use bahi_testkit::{BillFaker, ravi_form, temp_db_path};
use time::UtcOffset;
use time::macros::datetime;

fn memory_store() -> Result<Store> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    Ok(store)
}

#[test]
fn validate_db_path_rejects_uri_forms() {
    assert!(validate_db_path("").is_err());
    assert!(validate_db_path("file:test.db").is_err());
    assert!(validate_db_path("https://example.com/db.sqlite").is_err());
    assert!(validate_db_path("db.sqlite?mode=ro").is_err());
    assert!(validate_db_path("/tmp/bahi.db").is_ok());
    assert!(validate_db_path(":memory:").is_ok());
}

#[test]
fn empty_store_loads_no_bills_and_light_theme() -> Result<()> {
    let store = memory_store()?;
    assert!(store.load_bills().is_empty());
    assert_eq!(store.load_theme(), Theme::Light);
    assert_eq!(store.persisted_theme()?, None);
    Ok(())
}

#[test]
fn bills_round_trip_in_order() -> Result<()> {
    let store = memory_store()?;
    let bills = BillFaker::new(11).bills(6);

    store.save_bills(&bills)?;
    assert_eq!(store.load_bills(), bills);
    Ok(())
}

#[test]
fn save_overwrites_whole_slot() -> Result<()> {
    let store = memory_store()?;
    let mut faker = BillFaker::new(5);
    store.save_bills(&faker.bills(3))?;

    let replacement = faker.bills(1);
    store.save_bills(&replacement)?;
    assert_eq!(store.load_bills(), replacement);

    let rows: i64 = store
        .raw_connection()
        .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))?;
    assert_eq!(rows, 1);
    Ok(())
}

#[test]
fn malformed_bill_slot_loads_empty() -> Result<()> {
    let store = memory_store()?;
    for garbage in ["not json", "{\"id\": 1}", "[{\"datetime\": \"yesterday\"}]"] {
        store.put_raw(BILLS_KEY, garbage)?;
        assert!(store.load_bills().is_empty(), "payload {garbage:?}");
    }
    Ok(())
}

#[test]
fn browser_shaped_payload_loads() -> Result<()> {
    let store = memory_store()?;
    store.put_raw(
        BILLS_KEY,
        r#"[{"id":1767587400123,"name":"Ravi","location":"Pune","mobile":"9800000000",
            "product":"Chain","amount":150,"gst":5,"datetime":"2026-01-05T04:30:00.000Z"},
           {"id":1767587400999,"name":"Asha","amount":null,"gst":null,
            "datetime":"2026-01-06T00:00:00.000Z"}]"#,
    )?;

    let bills = store.load_bills();
    assert_eq!(bills.len(), 2);
    assert_eq!(bills[0].amount_label(), "₹150.00");
    assert_eq!(bills[0].datetime, datetime!(2026-01-05 04:30:00 UTC));
    assert_eq!(bills[1].amount, 0.0);
    assert!(bills[1].product.is_empty());
    Ok(())
}

#[test]
fn theme_persists_and_unknown_values_fall_back() -> Result<()> {
    let store = memory_store()?;
    store.save_theme(Theme::Dark)?;
    assert_eq!(store.load_theme(), Theme::Dark);
    assert_eq!(store.get_raw(THEME_KEY)?.as_deref(), Some("dark"));

    store.put_raw(THEME_KEY, "sepia")?;
    assert_eq!(store.load_theme(), Theme::Light);
    assert_eq!(store.persisted_theme()?, None);
    Ok(())
}

#[test]
fn file_backed_store_survives_reopen() -> Result<()> {
    let (_dir, path) = temp_db_path()?;
    {
        let store = Store::open(&path)?;
        store.bootstrap()?;
        let mut controller = FormController::new(BillBook::load(&store), UtcOffset::UTC);
        controller.submit(&ravi_form(), datetime!(2026-01-05 04:30:00 UTC))?;
        store.save_theme(Theme::Dark)?;
    }

    let reopened = Store::open(&path)?;
    reopened.bootstrap()?;
    let bills = reopened.load_bills();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].name, "Ravi");
    assert_eq!(bills[0].gst_label(), "GST:5%");
    assert_eq!(reopened.load_theme(), Theme::Dark);
    Ok(())
}

#[test]
fn bootstrap_rejects_foreign_schema() -> Result<()> {
    let store = Store::open_memory()?;
    store
        .raw_connection()
        .execute_batch("CREATE TABLE kv (key TEXT PRIMARY KEY, value TEXT NOT NULL);")?;

    let err = store.bootstrap().expect_err("schema validation should fail");
    assert!(err.to_string().contains("missing required columns: updated_at"));

    let other = Store::open_memory()?;
    other
        .raw_connection()
        .execute_batch("CREATE TABLE projects (id INTEGER PRIMARY KEY);")?;
    let err = other.bootstrap().expect_err("missing kv table");
    assert!(err.to_string().contains("no `kv` table"));
    Ok(())
}

#[test]
fn demo_seed_only_fills_empty_slot() -> Result<()> {
    let store = memory_store()?;
    let seeded = store.seed_demo_bills()?;
    assert!(seeded > 0);
    assert_eq!(store.load_bills().len(), seeded);

    assert_eq!(store.seed_demo_bills()?, 0);
    assert_eq!(store.load_bills().len(), seeded);
    Ok(())
}

#[test]
fn bootstrap_is_idempotent() -> Result<()> {
    let store = memory_store()?;
    store.save_bills(&BillFaker::new(1).bills(2))?;
    store.bootstrap()?;
    assert_eq!(store.load_bills().len(), 2);
    Ok(())
}

#[test]
fn edge_year_input_still_saves_and_later_saves_succeed() -> Result<()> {
    let store = memory_store()?;
    let ist = UtcOffset::from_hms(5, 30, 0)?;
    let now = datetime!(2026-01-05 04:30:00 UTC);
    let mut controller = FormController::new(BillBook::load(&store), ist);

    let early = BillFormInput {
        datetime: "0000-01-01T00:00".to_owned(),
        ..ravi_form()
    };
    controller.submit(&early, now)?;
    controller.submit(&ravi_form(), now)?;

    let bills = store.load_bills();
    assert_eq!(bills.len(), 2);
    assert_eq!(bills[0].datetime, now);
    assert_eq!(controller.book().all(), bills.as_slice());
    Ok(())
}

#[test]
fn stored_far_future_record_still_renders() -> Result<()> {
    let store = memory_store()?;
    store.put_raw(
        BILLS_KEY,
        r#"[{"id":1,"name":"Ravi","amount":150,"gst":5,"datetime":"9999-12-31T23:59:59Z"}]"#,
    )?;

    let bills = store.load_bills();
    assert_eq!(bills.len(), 1);
    let ist = UtcOffset::from_hms(5, 30, 0)?;
    assert_eq!(format_local(bills[0].datetime, ist), "9999-12-31T23:59:59Z");
    Ok(())
}
