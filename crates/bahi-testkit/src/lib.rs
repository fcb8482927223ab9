// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use bahi_app::{Bill, BillFormInput, BillId};
use std::path::PathBuf;
use time::{Duration, OffsetDateTime};

const FIRST_NAMES: [&str; 12] = [
    "Ravi", "Asha", "Imran", "Meena", "Sunil", "Kavya", "Arjun", "Pooja", "Farhan", "Lata",
    "Nikhil", "Sneha",
];
const LAST_NAMES: [&str; 10] = [
    "Kumar", "Patil", "Shaikh", "Joshi", "Desai", "Kulkarni", "Pawar", "Rao", "Naik", "Jadhav",
];
const LOCATIONS: [&str; 10] = [
    "Pune", "Nashik", "Satara", "Kolhapur", "Sangli", "Baramati", "Solapur", "Ahmednagar",
    "Lonavala", "Karad",
];
const PRODUCTS: [&str; 12] = [
    "Chain set",
    "Brake pads",
    "Tube",
    "Tyre 26x1.95",
    "Saddle",
    "Bell",
    "Pedal pair",
    "Mudguard",
    "Kids bicycle (16in)",
    "Gear cable",
    "Service charge",
    "Puncture repair",
];
const GST_SLABS: [f64; 5] = [0.0, 5.0, 12.0, 18.0, 28.0];

// 2026-01-01T00:00:00Z
const REFERENCE_UNIX: i64 = 1_767_225_600;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator of plausible cycle-store bills.
#[derive(Debug, Clone)]
pub struct BillFaker {
    rng: DeterministicRng,
    next_id: i64,
}

impl BillFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_id: REFERENCE_UNIX * 1_000,
        }
    }

    pub fn bill(&mut self) -> Bill {
        self.next_id += 1 + self.rng.int_n(999) as i64;
        let form = self.form();
        Bill {
            id: BillId::new(self.next_id),
            name: form.name,
            location: form.location,
            mobile: form.mobile,
            product: form.product,
            amount: self.amount(),
            gst: GST_SLABS[self.rng.int_n(GST_SLABS.len())],
            datetime: self.datetime(),
        }
    }

    pub fn bills(&mut self, count: usize) -> Vec<Bill> {
        (0..count).map(|_| self.bill()).collect()
    }

    /// Form text as a user would type it; the date/time is left blank.
    pub fn form(&mut self) -> BillFormInput {
        BillFormInput {
            name: format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES)),
            location: self.pick(&LOCATIONS).to_owned(),
            mobile: format!("98{:08}", self.rng.next_u64() % 100_000_000),
            product: self.pick(&PRODUCTS).to_owned(),
            amount: format!("{}", 50 + self.rng.int_n(5_000)),
            gst: format!("{}", GST_SLABS[self.rng.int_n(GST_SLABS.len())]),
            datetime: String::new(),
        }
    }

    fn amount(&mut self) -> f64 {
        let paise = 5_000 + self.rng.int_n(500_000) as i64;
        paise as f64 / 100.0
    }

    fn datetime(&mut self) -> OffsetDateTime {
        let minutes = self.rng.int_n(60 * 24 * 60) as i64;
        reference_now() + Duration::minutes(minutes)
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("bahi.db");
    Ok((dir, db_path))
}

/// The bill most scenarios start from: Ravi in Pune owes ₹150 at 5% GST.
pub fn ravi_form() -> BillFormInput {
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

fn reference_now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(REFERENCE_UNIX).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}
