// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Deserializer, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::ids::BillId;

pub const BILLS_KEY: &str = "babi_bahi_bills_v1";
pub const THEME_KEY: &str = "theme";

pub const BILL_NOT_FOUND: &str = "Bill not found";
pub const EMPTY_BILLS_PLACEHOLDER: &str = "No unpaid bills — add one above";
pub const CLOUD_SAVE_NOTICE: &str =
    "Cloud save is optional and not configured; bills are stored on this device only";
pub const CURRENCY_PREFIX: &str = "₹";

/// One unpaid charge for a single customer transaction.
///
/// Stored records are trusted as-is once they parse; missing text fields fall
/// back to empty strings and missing or `null` numbers fall back to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    #[serde(default)]
    pub id: BillId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub product: String,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub amount: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub gst: f64,
    #[serde(with = "time::serde::rfc3339", default = "unix_epoch")]
    pub datetime: OffsetDateTime,
}

impl Bill {
    pub fn amount_label(&self) -> String {
        format_amount(self.amount)
    }

    pub fn gst_label(&self) -> String {
        format!("GST:{}%", format_number(self.gst))
    }

    pub fn pdf_notice(&self) -> String {
        format!("PDF export is not configured; nothing generated for {}", self.name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Form,
    ConfirmDelete(BillId),
    SmsPreview,
}

/// Currency-prefixed amount with exactly two decimals, e.g. `₹10.00`.
pub fn format_amount(amount: f64) -> String {
    format!("{CURRENCY_PREFIX}{amount:.2}")
}

/// Shortest round-trip rendering, so `5.0` prints as `5` and `2.5` as `2.5`.
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Local `d/m/yyyy h:mm:ss am` text. Instants that cannot be shifted into
/// `offset` render as their stored RFC 3339 text instead.
pub fn format_local(value: OffsetDateTime, offset: UtcOffset) -> String {
    let format = format_description!(
        "[day padding:none]/[month padding:none]/[year] [hour repr:12 padding:none]:[minute]:[second] [period case:lower]"
    );
    value
        .checked_to_offset(offset)
        .and_then(|local| local.format(&format).ok())
        .or_else(|| value.format(&Rfc3339).ok())
        .unwrap_or_else(|| value.unix_timestamp().to_string())
}

fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|number| number.is_finite()).unwrap_or(0.0))
}

fn unix_epoch() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

#[cfg(test)]
mod tests {
    use super::{Bill, Theme, format_amount, format_local, format_number};
    use crate::BillId;
    use anyhow::Result;
    use time::macros::datetime;
    use time::{OffsetDateTime, UtcOffset};

    #[test]
    fn theme_parse_and_toggle() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("light"), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::default().toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "light");
    }

    #[test]
    fn amount_always_has_two_decimals() {
        assert_eq!(format_amount(10.0), "₹10.00");
        assert_eq!(format_amount(150.5), "₹150.50");
        assert_eq!(format_amount(99.999), "₹100.00");
    }

    #[test]
    fn whole_numbers_print_without_fraction() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn local_format_uses_offset() -> Result<()> {
        let offset = UtcOffset::from_hms(5, 30, 0)?;
        let value = datetime!(2026-01-05 04:30:00 UTC);
        assert_eq!(format_local(value, offset), "5/1/2026 10:00:00 am");
        Ok(())
    }

    #[test]
    fn local_format_of_last_representable_second_falls_back_to_rfc3339() -> Result<()> {
        let bill: Bill = serde_json::from_str(r#"{"id":1,"datetime":"9999-12-31T23:59:59Z"}"#)?;
        let offset = UtcOffset::from_hms(5, 30, 0)?;
        assert_eq!(format_local(bill.datetime, offset), "9999-12-31T23:59:59Z");
        Ok(())
    }

    #[test]
    fn bill_deserializes_browser_shaped_record() -> Result<()> {
        let raw = r#"{
            "id": 1767600000123,
            "name": "Ravi",
            "location": "Pune",
            "mobile": "9800000000",
            "product": "Chain",
            "amount": 150,
            "gst": 5,
            "datetime": "2026-01-05T04:30:00.000Z"
        }"#;
        let bill: Bill = serde_json::from_str(raw)?;
        assert_eq!(bill.id, BillId::new(1_767_600_000_123));
        assert_eq!(bill.amount_label(), "₹150.00");
        assert_eq!(bill.gst_label(), "GST:5%");
        assert!(bill.pdf_notice().ends_with("for Ravi"));
        assert_eq!(bill.datetime, datetime!(2026-01-05 04:30:00 UTC));
        Ok(())
    }

    #[test]
    fn null_numbers_and_missing_fields_default() -> Result<()> {
        let raw = r#"{"id": 7, "name": "Asha", "amount": null}"#;
        let bill: Bill = serde_json::from_str(raw)?;
        assert_eq!(bill.amount, 0.0);
        assert_eq!(bill.gst, 0.0);
        assert!(bill.product.is_empty());
        assert_eq!(bill.datetime, OffsetDateTime::UNIX_EPOCH);
        Ok(())
    }
}
