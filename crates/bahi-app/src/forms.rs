// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::{Bill, BillId, format_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillField {
    Name,
    Location,
    Mobile,
    Product,
    Amount,
    Gst,
    DateTime,
}

impl BillField {
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Location,
        Self::Mobile,
        Self::Product,
        Self::Amount,
        Self::Gst,
        Self::DateTime,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "customer name",
            Self::Location => "location",
            Self::Mobile => "mobile",
            Self::Product => "product",
            Self::Amount => "amount",
            Self::Gst => "gst %",
            Self::DateTime => "date/time",
        }
    }

    pub const fn hint(self) -> &'static str {
        match self {
            Self::Amount | Self::Gst => "0",
            Self::DateTime => "YYYY-MM-DDTHH:MM (blank = now)",
            _ => "",
        }
    }
}

/// Raw text of the bill form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BillFormInput {
    pub name: String,
    pub location: String,
    pub mobile: String,
    pub product: String,
    pub amount: String,
    pub gst: String,
    pub datetime: String,
}

impl BillFormInput {
    pub fn field(&self, field: BillField) -> &str {
        match field {
            BillField::Name => &self.name,
            BillField::Location => &self.location,
            BillField::Mobile => &self.mobile,
            BillField::Product => &self.product,
            BillField::Amount => &self.amount,
            BillField::Gst => &self.gst,
            BillField::DateTime => &self.datetime,
        }
    }

    pub fn field_mut(&mut self, field: BillField) -> &mut String {
        match field {
            BillField::Name => &mut self.name,
            BillField::Location => &mut self.location,
            BillField::Mobile => &mut self.mobile,
            BillField::Product => &mut self.product,
            BillField::Amount => &mut self.amount,
            BillField::Gst => &mut self.gst,
            BillField::DateTime => &mut self.datetime,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        BillField::ALL
            .iter()
            .all(|field| self.field(*field).trim().is_empty())
    }

    /// Builds a whole record from the form. Text is trimmed, unparseable
    /// numbers become zero and a blank or unparseable date/time becomes `now`.
    pub fn to_bill(&self, id: BillId, now: OffsetDateTime, offset: UtcOffset) -> Bill {
        Bill {
            id,
            name: self.name.trim().to_owned(),
            location: self.location.trim().to_owned(),
            mobile: self.mobile.trim().to_owned(),
            product: self.product.trim().to_owned(),
            amount: parse_decimal(&self.amount),
            gst: parse_decimal(&self.gst),
            datetime: parse_local_datetime(&self.datetime, offset)
                .and_then(storable_utc)
                .or_else(|| storable_utc(now))
                .unwrap_or(now),
        }
    }

    pub fn from_bill(bill: &Bill, offset: UtcOffset) -> Self {
        Self {
            name: bill.name.clone(),
            location: bill.location.clone(),
            mobile: bill.mobile.clone(),
            product: bill.product.clone(),
            amount: format_number(bill.amount),
            gst: format_number(bill.gst),
            datetime: format_form_datetime(bill.datetime, offset),
        }
    }
}

/// Leading-prefix decimal parse: `"12.5kg"` is 12.5, `"abc"` and `""` are 0.
pub fn parse_decimal(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let candidate_len = trimmed
        .char_indices()
        .find(|(_, ch)| !(ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'e' | 'E')))
        .map(|(index, _)| index)
        .unwrap_or(trimmed.len());
    let candidate = &trimmed[..candidate_len];

    (1..=candidate.len())
        .rev()
        .find_map(|end| candidate[..end].parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

pub fn parse_local_datetime(raw: &str, offset: UtcOffset) -> Option<OffsetDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ];
    formats
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(trimmed, format).ok())
        .map(|value| value.assume_offset(offset))
}

// Stored timestamps are written as RFC 3339, which only covers years 0000-9999.
fn storable_utc(value: OffsetDateTime) -> Option<OffsetDateTime> {
    value
        .checked_to_offset(UtcOffset::UTC)
        .filter(|utc| (0..=9999).contains(&utc.year()))
}

fn format_form_datetime(value: OffsetDateTime, offset: UtcOffset) -> String {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]");
    value
        .checked_to_offset(offset)
        .and_then(|local| local.format(&format).ok())
        .or_else(|| value.format(&format).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{BillField, BillFormInput, parse_decimal, parse_local_datetime};
    use crate::BillId;
    use anyhow::Result;
    use time::UtcOffset;
    use time::macros::datetime;

    fn ist() -> Result<UtcOffset> {
        Ok(UtcOffset::from_hms(5, 30, 0)?)
    }

    #[test]
    fn to_bill_trims_and_defaults_numbers() -> Result<()> {
        let form = BillFormInput {
            name: "  Ravi ".to_owned(),
            location: " Pune".to_owned(),
            mobile: "9800000000 ".to_owned(),
            product: "Chain".to_owned(),
            amount: String::new(),
            gst: "five".to_owned(),
            datetime: String::new(),
        };
        let now = datetime!(2026-02-01 09:15:00 UTC);
        let bill = form.to_bill(BillId::new(42), now, ist()?);

        assert_eq!(bill.id, BillId::new(42));
        assert_eq!(bill.name, "Ravi");
        assert_eq!(bill.location, "Pune");
        assert_eq!(bill.mobile, "9800000000");
        assert_eq!(bill.amount, 0.0);
        assert_eq!(bill.gst, 0.0);
        assert_eq!(bill.datetime, now);
        Ok(())
    }

    #[test]
    fn to_bill_reads_local_datetime() -> Result<()> {
        let form = BillFormInput {
            amount: "150".to_owned(),
            gst: "5".to_owned(),
            datetime: "2026-01-05T10:00".to_owned(),
            ..BillFormInput::default()
        };
        let bill = form.to_bill(
            BillId::new(1),
            datetime!(2026-02-01 09:15:00 UTC),
            ist()?,
        );
        assert_eq!(bill.amount, 150.0);
        assert_eq!(bill.gst, 5.0);
        assert_eq!(bill.datetime, datetime!(2026-01-05 04:30:00 UTC));
        assert_eq!(bill.datetime.offset(), UtcOffset::UTC);
        Ok(())
    }

    #[test]
    fn from_bill_prefills_every_field() -> Result<()> {
        let form = BillFormInput {
            name: "Asha".to_owned(),
            location: "Nashik".to_owned(),
            mobile: "9811111111".to_owned(),
            product: "Brake pads".to_owned(),
            amount: "320.5".to_owned(),
            gst: "12".to_owned(),
            datetime: "2026-03-10T18:45".to_owned(),
        };
        let bill = form.to_bill(
            BillId::new(9),
            datetime!(2026-04-01 00:00:00 UTC),
            ist()?,
        );
        assert_eq!(BillFormInput::from_bill(&bill, ist()?), form);
        Ok(())
    }

    #[test]
    fn out_of_range_local_datetime_falls_back_to_now() -> Result<()> {
        let now = datetime!(2026-02-01 09:15:00 UTC);
        for (raw, offset) in [
            ("9999-12-31T23:00", UtcOffset::from_hms(-5, 0, 0)?),
            ("0000-01-01T00:00", ist()?),
        ] {
            let form = BillFormInput {
                datetime: raw.to_owned(),
                ..BillFormInput::default()
            };
            let bill = form.to_bill(BillId::new(1), now, offset);
            assert_eq!(bill.datetime, now, "{raw}");
        }
        Ok(())
    }

    #[test]
    fn prefill_of_edge_year_keeps_stored_text() -> Result<()> {
        let bill = crate::Bill {
            datetime: datetime!(9999-12-31 23:59:59 UTC),
            ..BillFormInput::default().to_bill(
                BillId::new(1),
                datetime!(2026-02-01 09:15:00 UTC),
                UtcOffset::UTC,
            )
        };
        let form = BillFormInput::from_bill(&bill, ist()?);
        assert_eq!(form.datetime, "9999-12-31T23:59");
        Ok(())
    }

    #[test]
    fn parse_decimal_follows_leading_prefix() {
        assert_eq!(parse_decimal("12.5kg"), 12.5);
        assert_eq!(parse_decimal(" 7 "), 7.0);
        assert_eq!(parse_decimal("-3"), -3.0);
        assert_eq!(parse_decimal("1e3"), 1000.0);
        assert_eq!(parse_decimal("abc"), 0.0);
        assert_eq!(parse_decimal(""), 0.0);
        assert_eq!(parse_decimal("."), 0.0);
    }

    #[test]
    fn unparseable_datetime_is_none() -> Result<()> {
        assert!(parse_local_datetime("yesterday", ist()?).is_none());
        assert!(parse_local_datetime("   ", ist()?).is_none());
        assert!(parse_local_datetime("2026-01-05 10:00:30", ist()?).is_some());
        Ok(())
    }

    #[test]
    fn field_accessors_cover_every_field() {
        let mut form = BillFormInput::default();
        assert!(form.is_blank());
        for field in BillField::ALL {
            form.field_mut(field).push('x');
            assert_eq!(form.field(field), "x");
        }
        form.clear();
        assert!(form.is_blank());
    }
}
