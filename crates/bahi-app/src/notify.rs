// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use time::UtcOffset;
use tracing::warn;

use crate::{Bill, format_amount, format_local, format_number};

pub const DEFAULT_SHOP_NAME: &str = "BABI BAHI CYCLE STORE";
pub const DEFAULT_OWNER_CONTACT: &str = "+917000000000";

pub const SMS_HANDOFF_NOTICE: &str = "SMS composer opened";
pub const CLIPBOARD_FALLBACK_NOTICE: &str =
    "SMS composer could not be opened. Message copied to clipboard.";
pub const MESSAGING_UNAVAILABLE_NOTICE: &str =
    "SMS composer could not be opened and the clipboard is unavailable; copy the preview manually.";

// Same unreserved set as JavaScript's encodeURIComponent.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    Ios,
    Android,
    Desktop,
}

// Apple's Messages only reads the body after `&`; everyone else uses a query.
const BODY_SEPARATORS: [(PlatformFamily, &str); 3] = [
    (PlatformFamily::Ios, "&body="),
    (PlatformFamily::Android, "?body="),
    (PlatformFamily::Desktop, "?body="),
];

impl PlatformFamily {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Desktop => "desktop",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ios" => Some(Self::Ios),
            "android" => Some(Self::Android),
            "desktop" => Some(Self::Desktop),
            _ => None,
        }
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "ios" => Self::Ios,
            "android" => Self::Android,
            _ => Self::Desktop,
        }
    }

    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn body_separator(self) -> &'static str {
        BODY_SEPARATORS
            .iter()
            .find(|(family, _)| *family == self)
            .map(|(_, separator)| *separator)
            .unwrap_or("?body=")
    }
}

pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

pub fn sms_uri(recipient: &str, body: &str, platform: PlatformFamily) -> String {
    format!(
        "sms:{}{}{}",
        encode_uri_component(recipient),
        platform.body_separator(),
        encode_uri_component(body)
    )
}

/// A composed reminder. The preview names the customer; the handoff always
/// goes to the owner contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsDraft {
    pub preview_recipient: String,
    pub recipient: String,
    pub message: String,
}

impl SmsDraft {
    pub fn preview_text(&self) -> String {
        format!("To: {}\n\n{}", self.preview_recipient, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composer {
    shop_name: String,
    owner_contact: String,
    offset: UtcOffset,
}

impl Composer {
    pub fn new(
        shop_name: impl Into<String>,
        owner_contact: impl Into<String>,
        offset: UtcOffset,
    ) -> Self {
        Self {
            shop_name: shop_name.into(),
            owner_contact: owner_contact.into(),
            offset,
        }
    }

    pub fn shop_name(&self) -> &str {
        &self.shop_name
    }

    pub fn build_message(&self, bill: &Bill) -> String {
        [
            self.shop_name.clone(),
            format!("Customer: {}", bill.name),
            format!("Item: {}", bill.product),
            format!("Amount Due: {}", format_amount(bill.amount)),
            format!("GST: {}%", format_number(bill.gst)),
            format!("Date: {}", format_local(bill.datetime, self.offset)),
            format!("Please pay at earliest. Owner: {}", self.owner_contact),
        ]
        .join("\n")
    }

    pub fn draft(&self, bill: &Bill) -> SmsDraft {
        SmsDraft {
            preview_recipient: bill.mobile.clone(),
            recipient: self.owner_contact.clone(),
            message: self.build_message(bill),
        }
    }
}

/// Host capabilities for handing a message off to the user.
pub trait MessagingSurface {
    fn open_uri(&mut self, uri: &str) -> Result<()>;
    fn copy_text(&mut self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Handoff,
    CopiedToClipboard,
    Unavailable,
}

impl DispatchOutcome {
    pub const fn notice(self) -> &'static str {
        match self {
            Self::Handoff => SMS_HANDOFF_NOTICE,
            Self::CopiedToClipboard => CLIPBOARD_FALLBACK_NOTICE,
            Self::Unavailable => MESSAGING_UNAVAILABLE_NOTICE,
        }
    }
}

pub fn dispatch<M: MessagingSurface + ?Sized>(
    surface: &mut M,
    draft: &SmsDraft,
    platform: PlatformFamily,
) -> DispatchOutcome {
    let uri = sms_uri(&draft.recipient, &draft.message, platform);
    let open_error = match surface.open_uri(&uri) {
        Ok(()) => return DispatchOutcome::Handoff,
        Err(error) => error,
    };
    warn!(error = %open_error, platform = platform.as_str(), "sms handoff failed; copying to clipboard");

    match surface.copy_text(&draft.message) {
        Ok(()) => DispatchOutcome::CopiedToClipboard,
        Err(error) => {
            warn!(error = %error, "clipboard fallback failed");
            DispatchOutcome::Unavailable
        }
    }
}
