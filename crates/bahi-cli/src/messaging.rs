// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use bahi_app::MessagingSurface;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crossterm::execute;
use crossterm::style::Print;
use std::io::{self, Write};
use tracing::debug;

/// Hands `sms:` links to the OS launcher and copies through the terminal.
pub struct SystemSurface<W: Write> {
    out: W,
}

impl SystemSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> SystemSurface<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> MessagingSurface for SystemSurface<W> {
    fn open_uri(&mut self, uri: &str) -> Result<()> {
        debug!(len = uri.len(), "opening sms uri");
        open::that(uri).context("launch sms handler")
    }

    fn copy_text(&mut self, text: &str) -> Result<()> {
        execute!(self.out, Print(osc52_sequence(text))).context("write clipboard sequence")?;
        self.out.flush().context("flush clipboard sequence")
    }
}

/// OSC 52 "set clipboard" escape understood by most terminal emulators.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}
