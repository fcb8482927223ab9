// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use bahi_app::{BILLS_KEY, Bill, BillId, BillStorage, THEME_KEY, Theme};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::datetime;
use tracing::{debug, warn};

pub const APP_NAME: &str = "bahi";

const KV_TABLE: &str = "kv";
const KV_COLUMNS: [&str; 3] = ["key", "value", "updated_at"];

/// Key-value slots in a single SQLite table. Every slot holds UTF-8 text.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open database at {}", path.display()))?;
        configure_connection(&conn)?;
        debug!(path = %path.display(), "opened database");
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        if has_user_tables(&self.conn)? {
            validate_schema(&self.conn)?;
        } else {
            self.conn
                .execute_batch(include_str!("sql/schema.sql"))
                .context("create schema")?;
        }
        Ok(())
    }

    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("read slot {key}"))
    }

    /// Overwrites the whole slot in one statement.
    pub fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO kv (key, value, updated_at)
                VALUES (?, ?, ?)
                ON CONFLICT(key) DO UPDATE SET
                  value = excluded.value,
                  updated_at = excluded.updated_at
                ",
                params![key, value, now],
            )
            .with_context(|| format!("write slot {key}"))?;
        Ok(())
    }

    pub fn load_theme(&self) -> Theme {
        match self.get_raw(THEME_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "unknown persisted theme; using light");
                Theme::Light
            }),
            Ok(None) => Theme::Light,
            Err(error) => {
                warn!(error = %format!("{error:#}"), "theme read failed; using light");
                Theme::Light
            }
        }
    }

    /// Like [`Store::load_theme`] but `None` when nothing has been persisted.
    pub fn persisted_theme(&self) -> Result<Option<Theme>> {
        Ok(self
            .get_raw(THEME_KEY)?
            .and_then(|raw| Theme::parse(&raw)))
    }

    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        self.put_raw(THEME_KEY, theme.as_str())?;
        debug!(theme = theme.as_str(), "persisted theme");
        Ok(())
    }

    /// Fills an empty bill slot with a handful of sample bills.
    pub fn seed_demo_bills(&self) -> Result<usize> {
        if !self.load_bills().is_empty() {
            return Ok(0);
        }
        let bills = demo_bills();
        self.save_bills(&bills)?;
        debug!(count = bills.len(), "seeded demo bills");
        Ok(bills.len())
    }
}

impl BillStorage for Store {
    fn load_bills(&self) -> Vec<Bill> {
        let raw = match self.get_raw(BILLS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(error) => {
                warn!(error = %format!("{error:#}"), "bill slot read failed; starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Bill>>(&raw) {
            Ok(bills) => bills,
            Err(error) => {
                warn!(%error, "malformed bill data; starting empty");
                Vec::new()
            }
        }
    }

    fn save_bills(&self, bills: &[Bill]) -> Result<()> {
        let raw = serde_json::to_string(bills).context("serialize bills")?;
        self.put_raw(BILLS_KEY, &raw)
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("BAHI_DB_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set BAHI_DB_PATH to a writable database path")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir.join("bahi.db"))
}

pub fn validate_db_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("database path must not be empty");
    }
    if path == ":memory:" {
        return Ok(());
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "database path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("database path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    if path.contains('?') {
        bail!(
            "database path {path:?} contains '?'; remove query parameters and use a plain file path"
        );
    }

    Ok(())
}

fn demo_bills() -> Vec<Bill> {
    let rows = [
        (
            1_767_587_400_101,
            "Ravi Kumar",
            "Pune",
            "9800000000",
            "Chain set",
            150.0,
            5.0,
            datetime!(2026-01-05 04:30:00 UTC),
        ),
        (
            1_767_691_800_202,
            "Asha Patil",
            "Nashik",
            "9811111111",
            "Brake pads",
            320.5,
            12.0,
            datetime!(2026-01-06 09:30:00 UTC),
        ),
        (
            1_767_794_400_303,
            "Imran Shaikh",
            "Satara",
            "9822222222",
            "Tube + puncture kit",
            85.0,
            0.0,
            datetime!(2026-01-07 14:00:00 UTC),
        ),
        (
            1_767_880_800_404,
            "Meena Joshi",
            "Kolhapur",
            "9833333333",
            "Kids bicycle (16in)",
            4_250.0,
            18.0,
            datetime!(2026-01-08 14:00:00 UTC),
        ),
    ];

    rows.into_iter()
        .map(
            |(id, name, location, mobile, product, amount, gst, datetime)| Bill {
                id: BillId::new(id),
                name: name.to_owned(),
                location: location.to_owned(),
                mobile: mobile.to_owned(),
                product: product.to_owned(),
                amount,
                gst,
                datetime,
            },
        )
        .collect()
}

fn has_user_tables(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "
            SELECT COUNT(*)
            FROM sqlite_master
            WHERE type = 'table'
              AND name NOT LIKE 'sqlite_%'
            ",
            [],
            |row| row.get(0),
        )
        .context("count user tables")?;
    Ok(count > 0)
}

fn validate_schema(conn: &Connection) -> Result<()> {
    let columns = table_columns(conn, KV_TABLE)?;
    if columns.is_empty() {
        bail!(
            "database has no `{KV_TABLE}` table; point [storage].db_path or BAHI_DB_PATH at a bahi database"
        );
    }

    let missing: Vec<&str> = KV_COLUMNS
        .iter()
        .copied()
        .filter(|column| !columns.contains(*column))
        .collect();
    if !missing.is_empty() {
        bail!(
            "table `{KV_TABLE}` is missing required columns: {}; use a fresh database file",
            missing.join(", ")
        );
    }
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .with_context(|| format!("inspect columns for {table}"))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .with_context(|| format!("query column info for {table}"))?;

    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .with_context(|| format!("collect columns for {table}"))
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}

fn now_rfc3339() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format current timestamp")
}
