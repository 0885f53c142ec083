//! SQLite-backed settings adapter
//!
//! Every namespace is one row: the flat JSON object of its values, the schema
//! version it was written under and the time of the last write.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

mod schema;

use std::path::Path;

use async_trait::async_trait;
use sqlx::{
	Row,
	sqlite::{self, SqlitePool, SqliteRow},
};

use ssa::{
	prelude::*,
	settings_adapter::{SettingsAdapter, StoredNamespace},
};

/// Database file created inside the configured directory
pub const DB_FILE_NAME: &str = "settings.db";

fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

fn parse_row(namespace: &str, row: &SqliteRow) -> ClResult<StoredNamespace> {
	let version: Option<String> =
		row.try_get("version").inspect_err(inspect).map_err(|_| Error::DbError)?;
	let value: String = row.try_get("value").inspect_err(inspect).map_err(|_| Error::DbError)?;
	let updated_at: i64 =
		row.try_get("updated_at").inspect_err(inspect).map_err(|_| Error::DbError)?;

	let values = match serde_json::from_str::<serde_json::Value>(&value) {
		Ok(serde_json::Value::Object(values)) => values,
		_ => {
			warn!("Stored settings of '{}' are not a JSON object", namespace);
			return Err(Error::DbError);
		}
	};

	Ok(StoredNamespace {
		version: version.map(String::into_boxed_str),
		values,
		updated_at: Timestamp(updated_at),
	})
}

#[derive(Debug)]
pub struct SettingsAdapterSqlite {
	db: SqlitePool,
}

impl SettingsAdapterSqlite {
	/// Open (or create) the settings database inside `dir`
	pub async fn new(dir: impl AsRef<Path>) -> ClResult<Self> {
		let dir = dir.as_ref();
		tokio::fs::create_dir_all(dir).await?;

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(dir.join(DB_FILE_NAME))
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		schema::init_db(&db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;
		info!("Settings database opened at {}", dir.display());

		Ok(Self { db })
	}
}

#[async_trait]
impl SettingsAdapter for SettingsAdapterSqlite {
	async fn read_namespace(&self, namespace: &str) -> ClResult<Option<StoredNamespace>> {
		let row = sqlx::query("SELECT version, value, updated_at FROM settings WHERE namespace = ?")
			.bind(namespace)
			.fetch_optional(&self.db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		row.map(|row| parse_row(namespace, &row)).transpose()
	}

	async fn update_namespace(&self, namespace: &str, data: &StoredNamespace) -> ClResult<()> {
		let value = serde_json::to_string(&data.values)?;
		sqlx::query(
			"INSERT INTO settings (namespace, version, value, updated_at) VALUES (?, ?, ?, ?)
			ON CONFLICT(namespace) DO UPDATE SET
				version = excluded.version, value = excluded.value, updated_at = excluded.updated_at",
		)
		.bind(namespace)
		.bind(data.version.as_deref())
		.bind(value)
		.bind(data.updated_at.0)
		.execute(&self.db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

		debug!("Stored settings namespace '{}'", namespace);
		Ok(())
	}

	async fn list_namespaces(&self) -> ClResult<Vec<Box<str>>> {
		let rows = sqlx::query("SELECT namespace FROM settings ORDER BY namespace")
			.fetch_all(&self.db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		rows.iter()
			.map(|row| {
				row.try_get::<String, _>("namespace")
					.map(String::into_boxed_str)
					.inspect_err(inspect)
					.map_err(|_| Error::DbError)
			})
			.collect()
	}
}

// vim: ts=4
