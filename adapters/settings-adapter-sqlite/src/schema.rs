//! Database schema initialization

use sqlx::SqlitePool;

pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Settings namespaces
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS settings (
			namespace text NOT NULL,
			version text,
			value text NOT NULL,
			updated_at integer NOT NULL DEFAULT (unixepoch()),
			PRIMARY KEY(namespace)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;
	Ok(())
}

// vim: ts=4
