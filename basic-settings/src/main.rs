//! Print or update the global settings of a site
//!
//! Configuration comes from `SSA_*` environment variables.
//!
//! - no arguments: print the resolved global namespace as JSON
//! - `name=value ...`: save the arguments as a patch first; values are parsed
//!   as JSON and fall back to plain strings
//! - `appointment-type-created <id>`: fire the appointment type insert event,
//!   as the host does after creating one, then print the namespace

use std::env;
use std::sync::Arc;

use ssa_core::app::{AppBuilder, emit};
use ssa_core::config::HostConfig;
use ssa_core::events::{APPOINTMENT_TYPE_AFTER_INSERT, EntityEvent};
use ssa_core::settings::{NamespaceValues, SettingValue};
use ssa_core::timezone::ChronoTzDatabase;
use ssa_global::GLOBAL_SLUG;
use ssa_settings_adapter_sqlite::SettingsAdapterSqlite;
use ssa_types::prelude::*;

const APPOINTMENT_TYPE_CREATED: &str = "appointment-type-created";

#[derive(Debug, PartialEq)]
enum Command {
	Show,
	Update(NamespaceValues),
	AppointmentTypeCreated(u64),
}

fn parse_patch(args: impl Iterator<Item = String>) -> ClResult<NamespaceValues> {
	let mut patch = NamespaceValues::new();
	for arg in args {
		let Some((name, raw)) = arg.split_once('=') else {
			return Err(Error::ConfigError(format!("expected name=value, got '{}'", arg)));
		};
		let value = serde_json::from_str::<serde_json::Value>(raw)
			.unwrap_or_else(|_| serde_json::Value::String(raw.into()));
		patch.insert(name.into(), SettingValue::from(value));
	}
	Ok(patch)
}

fn parse_command(args: &[String]) -> ClResult<Command> {
	match args {
		[] => Ok(Command::Show),
		[cmd, id] if cmd == APPOINTMENT_TYPE_CREATED => id
			.parse::<u64>()
			.map(Command::AppointmentTypeCreated)
			.map_err(|_| Error::ConfigError(format!("invalid appointment type id '{}'", id))),
		[cmd, ..] if cmd == APPOINTMENT_TYPE_CREATED => Err(Error::ConfigError(format!(
			"usage: {} <id>",
			APPOINTMENT_TYPE_CREATED
		))),
		_ => parse_patch(args.iter().cloned()).map(Command::Update),
	}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ClResult<()> {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let config = HostConfig::from_env();
	let command = parse_command(&env::args().skip(1).collect::<Vec<_>>())?;

	let adapter = Arc::new(SettingsAdapterSqlite::new(&config.db_dir).await?);
	let mut builder = AppBuilder::new(Arc::new(config), adapter);
	ssa_global::register(&mut builder, Arc::new(ChronoTzDatabase))?;
	let app = builder.build()?;

	// the local operator acts as site administrator
	let auth = Auth::system();
	let global = match command {
		Command::Show => app.settings.get_namespace(GLOBAL_SLUG, &auth).await?,
		Command::Update(patch) => app.settings.update(GLOBAL_SLUG, patch, &auth).await?,
		Command::AppointmentTypeCreated(id) => {
			let event = EntityEvent { id, ..EntityEvent::default() };
			emit(&app, APPOINTMENT_TYPE_AFTER_INSERT, event).await;
			app.settings.get_namespace(GLOBAL_SLUG, &auth).await?
		}
	};

	println!("{}", serde_json::to_string_pretty(&global)?);
	Ok(())
}


// vim: ts=4
