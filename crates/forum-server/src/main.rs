// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Forum server administration binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use forum_server::{build_service, commands, init_tracing, open_database, version};

/// forum-server - administer a forum database.
#[derive(Parser, Debug)]
#[command(name = "forum-server", about = "Forum server administration", version)]
struct Args {
	/// Config file to read instead of /etc/forum/server.toml
	#[arg(long, global = true, env = "FORUM_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
	/// Apply the database schema
	Migrate,
	/// Create an administrator account
	CreateAdmin {
		#[arg(long)]
		username: String,
		#[arg(long)]
		email: String,
		#[arg(long, env = "FORUM_ADMIN_PASSWORD", hide_env_values = true)]
		password: String,
	},
	/// Log in and print a bearer token
	Login {
		#[arg(long)]
		username: String,
		#[arg(long, env = "FORUM_PASSWORD", hide_env_values = true)]
		password: String,
	},
	/// Show the account behind a token
	Whoami {
		#[arg(long, env = "FORUM_TOKEN", hide_env_values = true)]
		token: String,
	},
	/// Set a user's permission level (0-3) on a category
	Grant {
		#[arg(long)]
		category: i64,
		#[arg(long)]
		user: i64,
		#[arg(long)]
		level: i64,
		#[arg(long, env = "FORUM_TOKEN", hide_env_values = true)]
		token: String,
	},
	/// Lock a topic against new replies
	LockTopic {
		#[arg(long)]
		topic: i64,
		#[arg(long, env = "FORUM_TOKEN", hide_env_values = true)]
		token: String,
	},
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	if let Command::Version = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => forum_server_config::load_config_with_file(path.clone())?,
		None => forum_server_config::load_config()?,
	};
	init_tracing(&config.logging)?;

	tracing::debug!(database = %config.database.url, "opening database");
	let pool = open_database(&config).await?;

	let output = {
		let service = build_service(&config, pool.clone())?;
		match args.command {
			Command::Version => version::format_version_info(),
			Command::Migrate => "migrations applied".to_string(),
			Command::CreateAdmin {
				username,
				email,
				password,
			} => commands::create_admin(&service, &username, &email, &password).await?,
			Command::Login { username, password } => {
				commands::login(&service, &username, &password).await?
			}
			Command::Whoami { token } => commands::whoami(&service, &token).await?,
			Command::Grant {
				category,
				user,
				level,
				token,
			} => commands::grant(&service, &token, category, user, level).await?,
			Command::LockTopic { topic, token } => {
				commands::lock_topic(&service, &token, topic).await?
			}
		}
	};

	pool.close().await;
	println!("{output}");
	Ok(())
}
