use std::{
    error::Error,
    process::{self, Command},
};

use crate::config::DatabaseConfig;

pub fn handle_db_console_command(db_config: &DatabaseConfig) {
    if let Err(e) = open_console(db_config) {
        eprintln!("❌ Failed to open database console: {e}");
        process::exit(1);
    }
}

fn open_console(db_config: &DatabaseConfig) -> Result<(), Box<dyn Error>> {
    // SQLite databases are opened with sqlite3, anything else goes to psql.
    let (program, target) = if db_config.is_sqlite() {
        let path = db_config
            .url
            .trim_start_matches("sqlite://")
            .trim_start_matches("sqlite:");
        let path = path.split('?').next().unwrap_or(path);
        if path.contains(":memory:") {
            return Err("an in-memory SQLite database has nothing to open".into());
        }
        ("sqlite3", path.to_owned())
    } else {
        ("psql", db_config.url.clone())
    };

    println!("🗄️  Launching {program}...");
    let status = Command::new(program).arg(&target).status()?;

    if !status.success() {
        return Err(format!("{program} exited with code: {:?}", status.code()).into());
    }

    Ok(())
}
