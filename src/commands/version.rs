use std::env;

pub fn print_version_info() {
    let git_hash = option_env!("GIT_HASH").unwrap_or("unknown");
    let build_timestamp = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown");

    println!("📦 {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("📝 {}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("🔨 Build: {git_hash} ({build_timestamp})");
    println!("💻 Runtime: {} / {}", env::consts::OS, env::consts::ARCH);
}
