use base64::{engine::general_purpose, Engine as _};
use rand::RngCore;

/// Prints a fresh 64-byte, base64 encoded signing secret as a config snippet.
pub fn handle_generate_secret_command() {
    let mut secret = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut secret);
    let encoded = general_purpose::STANDARD.encode(secret);

    println!("🔐 Generated JWT Secret:");
    println!();
    println!("jwt:");
    println!("  secret: \"{encoded}\"");
    println!("  access_expiration_minutes: 60");
    println!("  refresh_expiration_days: 7");
    println!();
    println!("Add this to config/{{environment}}.yaml or export APP_JWT__SECRET.");
}
