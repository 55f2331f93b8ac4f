pub mod catalog;
pub mod db;
pub mod db_reset;
pub mod generate_secret;
pub mod migrate;
pub mod serve;
pub mod version;
