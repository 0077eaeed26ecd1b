use std::path::PathBuf;

use chrono::Datelike;

/// Application-level constants
pub const APP_NAME: &str = "Taxfolio";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default port for the portal API server.
pub const DEFAULT_PORT: u16 = 7150;

/// Get the application data directory.
/// `~/Taxfolio/` unless overridden via TAXFOLIO_DATA_DIR.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TAXFOLIO_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Taxfolio")
}

/// Path of the SQLite database file.
pub fn database_path() -> PathBuf {
    data_dir().join("taxfolio.db")
}

/// Port the API server binds, TAXFOLIO_PORT or the default.
pub fn server_port() -> u16 {
    std::env::var("TAXFOLIO_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Tax year assumed when a request does not name one.
pub fn current_tax_year() -> i32 {
    chrono::Utc::now().year()
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "taxfolio=info,tower_http=warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_path_under_data_dir() {
        let db = database_path();
        assert!(db.starts_with(data_dir()));
        assert!(db.ends_with("taxfolio.db"));
    }

    #[test]
    fn app_name_is_taxfolio() {
        assert_eq!(APP_NAME, "Taxfolio");
    }

    #[test]
    fn current_tax_year_is_plausible() {
        let year = current_tax_year();
        assert!((2020..2100).contains(&year));
    }
}
