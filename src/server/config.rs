pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
    pub valkey_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Ok(Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            database_url: std::env::var("DATABASE_URL")?,
            valkey_url: std::env::var("VALKEY_URL")?,
        })
    }
}
