use std::env;

/// Default upstream serving the `[{date, weather}]` feed used when creating
/// tasks.
const DEFAULT_WEATHER_URL: &str = "https://f-api.github.io/f-api/weather.json";

pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub weather_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .expect("TOKEN_TTL_SECS must be a number"),
            weather_url: env::var("WEATHER_URL").unwrap_or_else(|_| DEFAULT_WEATHER_URL.to_string()),
        }
    }

    pub fn server_addr(&self) -> (String, u16) {
        (self.server_host.clone(), self.server_port)
    }
}
