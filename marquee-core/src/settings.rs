use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// How long a fresh hold withholds its seats, and how long a
    /// confirmation re-arms the lock for.
    #[serde(default = "default_hold_ttl")]
    pub hold_ttl_seconds: u64,
}

fn default_hold_ttl() -> u64 {
    600
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            hold_ttl_seconds: default_hold_ttl(),
        }
    }
}

impl Settings {
    /// Layered load: optional `config/default` file, then `MARQUEE__`
    /// environment overrides (e.g. `MARQUEE__BUSINESS_RULES__HOLD_TTL_SECONDS=300`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("MARQUEE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_ttl_defaults_to_ten_minutes() {
        let settings = Settings::default();
        assert_eq!(settings.business_rules.hold_ttl_seconds, 600);
    }
}
