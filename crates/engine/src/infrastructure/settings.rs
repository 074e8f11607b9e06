//! Engine configuration read from the environment.
//!
//! | Variable                    | Default   |
//! |-----------------------------|-----------|
//! | `SERVER_HOST`               | `0.0.0.0` |
//! | `SERVER_PORT` / `PORT`      | `3000`    |
//! | `HERO_DEFAULT_SKILL_POINTS` | `50`      |
//! | `HERO_SEED_DEFAULT_SKILLS`  | `true`    |
//! | `CHAT_LOG_CAPACITY`         | `200`     |
//! | `CORS_ALLOWED_ORIGINS`      | unset     |
//!
//! Unparseable values fall back to the default with a warning.

use std::str::FromStr;

/// Defaults applied when an actor is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorDefaults {
    /// Skill-point budget when the request does not name one
    pub skill_points_total: i32,
    /// Give new heroes without items the starter skill set
    pub seed_default_skills: bool,
}

impl Default for ActorDefaults {
    fn default() -> Self {
        Self {
            skill_points_total: 50,
            seed_default_skills: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub actor_defaults: ActorDefaults,
    pub chat_log_capacity: usize,
    pub cors_allowed_origins: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            actor_defaults: ActorDefaults::default(),
            chat_log_capacity: 200,
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or(
                "SERVER_PORT",
                get("SERVER_PORT").or_else(|| get("PORT")),
                defaults.server_port,
            ),
            actor_defaults: ActorDefaults {
                skill_points_total: parse_or(
                    "HERO_DEFAULT_SKILL_POINTS",
                    get("HERO_DEFAULT_SKILL_POINTS"),
                    defaults.actor_defaults.skill_points_total,
                ),
                seed_default_skills: get("HERO_SEED_DEFAULT_SKILLS")
                    .map(|v| match parse_flag(&v) {
                        Some(flag) => flag,
                        None => {
                            tracing::warn!(
                                key = "HERO_SEED_DEFAULT_SKILLS",
                                value = %v,
                                "Invalid boolean, using default"
                            );
                            defaults.actor_defaults.seed_default_skills
                        }
                    })
                    .unwrap_or(defaults.actor_defaults.seed_default_skills),
            },
            chat_log_capacity: parse_or(
                "CHAT_LOG_CAPACITY",
                get("CHAT_LOG_CAPACITY"),
                defaults.chat_log_capacity,
            ),
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS"),
        }
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(
    key: &str,
    raw: Option<String>,
    default: T,
) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(
                key = %key,
                value = %raw,
                default = %default,
                "Invalid value, using default"
            );
            default
        }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
