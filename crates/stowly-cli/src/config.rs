//! Profile resolution with CLI flag overrides.
//!
//! Wraps `stowly-config` with `GlobalOpts`-aware precedence: explicit
//! flags beat the profile, which beats built-in defaults.

use std::time::Duration;

use secrecy::SecretString;

use stowly_config::{load_config_or_default, Config};
use stowly_core::{PlatformConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The profile name in effect: flag > config default > "default".
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `PlatformConfig` from the config file, profile, and CLI
/// overrides.
pub fn build_platform_config(global: &GlobalOpts) -> Result<PlatformConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    // Start from the profile when one exists.
    let mut platform = match cfg.profiles.get(&profile_name) {
        Some(profile) => stowly_config::profile_to_platform_config(profile, &profile_name)?,
        None => {
            // No profile -- the platform URL must come from a flag/env.
            let Some(ref url_str) = global.platform else {
                return Err(CliError::NoConfig {
                    path: stowly_config::config_path().display().to_string(),
                });
            };
            let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
                field: "platform".into(),
                reason: format!("invalid URL: {url_str}"),
            })?;
            PlatformConfig {
                url,
                ..PlatformConfig::default()
            }
        }
    };

    // CLI flag overrides.
    if let Some(ref url_str) = global.platform {
        platform.url = url_str.parse().map_err(|_| CliError::Validation {
            field: "platform".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
    }
    if let Some(ref token) = global.token {
        platform.auth_token = Some(SecretString::from(token.clone()));
    }
    if global.insecure {
        platform.tls = TlsVerification::DangerAcceptInvalid;
    }
    platform.timeout = Duration::from_secs(global.timeout);

    Ok(platform)
}
