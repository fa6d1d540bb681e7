//! Configuration profile handlers. These never touch the network.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use stowly_config::{
    config_path, load_config_or_default, save_config, store_token, Profile,
};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::active_profile_name;
use crate::error::CliError;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::SetToken => set_token(global),
        ConfigCommand::Path => {
            println!("{}", config_path().display());
            Ok(())
        }
    }
}

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let theme = ColorfulTheme::default();
    let mut cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let current_platform = cfg
        .profiles
        .get(&profile_name)
        .map(|p| p.platform.clone())
        .unwrap_or_else(|| "https://api.stowly.fr".into());

    let platform: String = Input::with_theme(&theme)
        .with_prompt("Platform API URL")
        .with_initial_text(current_platform)
        .interact_text()?;

    // Reject bad URLs before persisting them.
    let _: url::Url = platform.parse().map_err(|_| CliError::Validation {
        field: "platform".into(),
        reason: format!("invalid URL: {platform}"),
    })?;

    cfg.profiles.insert(
        profile_name.clone(),
        Profile {
            platform,
            token: None,
            token_env: None,
            ca_cert: None,
            insecure: Some(global.insecure),
            timeout: Some(global.timeout),
        },
    );
    cfg.default_profile.get_or_insert(profile_name.clone());
    save_config(&cfg)?;

    println!("Profile '{profile_name}' saved to {}", config_path().display());
    println!("Store your auth token with: stowly config set-token");
    Ok(())
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    println!("Config file: {}", config_path().display());
    println!("Active profile: {profile_name}");

    match cfg.profiles.get(&profile_name) {
        Some(profile) => {
            println!("  platform: {}", profile.platform);
            println!(
                "  token: {}",
                if profile.token.is_some() {
                    "(plaintext in config -- prefer the keyring)"
                } else {
                    "(keyring / env)"
                }
            );
            if let Some(insecure) = profile.insecure {
                println!("  insecure: {insecure}");
            }
            if let Some(timeout) = profile.timeout {
                println!("  timeout: {timeout}s");
            }
            Ok(())
        }
        None => {
            let available = cfg
                .profiles
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::ProfileNotFound {
                name: profile_name,
                available,
            })
        }
    }
}

fn set_token(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let token = rpassword::prompt_password("Auth token (input hidden): ")?;
    if token.trim().is_empty() {
        return Err(CliError::Validation {
            field: "token".into(),
            reason: "the token cannot be empty".into(),
        });
    }

    store_token(&profile_name, token.trim())?;
    println!("Token stored in the system keyring for profile '{profile_name}'.");
    Ok(())
}
