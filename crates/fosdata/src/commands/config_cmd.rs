//! Config subcommand handlers.

use serde::Serialize;
use tabled::Tabled;

use fosdata_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

// ── Profile view ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ProfileView {
    profile: String,
    default: bool,
    #[serde(flatten)]
    settings: Profile,
}

#[derive(Tabled)]
struct SettingRow {
    #[tabled(rename = "Setting")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(name: &'static str, value: Option<String>) -> SettingRow {
    SettingRow {
        name,
        value: value.unwrap_or_else(|| "-".into()),
    }
}

fn render_profile(view: &ProfileView) -> String {
    let p = &view.settings;
    let rows = vec![
        row("profile", Some(view.profile.clone())),
        row("host", Some(p.host.clone())),
        row("vdom", p.vdom.clone()),
        row("token", p.token.clone()),
        row("token_env", p.token_env.clone()),
        row(
            "ca_cert",
            p.ca_cert.as_ref().map(|c| c.display().to_string()),
        ),
        row("insecure", p.insecure.map(|v| v.to_string())),
        row("timeout", p.timeout.map(|v| v.to_string())),
        row("retries", p.retries.map(|v| v.to_string())),
    ];
    output::render_table(&rows)
}

/// Active profile with flag overrides applied and the token masked.
fn profile_view(cfg: &Config, global: &GlobalOpts) -> Result<ProfileView, CliError> {
    let name = config::active_profile_name(global, cfg);
    let mut settings = match cfg.profiles.get(&name) {
        Some(profile) => profile.clone(),
        None if global.host.is_some() => Profile::default(),
        None => {
            return Err(CliError::ProfileNotFound {
                available: config::available_profiles(cfg),
                name,
            });
        }
    };
    config::apply_overrides(&mut settings, global);
    if settings.token.is_some() {
        settings.token = Some(REDACTED.into());
    }
    Ok(ProfileView {
        default: cfg.default_profile.as_deref() == Some(name.as_str()),
        profile: name,
        settings,
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            let path = fosdata_config::config_path();
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = fosdata_config::load_config()?;
            let view = profile_view(&cfg, global)?;
            let out = output::render_single(&global.output, &view, render_profile, |v| {
                v.profile.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = fosdata_config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);

            let field = cfg
                .profiles
                .entry(profile_name.clone())
                .or_default()
                .set_field(&key, value)?;

            fosdata_config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Set {field} on profile '{profile_name}'");
            }
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = fosdata_config::load_config()?;
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: fosdata config set host <address>");
            } else {
                let lines: Vec<String> = cfg
                    .profile_names()
                    .into_iter()
                    .map(|name| {
                        let marker = if name == default { " *" } else { "" };
                        format!("{name}{marker}")
                    })
                    .collect();
                output::print_output(&lines.join("\n"), global.quiet);
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = fosdata_config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            fosdata_config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }

        // ── SetToken ────────────────────────────────────────────────
        ConfigCommand::SetToken { profile } => {
            let cfg = fosdata_config::load_config()?;
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name: profile_name,
                });
            }

            let token = rpassword::prompt_password("API token: ")?;
            if token.is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "value cannot be empty".into(),
                });
            }

            fosdata_config::store_token(&profile_name, &token)?;
            if !global.quiet {
                eprintln!("✓ Token stored in system keyring for profile '{profile_name}'");
            }
            Ok(())
        }
    }
}
