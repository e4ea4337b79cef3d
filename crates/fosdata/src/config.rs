//! CLI configuration: `fosdata_config` plus `GlobalOpts` flag overrides
//! (--host, --token, --vdom, ...).

use secrecy::SecretString;

use fosdata_config::{Config, Profile};
use fosdata_core::ApplianceConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Build the appliance connection settings for a read.
///
/// Flag values take priority over the profile. Without a profile the
/// flags alone must name a host.
pub fn resolve_appliance(global: &GlobalOpts) -> Result<(ApplianceConfig, String), CliError> {
    let cfg = fosdata_config::load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.host.is_some() => Profile::default(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                available: available_profiles(&cfg),
                name: profile_name,
            });
        }
        None => {
            return Err(CliError::NoConfig {
                path: fosdata_config::config_path().display().to_string(),
            });
        }
    };
    apply_overrides(&mut profile, global);

    let token = match global.token {
        Some(ref token) => SecretString::from(token.clone()),
        None => fosdata_config::resolve_token(&profile, &profile_name)?,
    };
    let appliance = fosdata_config::appliance_config(&profile, &cfg.defaults, token)?;
    Ok((appliance, profile_name))
}

/// Layer flag values onto a profile.
pub fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(ref vdom) = global.vdom {
        profile.vdom = Some(vdom.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if let Some(retries) = global.retries {
        profile.retries = Some(retries);
    }
}

pub fn available_profiles(cfg: &Config) -> String {
    let names = cfg.profile_names();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}
