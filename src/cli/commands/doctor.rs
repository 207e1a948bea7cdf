//! Doctor command - verify credentials and configuration.

use crate::cli::Output;
use crate::config::{
    CredentialLoader, CredentialSource, Secret, Settings, NASA_ENV_VAR, NASA_STORE_KEY,
    OPENAI_ENV_VAR, OPENAI_STORE_KEY,
};
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Stargazer Doctor");
    println!();

    let loader = CredentialLoader::from_settings(settings);
    let mut checks = Vec::new();

    println!("{}", style("Credentials").bold());
    checks.push(check_secret_store(&loader, settings));
    checks.push(check_credential(&loader, OPENAI_STORE_KEY, OPENAI_ENV_VAR));
    checks.push(check_nasa_credential(&loader));
    for check in &checks {
        check.print();
    }

    println!();

    println!("{}", style("Endpoints").bold());
    Output::kv("Model", &settings.llm.model);
    Output::kv("LLM API", &settings.llm.api_base);
    Output::kv("APOD API", &settings.apod.base_url);
    Output::kv("Strategy", &settings.agent.strategy.to_string());

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path);
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Stargazer.",
            errors
        ));
        anyhow::bail!("{} doctor check(s) failed", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Stargazer is ready to use.");
    }

    Ok(())
}

fn check_secret_store(loader: &CredentialLoader, settings: &Settings) -> CheckResult {
    match loader.store_location() {
        Some(location) => CheckResult::ok("Secret store", &location),
        None => CheckResult::warning(
            "Secret store",
            &format!("{} not found, using environment", settings.secrets_path().display()),
            "Optional: create it with open_ai_key = \"...\" and nasa_api_key = \"...\"",
        ),
    }
}

fn check_credential(loader: &CredentialLoader, store_key: &str, env_var: &str) -> CheckResult {
    match loader.lookup(store_key, env_var) {
        Ok((secret, source)) => CheckResult::ok(env_var, &describe(&secret, source)),
        Err(_) => CheckResult::error(
            env_var,
            "not set",
            &format!("Set with: export {}='...' or add {} to the secrets file", env_var, store_key),
        ),
    }
}

fn check_nasa_credential(loader: &CredentialLoader) -> CheckResult {
    match loader.lookup(NASA_STORE_KEY, NASA_ENV_VAR) {
        Ok((secret, _)) if secret.expose() == "DEMO_KEY" => CheckResult::warning(
            NASA_ENV_VAR,
            "using DEMO_KEY",
            "DEMO_KEY is heavily rate limited. Get a free key at https://api.nasa.gov",
        ),
        _ => check_credential(loader, NASA_STORE_KEY, NASA_ENV_VAR),
    }
}

fn describe(secret: &Secret, source: CredentialSource) -> String {
    format!("configured via {} ({})", source, mask(secret.expose()))
}

/// Mask a secret for display, keeping only a short prefix and suffix.
fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 12 {
        return "****".to_string();
    }
    let prefix: String = chars[..3].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", prefix, suffix)
}

/// Check if config file exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            &format!("Create {} to override settings", config_path.display()),
        )
    }
}
