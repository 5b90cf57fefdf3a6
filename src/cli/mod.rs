pub mod args;
pub mod shell;

pub use args::{CliArgs, Command};

use std::path::PathBuf;

use tokio::io::BufReader;
use tracing::{error, info};

use crate::app_system::AdminSystem;
use crate::config::{default_config_path, load_config, AdminConfig};
use crate::controller::{FailurePolicy, PageController};
use crate::domain::ProductFields;
use crate::error::ConfigError;
use crate::renderer::{ListingState, Renderer, TerminalRenderer};
use crate::view_state::{Filters, SortKey};

/// Config file first, then command-line overrides.
pub fn resolve_config(args: &CliArgs) -> Result<AdminConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(&PathBuf::from(path), false)?,
        None => match default_config_path() {
            Some(path) => load_config(&path, true)?,
            None => AdminConfig::default(),
        },
    };

    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if args.strict {
        config.failure_policy = FailurePolicy::Strict;
    }
    config.validate()?;
    Ok(config)
}

pub async fn run(args: CliArgs) -> Result<(), String> {
    let config = resolve_config(&args).map_err(|e| e.to_string())?;
    info!(base_url = %config.base_url, policy = ?config.failure_policy, "Configuration loaded");

    let system = AdminSystem::new(config).map_err(|e| e.to_string())?;
    let mut controller = system.controller(TerminalRenderer::stdout(!args.no_color));

    let result = execute(&mut controller, args.command).await;

    system.shutdown().await?;
    result
}

/// Runs one command against the controller.
pub async fn execute<R: Renderer>(
    controller: &mut PageController<R>,
    command: Command,
) -> Result<(), String> {
    match command {
        Command::List { page } => controller.load(page).await,
        Command::Show { id } => controller.open_edit(id).await,
        Command::Filter {
            search,
            category,
            sort,
        } => {
            let sort_key = sort
                .as_deref()
                .unwrap_or_default()
                .parse::<SortKey>()
                .map_err(|e| e.to_string())?;
            let filters = Filters {
                search_query: search.unwrap_or_default(),
                selected_category: category.unwrap_or_default(),
                sort_key,
            };
            controller.set_filters(filters).await;
        }
        Command::Categories => controller.load_categories().await,
        Command::Add { fields } => {
            let form = parse_fields(&fields)?;
            controller.open_add();
            controller.submit(form).await;
        }
        Command::Update { id, fields } => {
            let form = parse_fields(&fields)?;
            controller.open_edit(id).await;
            controller.submit(form).await;
        }
        Command::Delete { id } => controller.delete(id).await,
        Command::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            shell::run_shell(controller, stdin)
                .await
                .map_err(|e| e.to_string())?;
        }
    }

    if controller.listing() == ListingState::Error {
        error!("Command finished in the error state");
        return Err("Failed to load products".to_string());
    }
    Ok(())
}

fn parse_fields(fields: &[String]) -> Result<ProductFields, String> {
    ProductFields::from_pairs(fields.iter().map(String::as_str)).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        use clap::Parser;
        let mut argv = vec!["product-admin", "--config", "/nonexistent/cfg.yml"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = resolve_config(&args(&["list"])).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn flags_override_defaults() {
        use clap::Parser;
        let path = std::env::temp_dir()
            .join(format!("product-admin-flags-{}.yml", std::process::id()));
        std::fs::write(&path, "products_per_page: 25\n").unwrap();
        let config_path = path.display().to_string();

        let args = CliArgs::parse_from([
            "product-admin",
            "--config",
            config_path.as_str(),
            "--base-url",
            "http://localhost:3000",
            "--strict",
            "categories",
        ]);
        let config = resolve_config(&args);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.failure_policy, FailurePolicy::Strict);
        assert_eq!(config.products_per_page, 25);
    }

    #[test]
    fn field_parsing_reports_bad_input() {
        assert!(parse_fields(&["price=abc".to_string()]).is_err());
        let form = parse_fields(&["title=Lamp".to_string()]).unwrap();
        assert_eq!(form.title.as_deref(), Some("Lamp"));
    }
}
