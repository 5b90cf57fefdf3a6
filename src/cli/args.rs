use clap::{ArgAction, Parser, Subcommand};

use crate::domain::ProductId;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "product-admin",
    version,
    about = "Browse and manage products of the demo product service",
    long_about = "Browse, filter, create, edit and delete products exposed by a dummyjson-style REST service.\n\nExamples:\n  product-admin list --page 2\n  product-admin filter --search phone --category smartphones --sort price-desc\n  product-admin add title=Lamp price=19.99 stock=12\n  product-admin shell"
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Increase log verbosity (-v, -vv, -vvv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to config file (defaults to ~/.product-admin/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "base-url",
        value_name = "URL",
        global = true,
        help = "Product service base URL (overrides the config file)."
    )]
    pub base_url: Option<String>,

    #[arg(
        long = "strict",
        global = true,
        help = "Report every failed request as an error instead of an empty result."
    )]
    pub strict: bool,

    #[arg(long = "no-color", global = true, help = "Disable colored output.")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show one page of products.
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show one product in the edit form.
    Show { id: ProductId },
    /// Search, narrow by category and sort.
    Filter {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long, value_name = "KEY", help = "e.g. price-desc, title-asc, stock-desc")]
        sort: Option<String>,
    },
    /// List category slugs.
    Categories,
    /// Create a product from key=value fields.
    Add {
        #[arg(required = true, value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    /// Update a product from key=value fields.
    Update {
        id: ProductId,
        #[arg(required = true, value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    /// Delete a product.
    Delete { id: ProductId },
    /// Read page events from stdin, one per line.
    Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from(["product-admin", "list", "--page", "3", "--strict", "-vv"]).unwrap();
        assert_eq!(args.command, Command::List { page: 3 });
        assert!(args.strict);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn parses_filter_and_mutation_commands() {
        let args = CliArgs::try_parse_from([
            "product-admin", "filter", "--search", "phone", "--category", "smartphones",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            Command::Filter {
                search: Some("phone".into()),
                category: Some("smartphones".into()),
                sort: None,
            }
        );

        let args = CliArgs::try_parse_from(["product-admin", "update", "5", "price=9.5"]).unwrap();
        assert_eq!(
            args.command,
            Command::Update { id: 5, fields: vec!["price=9.5".into()] }
        );

        assert!(CliArgs::try_parse_from(["product-admin", "add"]).is_err());
    }
}
