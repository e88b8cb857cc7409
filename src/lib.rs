pub mod cli;
pub mod config;
pub mod counts;
pub mod display;
pub mod filter;

use anyhow::Context;
use log::{debug, info};

pub use cli::{ColorMode, Commands, OutputFormat, PageArgs, cli_parse};
pub use config::{FilterConfig, load_config};
pub use counts::{CollectionCounts, CountsError};
pub use filter::{Filter, FilterError, FilterTerm, FilterValue, NamedFilter, Relation, SortOrder};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG still wins when set
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn print_filter(filter: &Filter, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", filter.to_filter_string()),
        OutputFormat::Json => println!("{}", display::format_filter_json(filter)),
    }
}

fn page(args: &PageArgs, filter: &Filter) -> Filter {
    if args.next {
        filter.next_page()
    } else if args.previous {
        filter.previous_page()
    } else if args.all {
        filter.all()
    } else {
        filter.first_page()
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    init_logging(cli.verbose);

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let config = load_config(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(path) = &cli.config {
        info!("using config {}", path.display());
    }
    let format = cli.format;

    match &cli.command {
        Commands::Parse { filter } => {
            let filter = Filter::from_string(filter);
            match format {
                OutputFormat::Text => print!("{}", display::format_terms_text(&filter)),
                OutputFormat::Json => println!("{}", display::format_terms_json(&filter)),
            }
        }
        Commands::Normalize { filter } => {
            print_filter(&Filter::from_string(filter), format);
        }
        Commands::Combine { left, right, or } => {
            let left = Filter::from_string(left);
            let right = Filter::from_string(right);
            let combined = if *or { left.or(&right) } else { left.and(&right) };
            print_filter(&combined, format);
        }
        Commands::Set {
            filter,
            keyword,
            value,
            relation,
        } => {
            let relation: Relation = relation
                .parse()
                .with_context(|| format!("Invalid relation for keyword '{keyword}'"))?;
            let updated = Filter::from_string(filter).set(
                keyword,
                FilterValue::from_raw(value),
                relation,
            );
            print_filter(&updated, format);
        }
        Commands::Delete { filter, keyword } => {
            print_filter(&Filter::from_string(filter).delete(keyword), format);
        }
        Commands::Page(args) => {
            let filter = Filter::from_string(&args.filter);
            print_filter(&page(args, &filter), format);
        }
        Commands::Defaults {
            resource_type,
            filter,
        } => {
            let user = filter.as_deref().map(Filter::from_string);
            debug!("resolving defaults for {resource_type}");
            print_filter(&config.resolve(resource_type, user.as_ref()), format);
        }
    }

    Ok(())
}
