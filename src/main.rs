use clap::Parser;
use std::str::FromStr;
use tagdex::application::{
    BuildIndexService, BuildOptions, ConfigService, InitService, ListTagsService, ShowTagService,
};
use tagdex::cli::{format_build_summary, format_entry_list, format_tag_list, Cli, Commands};
use tagdex::domain::{IndexFormat, TagOrder};
use tagdex::error::TagdexError;
use tagdex::infrastructure::FileSystemSite;
use tracing::Level;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tagdex::telemetry::init_tracing(level);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn parse_order(order: Option<String>) -> Result<Option<TagOrder>, TagdexError> {
    order
        .map(|o| TagOrder::from_str(&o).map_err(TagdexError::Config))
        .transpose()
}

fn run(cli: Cli) -> Result<(), TagdexError> {
    match cli.command {
        Some(Commands::Init { path, posts_dir }) => {
            let config = InitService::execute(&path, &posts_dir)?;
            println!("Initialized tagdex site at {}", path.display());
            println!("Posts directory: {}", config.posts_dir);
            Ok(())
        }
        Some(Commands::Build {
            format,
            output,
            order,
            strict,
        }) => {
            let format = IndexFormat::from_str(&format).map_err(TagdexError::Config)?;
            let order = parse_order(order)?;

            let site = FileSystemSite::discover()?;
            let report = BuildIndexService::new(site).execute(BuildOptions {
                format,
                output,
                order,
                strict,
            })?;

            if report.output_path.is_some() {
                println!("{}", format_build_summary(&report));
            } else {
                print!("{}", report.rendered);
                if !report.rendered.ends_with('\n') {
                    println!();
                }
            }
            Ok(())
        }
        Some(Commands::Tags { order }) => {
            let order = parse_order(order)?;
            let site = FileSystemSite::discover()?;
            let tags = ListTagsService::new(site).execute(order)?;
            println!("{}", format_tag_list(&tags).trim_end());
            Ok(())
        }
        Some(Commands::Show { tag }) => {
            let site = FileSystemSite::discover()?;
            let entries = ShowTagService::new(site).execute(&tag)?;
            println!("{}", format_entry_list(&entries).trim_end());
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let site = FileSystemSite::discover()?;
            let service = ConfigService::new(site);

            if list {
                for (k, v) in service.list()? {
                    println!("{} = {}", k, v);
                }
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: tagdex config [--list | <key> [<value>]]");
                println!("Valid keys: posts_dir, base_url, strict, fold_case, trim, order, created");
                Ok(())
            }
        }
        None => {
            println!("tagdex - Tag index builder for static blogs");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
