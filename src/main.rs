use anyhow::{anyhow, Context, Result};
use crossterm::style::Stylize;
use std::fs::File;
use std::io::BufWriter;

mod table_display;

use table_display::display_page;
use tabview::config::config::Config;
use tabview::data::data_exporter::DataExporter;
use tabview::data::filter::FilterValue;
use tabview::data::row_loader::{infer_columns, load_json_rows};
use tabview::data::tabular_view::{TabularView, ViewOptions};
use tabview::trace_view_operation;

fn print_help() {
    println!("{}", "tabview - search, filter, sort and page through JSON rows".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  tabview [OPTIONS] FILE.json");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}       - Free-text search across all columns", "--search TEXT".green());
    println!(
        "  {} - Keep rows whose KEY is one of the values (repeatable)",
        "--filter KEY=V1,V2".green()
    );
    println!(
        "  {}          - Sort by KEY; repeating it flips the direction",
        "--sort KEY".green()
    );
    println!("  {}        - Rows per page", "--page-size N".green());
    println!("  {}             - Page to show", "--page N".green());
    println!("  {}  - Write the filtered rows as CSV", "--export-csv PATH".green());
    println!("  {} - Write the filtered rows as JSON", "--export-json PATH".green());
    println!(
        "  {}   - Write a commented config file and exit",
        "--generate-config".green()
    );
    println!("  {}              - Show this help", "--help".green());
    println!();
}

#[derive(Debug, Default)]
struct CliArgs {
    file: Option<String>,
    search: Option<String>,
    filters: Vec<(String, Vec<String>)>,
    sorts: Vec<String>,
    page_size: Option<usize>,
    page: Option<usize>,
    export_csv: Option<String>,
    export_json: Option<String>,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} requires a value", name))
        };

        match arg.as_str() {
            "--search" => parsed.search = Some(value("--search")?),
            "--filter" => {
                let spec = value("--filter")?;
                let (key, values) = spec
                    .split_once('=')
                    .ok_or_else(|| anyhow!("--filter expects KEY=V1,V2, got '{}'", spec))?;
                let values = values
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect();
                parsed.filters.push((key.to_string(), values));
            }
            "--sort" => parsed.sorts.push(value("--sort")?),
            "--page-size" => {
                let n = value("--page-size")?;
                parsed.page_size = Some(n.parse().with_context(|| format!("Invalid page size '{}'", n))?);
            }
            "--page" => {
                let n = value("--page")?;
                parsed.page = Some(n.parse().with_context(|| format!("Invalid page '{}'", n))?);
            }
            "--export-csv" => parsed.export_csv = Some(value("--export-csv")?),
            "--export-json" => parsed.export_json = Some(value("--export-json")?),
            other if other.starts_with("--") => return Err(anyhow!("Unknown option '{}'", other)),
            other => parsed.file = Some(other.to_string()),
        }
    }

    Ok(parsed)
}

fn generate_config() -> Result<()> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::create_default_with_comments())?;
    println!("Configuration file created at: {:?}", path);
    Ok(())
}

fn run(args: CliArgs) -> Result<()> {
    let config = Config::load()?;

    let file = args
        .file
        .ok_or_else(|| anyhow!("No input file given (see --help)"))?;
    let rows = load_json_rows(&file)?;

    let mut view = TabularView::new(infer_columns(&rows), ViewOptions::from_config(&config.view));
    view.set_data(&rows);

    if let Some(page_size) = args.page_size {
        trace_view_operation!(format!("page size {}", page_size));
        view.set_page_size(page_size);
    }
    for (key, values) in &args.filters {
        trace_view_operation!(format!("filter {}={:?}", key, values));
        if view.column(key).is_none() {
            eprintln!("{}", format!("Warning: no column '{}' to filter", key).yellow());
        }
        view.set_filter(key, Some(FilterValue::any_of(values.iter().cloned())));
    }
    if let Some(query) = &args.search {
        trace_view_operation!(format!("search '{}'", query));
        view.set_search(query);
    }
    for key in &args.sorts {
        trace_view_operation!(format!("sort {}", key));
        view.sort(key);
    }
    if let Some(page) = args.page {
        trace_view_operation!(format!("page {}", page));
        view.go_to_page(page);
    }

    display_page(&view.render(&config.display));

    if let Some(path) = &args.export_csv {
        let writer = BufWriter::new(File::create(path)?);
        let count = DataExporter::write_csv(&view, writer, &config.display)?;
        println!("{}", format!("✓ Exported {} rows to CSV file: {}", count, path).green());
    }
    if let Some(path) = &args.export_json {
        let writer = BufWriter::new(File::create(path)?);
        let count = DataExporter::write_json(&view, writer, &config.display)?;
        println!("{}", format!("✓ Exported {} rows to JSON file: {}", count, path).green());
    }

    Ok(())
}

fn main() {
    tabview::utils::logging::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.contains(&"--help".to_string()) {
        print_help();
        return;
    }

    let result = if args.contains(&"--generate-config".to_string()) {
        generate_config()
    } else {
        parse_args(&args).and_then(run)
    };

    if let Err(e) = result {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(&args(&[
            "journals.json",
            "--search",
            "sains",
            "--filter",
            "akreditasi=Sinta 1, Sinta 2",
            "--sort",
            "nama",
            "--sort",
            "nama",
            "--page",
            "2",
        ]))
        .unwrap();

        assert_eq!(parsed.file.as_deref(), Some("journals.json"));
        assert_eq!(parsed.search.as_deref(), Some("sains"));
        assert_eq!(
            parsed.filters,
            vec![(
                "akreditasi".to_string(),
                vec!["Sinta 1".to_string(), "Sinta 2".to_string()]
            )]
        );
        assert_eq!(parsed.sorts.len(), 2);
        assert_eq!(parsed.page, Some(2));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--page"])).is_err());
        assert!(parse_args(&args(&["--page", "two"])).is_err());
        assert!(parse_args(&args(&["--filter", "novalue"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }
}
