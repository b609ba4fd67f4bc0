//! Command implementations shared by the CLI entry point and tests

use std::fs;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::cli::{ConfigArgs, FieldsArgs, OutputFormat, SearchArgs};
use crate::config::{save_config, SearchConfig};
use crate::format::{format_json, format_markdown};
use crate::records::{parse_records, record_search};
use crate::search::{FilterSearch, Indexer, MatchItem};
use crate::settings::{settings_search, ProjectSetting};

/// Run `search` and return the rendered output
pub fn execute_search(args: &SearchArgs, config: &SearchConfig) -> Result<String> {
    let data = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read items from {}", args.file.display()))?;
    let strategy = args.strategy.map(Into::into).unwrap_or(config.strategy);
    let limit = args.limit.or(config.limit);

    debug!(
        "Search request: file={}, query='{}', strategy={}",
        args.file.display(),
        args.query,
        strategy
    );

    if args.settings {
        let settings: Vec<ProjectSetting> =
            serde_json::from_str(&data).context("Failed to parse settings file")?;
        let search = settings_search(settings)?
            .with_strategy(strategy)
            .with_query(args.query.as_str());
        render(
            &search,
            limit,
            args.format,
            |s| format!("{} ({})", s.name, s.id),
            |s, field| match field {
                "id" => Some(s.id.clone()),
                "name" => Some(s.name.clone()),
                "description" => Some(s.description.clone()),
                _ => None,
            },
        )
    } else {
        let records = parse_records(&data)?;
        let search = record_search(records, &config.filters, strategy)?.with_query(args.query.as_str());
        let title_field = config.filters.first().map(|f| f.field.clone());
        render(
            &search,
            limit,
            args.format,
            |record| record_title(record, title_field.as_deref()),
            |record, field| record.get(field).and_then(scalar_text),
        )
    }
}

fn render<T, X>(
    search: &FilterSearch<T, X>,
    limit: Option<usize>,
    format: OutputFormat,
    title: impl Fn(&T) -> String,
    field: impl Fn(&T, &str) -> Option<String>,
) -> Result<String>
where
    T: Clone + Serialize,
    X: Indexer<T>,
{
    let mut results: Vec<MatchItem<T>> = if search.query().trim().is_empty() {
        search.unfiltered_results()
    } else {
        search.results()?
    };
    let total = results.len();
    if let Some(limit) = limit {
        results.truncate(limit);
    }
    info!("{} of {} items matched, showing {}", total, search.items().len(), results.len());

    match format {
        OutputFormat::Markdown => Ok(format_markdown(&results, search.query(), title, field)),
        OutputFormat::Json => Ok(format_json(&results)?),
    }
}

fn record_title(record: &Value, field: Option<&str>) -> String {
    field
        .and_then(|f| record.get(f))
        .and_then(scalar_text)
        .unwrap_or_else(|| record.to_string())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Run `fields`: one filter name per line
pub fn execute_fields(args: &FieldsArgs, config: &SearchConfig) -> Result<String> {
    let names = if args.settings {
        settings_search(Vec::new())?.filter_names()
    } else {
        record_search(Vec::new(), &config.filters, config.strategy)?.filter_names()
    };
    Ok(names.join("\n"))
}

/// Run `config`: where the configuration lives and what it holds.
///
/// With `--init` the configuration is first written to `path`, which must
/// not exist yet.
pub fn execute_config(args: &ConfigArgs, path: &std::path::Path, config: &SearchConfig) -> Result<String> {
    if args.init {
        if path.exists() {
            bail!("Config file {} already exists", path.display());
        }
        save_config(config, path)?;
        info!("Wrote config to {}", path.display());
    }

    let body = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    let state = if path.exists() { "" } else { " (not found, using defaults)" };
    Ok(format!("# {}{}\n{}", path.display(), state, body))
}
