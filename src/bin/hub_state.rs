//! Inspect the resolved filter/navigation state for a catalog and query.
//!
//! Usage:
//!   hub-state --catalog catalogs/hub_catalog_v1.json --query "cdkType=awscdk&cdkMajor=2"
//!   hub-state --query "language=python" --set cdkType=awscdk --select-submodule aws_s3
//!
//! Loads a catalog document, validates it against the bundled schema,
//! hydrates a session from the query string, optionally applies mutations,
//! and prints the resulting state as JSON.

use anyhow::{Context, Result, bail};
use clap::Parser;
use hubstate::catalog::{CATALOG_SCHEMA_PATH, DEFAULT_CATALOG_PATH, validate_against_schema};
use hubstate::nav::{NavigationContext, NavigationStack};
use hubstate::query::RecordingHistory;
use hubstate::{Language, LanguageSpec, Session, load_catalog_from_path, split_list};
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hub-state")]
#[command(about = "Resolve filter and navigation state from a catalog and a query string")]
struct Cli {
    /// Catalog document to load.
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,
    /// Optional schema path; derived from the catalog location when omitted.
    #[arg(long)]
    schema: Option<PathBuf>,
    /// Initial query string (a leading '?' is tolerated).
    #[arg(long, default_value = "")]
    query: String,
    /// Package whose docs are being browsed.
    #[arg(long, default_value = "aws-cdk-lib")]
    package: String,
    /// Optional package scope.
    #[arg(long)]
    scope: Option<String>,
    /// Package version.
    #[arg(long, default_value = "0.0.0")]
    version: String,
    /// Known submodule names, comma- or whitespace-separated.
    #[arg(long, default_value = "")]
    submodules: String,
    /// Language keys to disable, comma- or whitespace-separated.
    #[arg(long, default_value = "")]
    disabled_languages: String,
    /// Facet mutations to apply in order, as key=value (empty value clears).
    #[arg(long = "set")]
    sets: Vec<String>,
    /// Navigate into this submodule after applying facet mutations.
    #[arg(long)]
    select_submodule: Option<String>,
    /// Navigate back to the package root as the final action.
    #[arg(long)]
    go_back: bool,
    /// Print submodule search results for this filter text instead of none.
    #[arg(long)]
    filter_submodules: Option<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let schema_path = cli.schema.clone().unwrap_or_else(|| {
        cli.catalog
            .parent()
            .and_then(|p| p.parent())
            .map(|base| base.join(CATALOG_SCHEMA_PATH))
            .unwrap_or_else(|| PathBuf::from(CATALOG_SCHEMA_PATH))
    });
    let raw: Value = serde_json::from_str(
        &fs::read_to_string(&cli.catalog)
            .with_context(|| format!("reading catalog {}", cli.catalog.display()))?,
    )
    .with_context(|| format!("parsing catalog {}", cli.catalog.display()))?;
    validate_against_schema(&raw, &schema_path)?;
    let document = load_catalog_from_path(&cli.catalog)?;

    let languages = language_spec(&cli.disabled_languages)?;
    let nav = NavigationStack::new(
        NavigationContext {
            package_id: cli.package.clone(),
            scope: cli.scope.clone(),
            version: cli.version.clone(),
        },
        split_list(&cli.submodules),
    );
    let mut session = Session::hydrate(
        &cli.query,
        &document.construct_frameworks,
        nav,
        languages,
        RecordingHistory::default(),
    );

    for pair in &cli.sets {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("--set expects key=value, got '{pair}'");
        };
        if !session.set_facet(key, value) {
            eprintln!("rejected: {key}={value}");
        }
    }
    if let Some(name) = &cli.select_submodule {
        if !session.select_submodule(name) {
            eprintln!("rejected: submodule {name}");
        }
    }
    if cli.go_back && !session.go_back() {
        eprintln!("rejected: already at root");
    }

    let nav_state = match session.nav_state() {
        hubstate::NavState::Root => json!({"at": "root"}),
        hubstate::NavState::Submodule(name) => json!({"at": "submodule", "name": name}),
    };
    let history: Vec<Value> = session
        .history()
        .entries
        .iter()
        .map(|(mode, query)| json!({"mode": format!("{mode:?}").to_lowercase(), "query": query}))
        .collect();
    let mut output = json!({
        "catalog": document.catalog.key,
        "query": session.query(),
        "state": session.state(),
        "nav": nav_state,
        "active_language": session.active_language().as_str(),
        "type_facets": session.type_facets(),
        "major_facets": session.major_facets(),
        "history": history,
    });
    if let Some(filter) = &cli.filter_submodules {
        output["submodule_results"] = serde_json::to_value(session.submodule_options(filter))?;
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn language_spec(disabled: &str) -> Result<LanguageSpec> {
    let mut spec = LanguageSpec::default();
    for key in split_list(disabled) {
        match Language::try_from(key.as_str()) {
            Ok(language) => {
                spec.disabled.insert(language);
            }
            Err(()) => bail!("unknown language key '{key}'"),
        }
    }
    Ok(spec)
}
