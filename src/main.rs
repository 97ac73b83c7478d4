use std::error::Error;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use help_me_decide::adapters::{
    DuplicateItemsValidator, SeededRandomSource, ThreadRandomSource, UniformFeaturesValidator,
};
use help_me_decide::application::{
    CatalogSource, IngestCatalogCommand, IngestCatalogHandler, ListQuestionsHandler,
    ListQuestionsQuery, NextQuestionHandler, NextQuestionQuery,
};
use help_me_decide::config::{AppConfig, LoggingConfig};
use help_me_decide::domain::catalog::Answers;
use help_me_decide::ports::{CatalogValidator, RandomSource};

const USAGE: &str = "\
usage: help-me-decide [--catalog PATH] [--strategy NAME] [--list] [feature=value ...]

Reads a YAML or JSON catalog and prints the next question as JSON.
Repeat a feature to require several set members: topping=ham topping=-chili

options:
  -c, --catalog PATH   catalog file (default: HELP_ME_DECIDE__CATALOG__PATH)
  -s, --strategy NAME  first_question or random_question
  -l, --list           print every remaining question instead of one
  -h, --help           show this message";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CliOptions {
    catalog: Option<PathBuf>,
    strategy: Option<String>,
    list: bool,
    show_help: bool,
    answers: Vec<(String, String)>,
}

fn main() {
    if let Err(err) = run(std::env::args_os()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run<I>(args: I) -> Result<(), Box<dyn Error>>
where
    I: IntoIterator<Item = OsString>,
{
    let options = match parse_args(args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    if options.show_help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let path = options
        .catalog
        .clone()
        .or_else(|| config.catalog.path.clone())
        .ok_or("no catalog given; pass --catalog or set HELP_ME_DECIDE__CATALOG__PATH")?;
    let contents = std::fs::read_to_string(&path)?;
    let extension = path.extension().and_then(|ext| ext.to_str());

    let mut validators: Vec<Arc<dyn CatalogValidator>> = vec![Arc::new(DuplicateItemsValidator::new())];
    if config.engine.require_uniform_features {
        validators.push(Arc::new(UniformFeaturesValidator::new()));
    }
    let ingested = IngestCatalogHandler::new(validators, config.engine.max_catalog_items).handle(
        IngestCatalogCommand {
            source: CatalogSource::from_extension(extension, contents),
        },
    )?;
    info!(path = %path.display(), catalog_id = %ingested.id, "Catalog loaded");

    let answers = Answers::from_query_pairs(options.answers);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if options.list {
        let result = ListQuestionsHandler::new().handle(ListQuestionsQuery {
            catalog: ingested.catalog,
            answers,
        })?;
        serde_json::to_writer_pretty(&mut out, &result)?;
    } else {
        let random_source: Arc<dyn RandomSource> = match config.engine.random_seed {
            Some(seed) => Arc::new(SeededRandomSource::new(seed)),
            None => Arc::new(ThreadRandomSource::new()),
        };
        let result = NextQuestionHandler::new(random_source, config.engine.strategy()).handle(
            NextQuestionQuery {
                catalog: ingested.catalog,
                answers,
                strategy: options.strategy,
            },
        )?;
        serde_json::to_writer_pretty(&mut out, &result)?;
    }
    writeln!(out)?;
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let json_layer = logging
        .json
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(io::stderr));
    let text_layer = (!logging.json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(io::stderr));

    tracing_subscriber::registry()
        .with(logging.env_filter())
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn parse_args<I>(args: I) -> Result<CliOptions, String>
where
    I: IntoIterator<Item = OsString>,
{
    let mut iter = args.into_iter();
    let _argv0 = iter.next();
    let mut options = CliOptions::default();

    while let Some(argument) = iter.next() {
        let arg = argument.to_string_lossy();
        match arg.as_ref() {
            "-h" | "--help" => options.show_help = true,
            "-l" | "--list" => options.list = true,
            "-c" | "--catalog" => {
                let next = iter
                    .next()
                    .ok_or_else(|| String::from("missing path for `--catalog`"))?;
                options.catalog = Some(PathBuf::from(next));
            }
            "-s" | "--strategy" => {
                let next = iter
                    .next()
                    .ok_or_else(|| String::from("missing name for `--strategy`"))?;
                options.strategy = Some(next.to_string_lossy().into_owned());
            }
            other => {
                if let Some(value) = other.strip_prefix("--catalog=") {
                    options.catalog = Some(PathBuf::from(value));
                    continue;
                }
                if let Some(value) = other.strip_prefix("--strategy=") {
                    options.strategy = Some(value.to_owned());
                    continue;
                }
                if other.starts_with("--") || (other.starts_with('-') && !other.contains('=')) {
                    return Err(format!("unknown option `{other}`"));
                }
                let (feature, value) = other
                    .split_once('=')
                    .ok_or_else(|| format!("expected feature=value, got `{other}`"))?;
                if feature.is_empty() {
                    return Err(format!("missing feature name in `{other}`"));
                }
                options.answers.push((feature.to_owned(), value.to_owned()));
            }
        }
    }

    Ok(options)
}
