use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{Clock, ResultsService, SurveyLoopService};
use storage::repository::Storage;
use survey_core::questionnaire::{Preset, Questionnaire, SURVEY_TITLE};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::vm::ChartKind;
use ui::{App, DesktopLinkOpener, LinkOpenerRef, UiApp, UiSettings, build_app_context};

const DEFAULT_TRANSITION_MS: u64 = 300;

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidQuestionnaire { raw: String },
    InvalidChart { raw: String },
    InvalidTransition { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidQuestionnaire { raw } => {
                write!(f, "invalid --questionnaire value: {raw}")
            }
            ArgsError::InvalidChart { raw } => write!(f, "invalid --chart value: {raw}"),
            ArgsError::InvalidTransition { raw } => {
                write!(f, "invalid --transition-ms value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    survey_loop: Arc<SurveyLoopService>,
    results: Arc<ResultsService>,
    settings: UiSettings,
    link_opener: LinkOpenerRef,
}

impl UiApp for DesktopApp {
    fn survey_loop(&self) -> Arc<SurveyLoopService> {
        Arc::clone(&self.survey_loop)
    }

    fn results(&self) -> Arc<ResultsService> {
        Arc::clone(&self.results)
    }

    fn settings(&self) -> UiSettings {
        self.settings
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }
}

#[derive(Debug, PartialEq)]
struct Args {
    preset: Preset,
    /// `None` picks the preset's default chart.
    chart: Option<ChartKind>,
    transition: Duration,
    help: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--questionnaire <standard|compact>] [--chart <radar|bar>] [--transition-ms <ms>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --questionnaire standard");
    eprintln!("  --chart radar (standard), bar (compact)");
    eprintln!("  --transition-ms {DEFAULT_TRANSITION_MS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SURVEY_QUESTIONNAIRE, SURVEY_CHART, SURVEY_TRANSITION_MS, RUST_LOG");
}

fn parse_preset(raw: String) -> Result<Preset, ArgsError> {
    raw.parse()
        .map_err(|_| ArgsError::InvalidQuestionnaire { raw })
}

fn parse_chart(raw: String) -> Result<ChartKind, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidChart { raw })
}

fn parse_transition(raw: String) -> Result<Duration, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ArgsError::InvalidTransition { raw })
}

impl Args {
    /// Flags win over environment variables.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut preset = env("SURVEY_QUESTIONNAIRE")
            .map(parse_preset)
            .transpose()?
            .unwrap_or_default();
        let mut chart = env("SURVEY_CHART").map(parse_chart).transpose()?;
        let mut transition = env("SURVEY_TRANSITION_MS")
            .map(parse_transition)
            .transpose()?
            .unwrap_or(Duration::from_millis(DEFAULT_TRANSITION_MS));
        let mut help = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questionnaire" => {
                    preset = parse_preset(require_value(args, "--questionnaire")?)?;
                }
                "--chart" => {
                    chart = Some(parse_chart(require_value(args, "--chart")?)?);
                }
                "--transition-ms" => {
                    transition = parse_transition(require_value(args, "--transition-ms")?)?;
                }
                "--help" | "-h" => help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            preset,
            chart,
            transition,
            help,
        })
    }

    fn ui_settings(&self) -> UiSettings {
        let (default_chart, series_offset) = match self.preset {
            Preset::Standard => (ChartKind::Radar, 0.05),
            Preset::Compact => (ChartKind::Bar, 0.0),
        };
        UiSettings {
            chart: self.chart.unwrap_or(default_chart),
            transition: self.transition,
            series_offset,
        }
    }
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(&mut std::env::args().skip(1), |key| std::env::var(key).ok())
        .inspect_err(|_| print_usage())?;
    if parsed.help {
        print_usage();
        return Ok(());
    }

    init_tracing()?;

    let questionnaire = Arc::new(Questionnaire::preset(parsed.preset)?);
    let storage = Storage::in_memory();
    let clock = Clock::default_clock();
    let survey_loop = Arc::new(SurveyLoopService::new(
        clock,
        Arc::clone(&questionnaire),
        Arc::clone(&storage.history),
    ));
    let results = Arc::new(ResultsService::for_questionnaire(
        Arc::clone(&storage.history),
        &questionnaire,
    ));
    let settings = parsed.ui_settings();

    info!(
        preset = %parsed.preset,
        questions = questionnaire.len(),
        categories = questionnaire.categories().len(),
        chart = %settings.chart,
        transition_ms = settings.transition.as_millis(),
        "starting survey"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        survey_loop,
        results,
        settings,
        link_opener: Arc::new(DesktopLinkOpener),
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(SURVEY_TITLE)
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
