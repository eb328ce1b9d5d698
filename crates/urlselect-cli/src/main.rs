//! urlselect CLI - extract content from a webpage using a CSS selector

mod ui;

use clap::{ArgAction, Parser, ValueEnum};
use console::style;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::writeln_safe;
use urlselect::{
    classify, image_sources, render_matches, DisplayMode, ElementRef, Line, Page, Route,
    ScrapeError, Scraper, DEFAULT_IMAGES_ROOT,
};

/// Output format for extracted content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Styled terminal output
    #[default]
    Console,
    /// Pretty-printed JSON
    Json,
}

/// A CLI tool to extract content from a webpage using a CSS selector
#[derive(Parser, Debug)]
#[command(name = "urlselect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL of the webpage
    url: String,

    /// CSS selector to match the element
    selector: String,

    /// Display mode (text, hierarchy or tags); skips the interactive prompt
    #[arg(long, short)]
    mode: Option<DisplayMode>,

    /// Output format
    #[arg(long, short, default_value = "console")]
    output: OutputFormat,

    /// Root folder for downloaded images
    #[arg(long, default_value = DEFAULT_IMAGES_ROOT, value_name = "DIR")]
    images_dir: PathBuf,

    /// Custom User-Agent
    #[arg(long)]
    user_agent: Option<String>,

    /// Timeout for each request
    #[arg(long, value_parser = parse_seconds, value_name = "SECONDS")]
    timeout: Option<Duration>,

    /// Turn debugging information on
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_seconds(arg: &str) -> Result<Duration, std::num::ParseIntError> {
    let seconds = arg.parse()?;
    Ok(Duration::from_secs(seconds))
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("warn,urlselect={level}")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.output == OutputFormat::Console {
        ui::print_banner();
    }

    let scraper = build_scraper(&cli).unwrap_or_else(|e| exit_with_error(e));

    let spinner = ui::spinner("Fetching webpage...");
    let page = match scraper.fetch_page(&cli.url).await {
        Ok(page) => {
            ui::succeed(&spinner, "Webpage fetched successfully");
            page
        }
        Err(e) => {
            ui::fail(&spinner, format!("An error occurred: {}", e));
            std::process::exit(1);
        }
    };

    match run(&cli, &scraper, &page).await {
        Ok(()) => {}
        Err(message) => exit_with_error(message),
    }
}

fn build_scraper(cli: &Cli) -> Result<Scraper, ScrapeError> {
    let mut builder = Scraper::builder().images_root(cli.images_dir.clone());
    if let Some(ua) = &cli.user_agent {
        builder = builder.user_agent(ua.clone());
    }
    if let Some(timeout) = cli.timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

async fn run(cli: &Cli, scraper: &Scraper, page: &Page) -> Result<(), String> {
    let matches = page.select(&cli.selector).map_err(|e| e.to_string())?;

    let route = classify(&cli.selector, &matches);
    tracing::debug!(?route, matches = matches.len(), "Classified selection");

    match route {
        Route::Images => {
            let sources = image_sources(&matches);
            download_images(cli.output, scraper, page, &sources).await
        }
        Route::Text => {
            let mode = match cli.mode {
                Some(mode) => mode,
                None => ui::prompt_mode().map_err(|e| format!("Prompt failed: {}", e))?,
            };
            print_matches(cli.output, &matches, mode)
        }
    }
}

async fn download_images(
    output: OutputFormat,
    scraper: &Scraper,
    page: &Page,
    sources: &[Option<String>],
) -> Result<(), String> {
    let downloader = scraper
        .image_downloader(page.url())
        .await
        .map_err(|e| e.to_string())?;

    if output == OutputFormat::Console {
        writeln_safe(
            style(format!(
                "\nFound {} image(s). Downloading into folder: {}\n",
                sources.len(),
                downloader.dir().display()
            ))
            .green(),
        );
    }

    let mut progress = ui::DownloadProgress::new();
    let report = downloader
        .download_all(sources, page.url(), |event| progress.handle(event))
        .await;

    match output {
        OutputFormat::Console => writeln_safe(style("\nDownload process completed.").green()),
        OutputFormat::Json => writeln_safe(to_json(&report)?),
    }
    Ok(())
}

fn print_matches(
    output: OutputFormat,
    matches: &[ElementRef<'_>],
    mode: DisplayMode,
) -> Result<(), String> {
    match output {
        OutputFormat::Console => {
            writeln_safe(style("\nExtracted content:").green());
            render_matches(matches, mode, &mut ui::ConsoleSink);
        }
        OutputFormat::Json => {
            let mut lines: Vec<Line> = Vec::new();
            render_matches(matches, mode, &mut lines);
            writeln_safe(to_json(&lines)?);
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Error serializing output: {}", e))
}

fn exit_with_error(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", style(message).red());
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve_page(html: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
            .mount(&mock_server)
            .await;
        mock_server
    }

    async fn run_against(args: &[&str]) -> Result<(), String> {
        let cli =
            Cli::try_parse_from(std::iter::once("urlselect").chain(args.iter().copied())).unwrap();
        let scraper = build_scraper(&cli).unwrap();
        let page = scraper.fetch_page(&cli.url).await.unwrap();
        run(&cli, &scraper, &page).await
    }

    #[test]
    fn test_cli_positional_arguments() {
        let cli =
            Cli::try_parse_from(["urlselect", "https://example.com", "div.content"]).unwrap();
        assert_eq!(cli.url, "https://example.com");
        assert_eq!(cli.selector, "div.content");
        assert_eq!(cli.mode, None);
        assert_eq!(cli.output, OutputFormat::Console);
        assert_eq!(cli.images_dir, PathBuf::from("images"));
        assert!(cli.timeout.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_requires_selector() {
        assert!(Cli::try_parse_from(["urlselect", "https://example.com"]).is_err());
        assert!(Cli::try_parse_from(["urlselect"]).is_err());
    }

    #[test]
    fn test_cli_options() {
        let cli = Cli::try_parse_from([
            "urlselect",
            "https://example.com",
            "img",
            "--mode",
            "hierarchy",
            "--output",
            "json",
            "--images-dir",
            "downloads",
            "--user-agent",
            "TestAgent/1.0",
            "--timeout",
            "15",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.mode, Some(DisplayMode::Hierarchy));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.images_dir, PathBuf::from("downloads"));
        assert_eq!(cli.user_agent, Some("TestAgent/1.0".to_string()));
        assert_eq!(cli.timeout, Some(Duration::from_secs(15)));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        let result =
            Cli::try_parse_from(["urlselect", "https://example.com", "p", "--mode", "fancy"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("30").unwrap(), Duration::from_secs(30));
        assert!(parse_seconds("soon").is_err());
    }

    #[test]
    fn test_lines_to_json() {
        let lines = vec![
            Line::Header {
                index: 1,
                tag: "div".to_string(),
            },
            Line::Tagged {
                tag: "p".to_string(),
                text: "Hello".to_string(),
            },
        ];
        let json = to_json(&lines).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"kind\": \"header\""));
        assert!(json.contains("\"kind\": \"tagged\""));
        assert!(json.contains("\"text\": \"Hello\""));
    }

    #[tokio::test]
    async fn test_run_zero_matches_is_error() {
        let mock_server = serve_page("<html><body><p>Only text</p></body></html>").await;
        let url = format!("{}/", mock_server.uri());

        let args = [url.as_str(), "table", "--mode", "text", "--output", "json"];
        let result = run_against(&args).await;
        assert_eq!(
            result,
            Err("No elements found matching the given selector.".to_string())
        );
    }

    #[tokio::test]
    async fn test_run_invalid_selector_is_error() {
        let mock_server = serve_page("<html><body><p>Only text</p></body></html>").await;
        let url = format!("{}/", mock_server.uri());

        let result = run_against(&[url.as_str(), "p[", "--mode", "text"]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_renders_text_as_json() {
        let mock_server =
            serve_page("<html><body><div><h1>Title</h1><p>Body</p></div></body></html>").await;
        let url = format!("{}/", mock_server.uri());

        for mode in ["text", "hierarchy", "tags"] {
            let args = [url.as_str(), "div", "--mode", mode, "--output", "json"];
            let result = run_against(&args).await;
            assert_eq!(result, Ok(()));
        }
    }

    #[tokio::test]
    async fn test_run_routes_images_to_download() {
        let mock_server = serve_page(
            "<html><body><img class=\"photo\" src=\"/pics/cat.png\"><p class=\"photo\">x</p></body></html>",
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/pics/cat.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"meow".to_vec()))
            .mount(&mock_server)
            .await;

        let root = tempfile::tempdir().unwrap();
        let url = format!("{}/", mock_server.uri());
        let images_dir = root.path().to_str().unwrap();

        // No --mode: the image route never prompts
        let args = [url.as_str(), ".photo", "--images-dir", images_dir, "--output", "json"];
        let result = run_against(&args).await;
        assert_eq!(result, Ok(()));

        let written = std::fs::read(root.path().join("127.0.0.1").join("cat.png")).unwrap();
        assert_eq!(written, b"meow");
    }
}
