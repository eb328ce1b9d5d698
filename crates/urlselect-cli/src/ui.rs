//! Terminal presentation: banner, spinners, mode prompt and styled lines

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use std::borrow::Cow;
use std::fmt::Display;
use std::io::{self, Write};
use std::time::Duration;
use urlselect::{DisplayMode, ImageEvent, Line, LineSink, MODE_PROMPT};

pub const BANNER: &str = r#"
 _   _ ____  _       ____       _           _
| | | |  _ \| |     / ___|  ___| | ___  ___| |_ ___  _ __
| | | | |_) | |     \___ \ / _ \ |/ _ \/ __| __/ _ \| '__|
| |_| |  _ <| |___   ___) |  __/ |  __/ (__| || (_) | |
 \___/|_| \_\_____| |____/ \___|_|\___|\___|\__\___/|_|
"#;

pub const SUBTITLE: &str = "URL Selector CLI - Extract content or download images\n";

/// Write to stdout, exit silently on broken pipe
pub fn writeln_safe(s: impl Display) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

pub fn print_banner() {
    writeln_safe(style(BANNER).cyan());
    writeln_safe(style(SUBTITLE).yellow());
}

fn progress_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Start a ticking spinner on stderr
pub fn spinner(message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(progress_style("{spinner:.cyan} {msg}"));
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

/// Stop a spinner with a success mark
pub fn succeed(bar: &ProgressBar, message: impl Into<Cow<'static, str>>) {
    bar.set_style(progress_style("{prefix:.green} {msg}"));
    bar.set_prefix("✔");
    bar.finish_with_message(message);
}

/// Stop a spinner with a failure mark
pub fn fail(bar: &ProgressBar, message: impl Into<Cow<'static, str>>) {
    bar.set_style(progress_style("{prefix:.red} {msg}"));
    bar.set_prefix("✖");
    bar.abandon_with_message(message);
}

/// Ask the operator for a display mode
pub fn prompt_mode() -> dialoguer::Result<DisplayMode> {
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(MODE_PROMPT)
        .items(&DisplayMode::ALL)
        .default(0)
        .interact()?;
    Ok(DisplayMode::ALL[selection])
}

/// Styled console form of a rendered line
pub fn format_line(line: &Line) -> String {
    match line {
        Line::Header { .. } => format!("\n{}", style(line).yellow()),
        Line::Text { text } => style(text).cyan().to_string(),
        Line::Nested { depth, tag, text } => format!(
            "{}{}",
            style(format!("{}<{}> - ", Line::indent(*depth), tag)).cyan(),
            style(text).white()
        ),
        Line::Tagged { tag, text } => format!(
            "{}{}",
            style(format!("<{}> - ", tag)).cyan(),
            style(text).white()
        ),
    }
}

/// Sink printing styled lines to stdout
pub struct ConsoleSink;

impl LineSink for ConsoleSink {
    fn emit(&mut self, line: Line) {
        writeln_safe(format_line(&line));
    }
}

/// Turns download events into one spinner per image
#[derive(Default)]
pub struct DownloadProgress {
    current: Option<ProgressBar>,
}

impl DownloadProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: ImageEvent) {
        match event {
            ImageEvent::Skipped { index } => {
                tracing::debug!(index, "Image element has no src, skipping");
            }
            ImageEvent::Started {
                index,
                total,
                file_name,
            } => {
                self.current = Some(spinner(format!(
                    "Downloading image {}/{}: {}",
                    index, total, file_name
                )));
            }
            ImageEvent::Saved { path, .. } => {
                let bar = self.take_or_new();
                succeed(&bar, format!("Image saved: {}", path.display()));
            }
            ImageEvent::Failed { src, message, .. } => {
                let bar = self.take_or_new();
                fail(&bar, format!("Failed to download image {}: {}", src, message));
            }
        }
    }

    fn take_or_new(&mut self) -> ProgressBar {
        self.current.take().unwrap_or_else(ProgressBar::new_spinner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_plain_when_colors_disabled() {
        console::set_colors_enabled(false);

        let header = Line::Header {
            index: 1,
            tag: "div".to_string(),
        };
        assert_eq!(format_line(&header), "\n1. <div>");

        let nested = Line::Nested {
            depth: 1,
            tag: "p".to_string(),
            text: "Hello".to_string(),
        };
        assert_eq!(format_line(&nested), "  <p> - Hello");

        let tagged = Line::Tagged {
            tag: "em".to_string(),
            text: "Hi".to_string(),
        };
        assert_eq!(format_line(&tagged), "<em> - Hi");

        let text = Line::Text {
            text: "Plain".to_string(),
        };
        assert_eq!(format_line(&text), "Plain");
    }

    #[test]
    fn test_download_progress_tracks_current_spinner() {
        let mut progress = DownloadProgress::new();
        progress.handle(ImageEvent::Started {
            index: 1,
            total: 2,
            file_name: "a.png".to_string(),
        });
        assert!(progress.current.is_some());

        progress.handle(ImageEvent::Failed {
            index: 1,
            src: "/a.png".to_string(),
            message: "Request failed with status code 404".to_string(),
        });
        assert!(progress.current.is_none());

        progress.handle(ImageEvent::Skipped { index: 2 });
        assert!(progress.current.is_none());
    }
}
