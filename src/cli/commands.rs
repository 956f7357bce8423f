//! Subcommand handlers for say, mono, dispatch, usage and config actions.

use std::io::Read;
use std::path::{Path, PathBuf};

use super::args::ConfigAction;
use crate::bubble::{format_bubble, Mascot};
use crate::config::{default_path as get_config_path, Config, DEFAULT_CONFIG_TOML};
use crate::delivery::{DirectoryDelivery, Recipient};
use crate::plugin::{mascot_columns, usage, CowsayPlugin, PluginError};
use crate::render::{render, FontSource};

/// Options of the `say` subcommand that override the config.
#[derive(Debug, Clone, Copy, Default)]
pub struct SayOptions {
    pub mascot: Mascot,
    pub width: Option<usize>,
    pub columns: Option<usize>,
}

/// A message typed on the command line.
#[derive(Debug, Clone)]
pub struct LocalMessage {
    pub recipient: String,
}

impl Recipient for LocalMessage {
    fn recipient(&self) -> String {
        self.recipient.clone()
    }
}

/// Format `text` as a bubble and write the rendered PNG to `output`.
///
/// The image is widened past `columns` when the bubble needs more room.
/// Returns the image size in pixels.
pub fn render_bubble_to(
    config: &Config,
    text: &str,
    options: SayOptions,
    output: &Path,
) -> Result<(u32, u32), PluginError> {
    let settings = config.plugin_settings();
    let width = options.width.unwrap_or(settings.bubble_width);
    let columns = options.columns.unwrap_or(settings.mascot_columns);

    let bubble = format_bubble(text, width, options.mascot)?;
    let columns = mascot_columns(&bubble, columns);
    let image = render(&bubble, &settings.style.with_columns(columns))?;
    let size = (image.width(), image.height());
    image.persist(output)?;
    Ok(size)
}

/// Render `text` unchanged and write the PNG to `output`.
pub fn render_mono_to(
    config: &Config,
    text: &str,
    columns: Option<usize>,
    output: &Path,
) -> Result<(u32, u32), PluginError> {
    let settings = config.plugin_settings();
    let columns = columns.unwrap_or(settings.monospaced_columns);

    let image = render(text, &settings.style.with_columns(columns))?;
    let size = (image.width(), image.height());
    image.persist(output)?;
    Ok(size)
}

/// Handle `monosay say`.
pub fn run_say(config: &Config, text: &str, options: SayOptions, output: &Path) {
    match render_bubble_to(config, text, options, output) {
        Ok((w, h)) => println!("Wrote {}x{} image to {}", w, h, output.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle `monosay mono`. A text of `-` is read from stdin.
pub fn run_mono(config: &Config, text: &str, columns: Option<usize>, output: &Path) {
    let text = if text == "-" {
        let mut buf = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
            eprintln!("Error reading stdin: {}", e);
            std::process::exit(1);
        }
        buf
    } else {
        text.to_string()
    };

    match render_mono_to(config, &text, columns, output) {
        Ok((w, h)) => println!("Wrote {}x{} image to {}", w, h, output.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle `monosay dispatch`: act as a local chat host for the plugin.
pub fn run_dispatch(config: &Config, out_dir: &Path, recipient: &str, message: &str) {
    let delivery = DirectoryDelivery::new(out_dir);
    let plugin = CowsayPlugin::new(delivery, config.plugin_settings());
    let msg = LocalMessage {
        recipient: recipient.to_string(),
    };

    match plugin.dispatch(&msg, message) {
        Some(Ok(())) => println!("Delivered to {}", out_dir.display()),
        Some(Err(e)) => {
            log::error!("Dispatch failed: {}", e);
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
        None => {
            eprintln!("No command matched '{}'.", message);
            eprintln!();
            for line in usage(&config.bot.prefix) {
                eprintln!("  {}", line);
            }
            std::process::exit(2);
        }
    }
}

/// Handle `monosay usage`.
pub fn print_usage(config: &Config) {
    for line in usage(&config.bot.prefix) {
        println!("{}", line);
    }
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config_path: Option<&Path>, config: &Config) {
    let config_path: PathBuf = config_path.map(PathBuf::from).unwrap_or_else(get_config_path);

    match action {
        ConfigAction::Show => {
            let render = &config.render;
            println!("Current configuration:");
            println!("  Prefix: {}", config.bot.prefix);
            println!("  Bubble width: {}", config.bubble.width);
            println!("  Color: {}", render.color);
            println!("  Background: {}", render.background);
            match config.render_style().font {
                FontSource::Builtin => println!("  Font: builtin 6x13"),
                FontSource::File { path, size } => {
                    println!("  Font: {} ({}px)", path.display(), size)
                }
            }
            println!("  Padding: {} / {}", render.left_padding, render.right_padding);
            println!("  Monospaced columns: {}", render.monospaced_columns);
            println!("  Mascot columns: {}", render.mascot_columns);
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            if config_path.exists() {
                eprintln!("Config file already exists: {}", config_path.display());
                eprintln!("Use 'monosay config show' to view current settings.");
                std::process::exit(1);
            }

            // Create parent directories if needed
            if let Some(parent) = config_path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Error creating config directory: {}", e);
                    std::process::exit(1);
                }
            }

            if let Err(e) = std::fs::write(&config_path, DEFAULT_CONFIG_TOML) {
                eprintln!("Error writing config file: {}", e);
                std::process::exit(1);
            }

            println!("Created config file: {}", config_path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_bubble_to_writes_png() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("cow.png");
        let options = SayOptions {
            mascot: Mascot::Cow,
            ..Default::default()
        };

        let (w, h) = render_bubble_to(&Config::default(), "moo", options, &output).unwrap();
        // 50 columns at 13px, bubble (3 lines) + cow (5 lines) + 1 spare line
        assert_eq!((w, h), (390, 13 * 9));
        assert!(output.exists());
    }

    #[test]
    fn test_render_bubble_to_widens_for_wide_bubble() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("wide.png");
        let options = SayOptions {
            mascot: Mascot::Cow,
            width: Some(60),
            columns: None,
        };

        let text = "word ".repeat(30);
        let (w, h) = render_bubble_to(&Config::default(), &text, options, &output).unwrap();
        // 30 words at 60 columns wrap to 3 lines of at most 59 columns, framed
        // to 63 columns. Bubble (5 lines) + cow (5 lines) + 1 spare line.
        assert_eq!(w, (63 + 10) * 13 / 2);
        assert_eq!(h, 13 * 11);
    }

    #[test]
    fn test_render_bubble_to_rejects_blank() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("blank.png");
        let err = render_bubble_to(&Config::default(), "  ", SayOptions::default(), &output)
            .unwrap_err();
        assert!(matches!(err, PluginError::Bubble(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_render_mono_to_uses_columns() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("mono.png");
        let (w, h) = render_mono_to(&Config::default(), "hello", Some(20), &output).unwrap();
        assert_eq!((w, h), ((20 + 10) * 13 / 2, 26));
    }

    #[test]
    fn test_local_message_recipient() {
        let msg = LocalMessage {
            recipient: "alice".to_string(),
        };
        assert_eq!(msg.recipient(), "alice");
    }
}
