//! Chat command plugin: `monospaced`, `cowsay` and `tuxsay`.
//!
//! The host dispatcher feeds message text to [`CowsayPlugin::dispatch`] (or
//! calls a `handle_*` entry point directly after its own pattern matching).
//! The plugin formats and renders the text, then moves the image into the
//! host's [`Delivery`].

use crate::bubble::{block_columns, format_bubble, BubbleError, Mascot, DEFAULT_LINE_WIDTH};
use crate::delivery::{Delivery, DeliveryError};
use crate::render::{render, RenderError, RenderStyle, DEFAULT_WIDTH_COLUMNS};

/// Text shown to the user whenever a command fails.
pub const FAILURE_MESSAGE: &str = "Cowsay: something went wrong.";

/// Rasterizer width for bubbles with a mascot.
///
/// Bubbles wider than this are rendered at their own width instead.
pub const MASCOT_WIDTH_COLUMNS: usize = 50;

/// Default command prefix.
pub const DEFAULT_PREFIX: &str = "/";

/// Commands understood by the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Monospaced,
    Cowsay,
    Tuxsay,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::Monospaced, Command::Cowsay, Command::Tuxsay];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Monospaced => "monospaced",
            Command::Cowsay => "cowsay",
            Command::Tuxsay => "tuxsay",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Command::Monospaced => "Renders text in an image with monospace font.",
            Command::Cowsay => "Renders text in an cowsay image with monospace font.",
            Command::Tuxsay => "Renders text in an cowsay -f tux image with monospace font.",
        }
    }

    /// Match `{prefix}{name} (.+)` against the whole of `text`.
    ///
    /// Returns the command and its argument. The argument runs to the end of
    /// the line and must not be empty; text spanning several lines does not
    /// match, apart from a single trailing newline.
    pub fn parse<'a>(prefix: &str, text: &'a str) -> Option<(Command, &'a str)> {
        let text = text.strip_suffix('\n').unwrap_or(text);
        let rest = text.strip_prefix(prefix)?;

        Command::ALL.into_iter().find_map(|command| {
            let arg = rest.strip_prefix(command.name())?.strip_prefix(' ')?;
            (!arg.is_empty() && !arg.contains('\n')).then_some((command, arg))
        })
    }
}

/// Usage lines for all commands.
pub fn usage(prefix: &str) -> Vec<String> {
    Command::ALL
        .iter()
        .map(|c| format!("{prefix}{} (text): {}", c.name(), c.description()))
        .collect()
}

/// Render width for a formatted bubble: `minimum`, widened so that no line
/// of the bubble gets wrapped again.
pub fn mascot_columns(bubble: &str, minimum: usize) -> usize {
    minimum.max(block_columns(bubble))
}

/// Errors from handling one command.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error(transparent)]
    Bubble(#[from] BubbleError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl PluginError {
    /// The message the host should show in the chat.
    pub fn user_message(&self) -> &'static str {
        FAILURE_MESSAGE
    }
}

/// Tunables for [`CowsayPlugin`].
#[derive(Debug, Clone, PartialEq)]
pub struct PluginSettings {
    pub prefix: String,
    /// Bubble wrap width in columns.
    pub bubble_width: usize,
    /// Rasterizer width for `monospaced`.
    pub monospaced_columns: usize,
    /// Minimum rasterizer width for `cowsay` and `tuxsay`.
    pub mascot_columns: usize,
    pub style: RenderStyle,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            bubble_width: DEFAULT_LINE_WIDTH,
            monospaced_columns: DEFAULT_WIDTH_COLUMNS,
            mascot_columns: MASCOT_WIDTH_COLUMNS,
            style: RenderStyle::default(),
        }
    }
}

/// The plugin, bound to the host's delivery collaborator.
pub struct CowsayPlugin<D> {
    delivery: D,
    settings: PluginSettings,
}

impl<D: Delivery> CowsayPlugin<D> {
    pub fn new(delivery: D, settings: PluginSettings) -> Self {
        Self { delivery, settings }
    }

    pub fn delivery(&self) -> &D {
        &self.delivery
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// Match `text` against the command patterns and run the handler.
    ///
    /// Returns `None` when no command matched.
    pub fn dispatch(&self, msg: &D::Message, text: &str) -> Option<Result<(), PluginError>> {
        let (command, arg) = Command::parse(&self.settings.prefix, text)?;
        log::debug!("Dispatching {}", command.name());

        let result = match command {
            Command::Monospaced => self.handle_monospaced(msg, arg),
            Command::Cowsay => self.handle_cowsay(msg, arg),
            Command::Tuxsay => self.handle_tuxsay(msg, arg),
        };
        if let Err(e) = &result {
            log::warn!("{} failed: {}", command.name(), e);
        }
        Some(result)
    }

    /// Render `text` as-is.
    pub fn handle_monospaced(&self, msg: &D::Message, text: &str) -> Result<(), PluginError> {
        self.send(msg, text, self.settings.monospaced_columns)
    }

    /// Render `text` in a bubble spoken by the cow.
    pub fn handle_cowsay(&self, msg: &D::Message, text: &str) -> Result<(), PluginError> {
        self.say(msg, text, Mascot::Cow)
    }

    /// Render `text` in a bubble spoken by Tux.
    pub fn handle_tuxsay(&self, msg: &D::Message, text: &str) -> Result<(), PluginError> {
        self.say(msg, text, Mascot::Tux)
    }

    fn say(&self, msg: &D::Message, text: &str, mascot: Mascot) -> Result<(), PluginError> {
        let bubble = format_bubble(text, self.settings.bubble_width, mascot)?;
        let columns = mascot_columns(&bubble, self.settings.mascot_columns);
        log::debug!("Rendering {} bubble at {} columns", mascot.name(), columns);
        self.send(msg, &bubble, columns)
    }

    fn send(&self, msg: &D::Message, text: &str, columns: usize) -> Result<(), PluginError> {
        let image = render(text, &self.settings.style.with_columns(columns))?;
        self.delivery.send_photo(msg, image)?;
        Ok(())
    }
}
