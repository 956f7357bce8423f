//! monosay library crate.
//!
//! Cowsay-style speech bubbles rendered as monospace PNG images, plus the
//! chat plugin shim that wires them to a host's photo delivery.

pub mod bubble;
pub mod cli;
pub mod config;
pub mod delivery;
pub mod plugin;
pub mod render;

pub use bubble::{format_bubble, BubbleError, Mascot};
pub use delivery::{Delivery, DeliveryError, DirectoryDelivery, Recipient};
pub use plugin::{CowsayPlugin, PluginError, PluginSettings};
pub use render::{render, RenderError, RenderStyle, RenderedImage};
