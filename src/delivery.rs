//! Hand-off of rendered images to whoever sends them on.
//!
//! The host messaging framework implements [`Delivery`]. Ownership of the
//! [`RenderedImage`] moves into [`Delivery::send_photo`]: a successful
//! delivery consumes the temp file, a failed one lets it drop, which deletes
//! it.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::render::{RenderError, RenderedImage};

/// Errors reported by a delivery collaborator.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// Local I/O failed while handing off the image
    #[error("Failed to deliver image to '{recipient}': {source}")]
    Io {
        recipient: String,
        #[source]
        source: std::io::Error,
    },
    /// The receiving side refused the image
    #[error("Delivery rejected: {0}")]
    Rejected(String),
}

/// Sends a rendered image back to the chat a message came from.
pub trait Delivery {
    /// The host's message handle, used to resolve the recipient.
    type Message;

    fn send_photo(&self, msg: &Self::Message, image: RenderedImage) -> Result<(), DeliveryError>;
}

/// Anything a recipient name can be resolved from.
pub trait Recipient {
    fn recipient(&self) -> String;
}

/// Delivers images into a local directory as `<recipient>-<n>.png`.
pub struct DirectoryDelivery<M> {
    dir: PathBuf,
    counter: AtomicUsize,
    _message: PhantomData<fn(&M)>,
}

impl<M> DirectoryDelivery<M> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            counter: AtomicUsize::new(0),
            _message: PhantomData,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Next free file name for `recipient`.
    fn next_path(&self, recipient: &str) -> PathBuf {
        loop {
            let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
            let path = self.dir.join(format!("{recipient}-{n}.png"));
            if !path.exists() {
                return path;
            }
        }
    }
}

impl<M: Recipient> Delivery for DirectoryDelivery<M> {
    type Message = M;

    fn send_photo(&self, msg: &M, image: RenderedImage) -> Result<(), DeliveryError> {
        let recipient = sanitize(&msg.recipient());
        let io_err = |source| DeliveryError::Io {
            recipient: recipient.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        let dest = self.next_path(&recipient);

        image.persist(&dest).map_err(|e| match e {
            RenderError::Io(source) => io_err(source),
            other => DeliveryError::Rejected(other.to_string()),
        })?;

        log::info!("Delivered image for {} to {}", recipient, dest.display());
        Ok(())
    }
}

/// Keep recipient names usable as file names.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "peer".to_string()
    } else {
        cleaned
    }
}
