//! CLI enum types.

use clap::ValueEnum;

use crate::bubble::Mascot;

/// Mascot drawn under the bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MascotArg {
    None,
    #[default]
    Cow,
    Tux,
}

impl From<MascotArg> for Mascot {
    fn from(m: MascotArg) -> Self {
        match m {
            MascotArg::None => Mascot::None,
            MascotArg::Cow => Mascot::Cow,
            MascotArg::Tux => Mascot::Tux,
        }
    }
}
