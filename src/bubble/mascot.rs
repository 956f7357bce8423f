//! Mascot art appended below a bubble.

/// Cow, speaking from the upper left.
pub const COW_ART: &str = r"
         \   ^__^
          \  (oo)\_______
             (__)\       )\/\
                 ||----w |
                 ||     ||";

/// Tux the penguin.
pub const TUX_ART: &str = r"
     \
      \
        .--.
       |o_o |
       |:_/ |
      //   \ \
     (|     | )
    /'\_   _/`\
    \___)=(___/)";

/// Mascot drawn under the speech bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mascot {
    /// Bubble only
    #[default]
    None,
    /// Classic cowsay cow
    Cow,
    /// Penguin, as in `cowsay -f tux`
    Tux,
}

impl Mascot {
    /// The fixed art block for this mascot, empty for [`Mascot::None`].
    ///
    /// Every block starts with a newline so it lands on the line after the
    /// bottom border.
    pub fn art(&self) -> &'static str {
        match self {
            Mascot::None => "",
            Mascot::Cow => COW_ART,
            Mascot::Tux => TUX_ART,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mascot::None => "none",
            Mascot::Cow => "cow",
            Mascot::Tux => "tux",
        }
    }
}
