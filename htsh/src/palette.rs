//! ASCII colours for catppuccin theme.

pub const MAUVE: &str = "\x1b[38;2;203;166;247m"; // #CBA6F7
pub const RED: &str = "\x1b[38;2;243;139;168m"; // #F38BA8
pub const PEACH: &str = "\x1b[38;2;250;179;135m"; // #FAB387
pub const GREEN: &str = "\x1b[38;2;166;227;161m"; // #A6E3A1
pub const BLUE: &str = "\x1b[38;2;137;180;250m"; // #89B4FA

pub const SUBTEXT: &str = "\x1b[38;2;166;173;200m"; // #A6ADC8

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
