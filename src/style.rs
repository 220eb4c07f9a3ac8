//! ANSI escape sequences and drawing glyphs.
//!
//! Render objects pre-compose their content lines with these sequences and
//! reset at line end; the compositor never applies styling itself, it only
//! has to know how to *measure around* it (see [`crate::rendering::overlay`]).

/// Resets all styling.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const BLINK: &str = "\x1b[5m";
pub const INVERSE: &str = "\x1b[7m";

/// Foreground (text) colours.
pub mod fg {
    pub const BLACK: &str = "\x1b[30m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const WHITE: &str = "\x1b[37m";
    pub const BRIGHT_BLACK: &str = "\x1b[30;1m";
    pub const BRIGHT_RED: &str = "\x1b[31;1m";
    pub const BRIGHT_GREEN: &str = "\x1b[32;1m";
    pub const BRIGHT_YELLOW: &str = "\x1b[33;1m";
    pub const BRIGHT_BLUE: &str = "\x1b[34;1m";
    pub const BRIGHT_MAGENTA: &str = "\x1b[35;1m";
    pub const BRIGHT_CYAN: &str = "\x1b[36;1m";
    pub const BRIGHT_WHITE: &str = "\x1b[37;1m";

    pub const GRAYSCALE_235: &str = "\x1b[38;5;235m";
    pub const GRAYSCALE_240: &str = "\x1b[38;5;240m";
    pub const GRAYSCALE_245: &str = "\x1b[38;5;245m";
    pub const GRAYSCALE_250: &str = "\x1b[38;5;250m";
}

/// Background colours.
pub mod bg {
    pub const BLACK: &str = "\x1b[40m";
    pub const RED: &str = "\x1b[41m";
    pub const GREEN: &str = "\x1b[42m";
    pub const YELLOW: &str = "\x1b[43m";
    pub const BLUE: &str = "\x1b[44m";
    pub const MAGENTA: &str = "\x1b[45m";
    pub const CYAN: &str = "\x1b[46m";
    pub const WHITE: &str = "\x1b[47m";
    pub const BRIGHT_BLACK: &str = "\x1b[40;1m";
    pub const BRIGHT_RED: &str = "\x1b[41;1m";
    pub const BRIGHT_GREEN: &str = "\x1b[42;1m";
    pub const BRIGHT_YELLOW: &str = "\x1b[43;1m";
    pub const BRIGHT_BLUE: &str = "\x1b[44;1m";
    pub const BRIGHT_MAGENTA: &str = "\x1b[45;1m";
    pub const BRIGHT_CYAN: &str = "\x1b[46;1m";
    pub const BRIGHT_WHITE: &str = "\x1b[47;1m";

    pub const GRAYSCALE_235: &str = "\x1b[48;5;235m";
    pub const GRAYSCALE_240: &str = "\x1b[48;5;240m";
    pub const GRAYSCALE_245: &str = "\x1b[48;5;245m";
    pub const GRAYSCALE_250: &str = "\x1b[48;5;250m";
}

/// Characters used to draw to the screen.
pub mod glyph {
    pub const EMPTY: char = ' ';

    // block characters
    pub const LIGHT_BLOCK: char = '░';
    pub const MEDIUM_BLOCK: char = '▒';
    pub const HEAVY_BLOCK: char = '▓';
    pub const SOLID_BLOCK: char = '█';

    // box drawing
    pub const HORIZONTAL: char = '─';
    pub const VERTICAL: char = '│';
    pub const TOP_LEFT: char = '┌';
    pub const TOP_CENTRE: char = '┬';
    pub const TOP_RIGHT: char = '┐';
    pub const MIDDLE_LEFT: char = '├';
    pub const CENTRE: char = '┼';
    pub const MIDDLE_RIGHT: char = '┤';
    pub const BOTTOM_LEFT: char = '└';
    pub const BOTTOM_CENTRE: char = '┴';
    pub const BOTTOM_RIGHT: char = '┘';
}
