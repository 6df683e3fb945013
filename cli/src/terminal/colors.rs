use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 0x5f, g: 0xd7, b: 0x87 };
pub const ACCENT: Color = Color::TrueColor { r: 0xff, g: 0xaf, b: 0x00 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const IPV4_ADDR: Color = Color::TrueColor { r: 0x87, g: 0xaf, b: 0xff };
pub const IPV4_PREFIX: Color = Color::TrueColor { r: 0x5f, g: 0x87, b: 0xd7 };
pub const MAC_ADDR: Color = Color::TrueColor { r: 0xd7, g: 0x87, b: 0xff };
pub const PORT: Color = Color::Cyan;
pub const STREAM_URL: Color = Color::BrightGreen;
pub const INACTIVE: Color = Color::Red;
