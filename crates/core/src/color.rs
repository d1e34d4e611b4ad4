//! Grey levels used by the built-in views.

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Color(pub u8);

impl Color {
    pub const fn gray(self) -> u8 {
        self.0
    }
}

pub const BLACK: Color = Color(0x00);
pub const WHITE: Color = Color(0xFF);
pub const GRAY05: Color = Color(0x55);
pub const GRAY10: Color = Color(0xAA);
pub const GRAY13: Color = Color(0xDD);

pub const BAR_BACKGROUND: Color = GRAY13;
pub const BUTTON_NORMAL: Color = GRAY10;
pub const PLACEHOLDER_BACKGROUND: Color = GRAY05;
