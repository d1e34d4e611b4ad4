use crate::geom::Rectangle;
use crate::settings::Settings;

/// Screen metrics supplied by the host platform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Display {
    pub dims: (u32, u32),
}

impl Display {
    pub fn rect(&self) -> Rectangle {
        Rectangle::from_dims(self.dims.0, self.dims.1)
    }
}

/// Shared state handed to every view while handling events.
pub struct Context {
    pub display: Display,
    pub settings: Settings,
}

impl Context {
    pub fn new(dims: (u32, u32), settings: Settings) -> Context {
        Context {
            display: Display { dims },
            settings,
        }
    }
}
