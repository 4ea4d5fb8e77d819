mod drawable;
mod headless;
mod interactible;
#[cfg(test)]
mod mockhardware;
mod screen;

pub use drawable::Drawable;
pub use headless::Headless;
pub use interactible::HostEvent;
pub use interactible::Interactible;
#[cfg(test)]
pub use mockhardware::MockHardware;
pub use screen::{Screen, ScreenIterator, SCREEN_HEIGHT, SCREEN_WIDTH};
