use super::Drawable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Horizontal resolution of the classic machine.
pub const SCREEN_WIDTH: u32 = 64;
/// Vertical resolution of the classic machine.
pub const SCREEN_HEIGHT: u32 = 32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SavedScreen")]
/// A struct describing a monochrome two-dimensional framebuffer
/// with individual pixels that are either on or off.
/// It can be queried by pixel or iterated over
/// but can only modified via specific methods.
///
/// Pixels are stored row-major with the origin at the top left.
pub struct Screen {
    // Width in pixels.
    width: u32,
    // Height in pixels.
    height: u32,
    // The actual pixel values.
    pixels: Vec<bool>,
}

// The serialized form. Only the classic resolution is accepted back.
#[derive(Deserialize)]
struct SavedScreen {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl TryFrom<SavedScreen> for Screen {
    type Error = String;

    fn try_from(saved: SavedScreen) -> Result<Screen, String> {
        if saved.width != SCREEN_WIDTH || saved.height != SCREEN_HEIGHT {
            return Err(format!(
                "screen is {}x{}, expected {SCREEN_WIDTH}x{SCREEN_HEIGHT}",
                saved.width, saved.height
            ));
        }
        let expected = (saved.width as usize) * (saved.height as usize);
        if saved.pixels.len() != expected {
            return Err(format!(
                "screen has {} pixels, expected {expected}",
                saved.pixels.len()
            ));
        }
        Ok(Screen {
            width: saved.width,
            height: saved.height,
            pixels: saved.pixels,
        })
    }
}

/// Iterator for a Screen that only returns pixels that are set,
/// as (x, y) pairs in row-major order.
pub struct ScreenIterator<'a> {
    screen: &'a Screen,
    // Index of the next pixel to look at.
    next: usize,
}

impl Iterator for ScreenIterator<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let width = self.screen.width as usize;
        while self.next < self.screen.pixels.len() {
            let index = self.next;
            self.next += 1;
            if self.screen.pixels[index] {
                return Some((index % width, index / width));
            }
        }

        None
    }
}

// Allow converting references of Screens to iterators
// for easy for loop iteration (but without consuming the Screen object itself).
impl<'a> IntoIterator for &'a Screen {
    type Item = (usize, usize);
    type IntoIter = ScreenIterator<'a>;

    fn into_iter(self) -> ScreenIterator<'a> {
        ScreenIterator {
            screen: self,
            next: 0,
        }
    }
}

impl Screen {
    pub fn new(width: u32, height: u32) -> Screen {
        Screen {
            width,
            height,
            pixels: vec![false; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether every pixel is off.
    pub fn is_clear(&self) -> bool {
        self.pixels.iter().all(|&pixel| !pixel)
    }

    /// Raw row-major pixel data.
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

impl Drawable for Screen {
    // Setters.
    fn clear_all_pixels(&mut self) {
        self.pixels.fill(false);
    }

    fn xor_pixel(&mut self, x: u16, y: u16) -> bool {
        let index = self.index(x, y);
        let was_on = self.pixels[index];
        self.pixels[index] = !was_on;
        was_on
    }

    // Getters.
    fn get_pixel(&self, x: u16, y: u16) -> bool {
        self.in_bounds(x as u32, y as u32) && self.pixels[self.index(x, y)]
    }

    // Info.
    fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }
}

// Renders the screen as text, one line per row.
impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.pixels.chunks(self.width as usize) {
            let line: String = row.iter().map(|&on| if on { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl Default for Screen {
    fn default() -> Screen {
        Screen::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_reports_previous_value() {
        let mut screen = Screen::default();
        assert!(!screen.xor_pixel(3, 4));
        assert!(screen.get_pixel(3, 4));
        assert!(screen.xor_pixel(3, 4));
        assert!(!screen.get_pixel(3, 4));
    }

    #[test]
    fn clear() {
        let mut screen = Screen::default();
        screen.xor_pixel(0, 0);
        screen.xor_pixel(63, 31);
        assert!(!screen.is_clear());
        screen.clear_all_pixels();
        assert!(screen.is_clear());
    }

    #[test]
    fn iterates_lit_pixels_row_major() {
        let mut screen = Screen::default();
        screen.xor_pixel(5, 1);
        screen.xor_pixel(63, 0);
        screen.xor_pixel(0, 31);
        let lit: Vec<_> = screen.into_iter().collect();
        assert_eq!(lit, vec![(63, 0), (5, 1), (0, 31)]);
    }

    #[test]
    fn bounds() {
        let screen = Screen::default();
        assert!(screen.in_bounds(63, 31));
        assert!(!screen.in_bounds(64, 0));
        assert!(!screen.in_bounds(0, 32));
        assert!(!screen.get_pixel(64, 0));
    }

    #[test]
    fn renders_text() {
        let mut screen = Screen::new(3, 2);
        screen.xor_pixel(1, 0);
        screen.xor_pixel(2, 1);
        assert_eq!(screen.to_string(), ".#.\n..#\n");
    }

    #[test]
    fn deserialize_checks_dimensions() {
        let mut screen = Screen::default();
        screen.xor_pixel(2, 2);
        let json = serde_json::to_string(&screen).unwrap();
        let restored: Screen = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, screen);

        let zero_width = json.replace("\"width\":64", "\"width\":0");
        assert!(serde_json::from_str::<Screen>(&zero_width).is_err());

        let odd_size = Screen::new(SCREEN_WIDTH, SCREEN_HEIGHT - 1);
        let short = serde_json::to_string(&odd_size)
            .unwrap()
            .replace("\"height\":31", "\"height\":32");
        assert!(serde_json::from_str::<Screen>(&short).is_err());
    }
}
