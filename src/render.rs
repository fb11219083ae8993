use crate::projection::Projection;

/// An RGB color, one byte per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Creates a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color of a particle of the given intensity: blue, fading to white as intensity goes to 1.
    ///
    /// The red and green channels are `intensity × 255`, truncated and saturated to `0..=255`.
    ///
    /// ```
    /// # use psi_lens::render::Color;
    /// assert_eq!(Color::from_intensity(0.0), Color::new(0, 0, 255));
    /// assert_eq!(Color::from_intensity(0.5), Color::new(127, 127, 255));
    /// assert_eq!(Color::from_intensity(3.0), Color::new(255, 255, 255));
    /// ```
    #[inline]
    pub fn from_intensity(intensity: f64) -> Self {
        // Float to integer casts saturate, and NaN maps to 0.
        let channel = (intensity * 255.0) as u8;
        Self::new(channel, channel, 255)
    }

    /// The color packed as `0x00RRGGBB`.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

/// A filled circle to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Circle {
    /// Horizontal pixel coordinate of the center.
    pub x: i32,
    /// Vertical pixel coordinate of the center.
    pub y: i32,
    /// Radius in pixels, at least 1.
    pub radius: i32,
    /// Fill color.
    pub color: Color,
}

impl Circle {
    /// Circle representing a particle of the given intensity at its projected position.
    ///
    /// The radius is `scale × intensity × 10`, truncated, and never smaller than 1.
    #[inline]
    pub fn for_particle(projection: Projection, intensity: f64) -> Self {
        Self {
            x: projection.x,
            y: projection.y,
            radius: radius(projection.scale, intensity),
            color: Color::from_intensity(intensity),
        }
    }
}

/// Draw radius of a particle: `max(1, trunc(scale × intensity × 10))`.
#[inline]
pub fn radius(scale: f64, intensity: f64) -> i32 {
    ((scale * intensity * 10.0) as i32).max(1)
}

/// A surface the frame loop draws on.
pub trait Canvas {
    /// Size of the surface in pixels.
    fn size(&self) -> (u32, u32);

    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Draws a filled circle.
    fn fill_circle(&mut self, circle: Circle);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    #[inline]
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    #[inline]
    fn clear(&mut self, color: Color) {
        (**self).clear(color)
    }

    #[inline]
    fn fill_circle(&mut self, circle: Circle) {
        (**self).fill_circle(circle)
    }
}

/// A software [`Canvas`] backed by a buffer of packed `0x00RRGGBB` pixels.
///
/// ```
/// # use psi_lens::render::{Canvas, Circle, Color, FrameBuffer};
/// let mut frame = FrameBuffer::new(8, 8);
/// let white = Color::new(255, 255, 255);
/// frame.fill_circle(Circle { x: 4, y: 4, radius: 1, color: white });
///
/// assert_eq!(frame.pixel(4, 4), Some(white));
/// assert_eq!(frame.pixel(0, 0), Some(Color::BLACK));
/// ```
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    circles: u64,
}

impl FrameBuffer {
    /// Creates a black frame buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
            circles: 0,
        }
    }

    /// The pixels, row by row.
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Color of the pixel at `(x, y)`, if inside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let packed = self.pixels[(y * self.width + x) as usize];
        Some(Color::new((packed >> 16) as u8, (packed >> 8) as u8, packed as u8))
    }

    /// Number of circles drawn since the last [`clear`](Canvas::clear).
    #[inline]
    pub const fn circles(&self) -> u64 {
        self.circles
    }

    /// Number of pixels that are not black.
    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != 0).count()
    }
}

impl Canvas for FrameBuffer {
    #[inline]
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_u32());
        self.circles = 0;
    }

    fn fill_circle(&mut self, circle: Circle) {
        self.circles += 1;

        let (width, height) = (self.width as i64, self.height as i64);
        let (cx, cy, r) = (circle.x as i64, circle.y as i64, circle.radius.max(0) as i64);

        // Clip the bounding box first, circles can be centered far off screen.
        let (y0, y1) = ((cy - r).max(0), (cy + r).min(height - 1));
        let (x0, x1) = ((cx - r).max(0), (cx + r).min(width - 1));
        if x0 > x1 || y0 > y1 {
            return;
        }

        let packed = circle.color.to_u32();
        let r_2 = r * r;
        for y in y0..=y1 {
            let dy = y - cy;
            let row = (y * width) as usize;
            for x in x0..=x1 {
                let dx = x - cx;
                if dx * dx + dy * dy <= r_2 {
                    self.pixels[row + x as usize] = packed;
                }
            }
        }
    }
}
