//! embedded-graphics display adapter.
//!
//! Implements [`DisplaySurface`] for any `DrawTarget<Color = Rgb565>`:
//! the ST7789 panel on the board, or an in-memory framebuffer in tests.
//!
//! Text uses the 6×10 mono font blown up by an integer factor, the same
//! way classic TFT libraries implement "text size": each font pixel
//! becomes a `scale × scale` block.

use embedded_graphics::Pixel;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Dimensions, Point, Size};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::{Rgb565, WebColors};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Ellipse, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::app::ports::{Decoration, DisplaySurface};
use crate::error::DisplayError;

// ── Bowl geometry (px) ────────────────────────────────────────

const BOWL_RIM_HALF_WIDTH: i32 = 50;
const BOWL_BASE_HALF_WIDTH: i32 = 30;
const BOWL_DEPTH: i32 = 28;
const FOOD_HEIGHT: u32 = 20;
const BOWL_COLOUR: Rgb565 = Rgb565::CSS_STEEL_BLUE;
const FOOD_COLOUR: Rgb565 = Rgb565::CSS_SADDLE_BROWN;

/// Adapter that renders the timer screen through embedded-graphics.
pub struct EgDisplay<D> {
    target: D,
}

impl<D> EgDisplay<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn draw_bowl(&mut self, anchor: Point) -> Result<(), D::Error> {
        let rim_y = anchor.y + FOOD_HEIGHT as i32 / 2;

        // Kibble mound first; the bowl body covers its lower half.
        Ellipse::with_center(
            Point::new(anchor.x, rim_y),
            Size::new((BOWL_RIM_HALF_WIDTH * 2 - 16) as u32, FOOD_HEIGHT),
        )
        .into_styled(PrimitiveStyle::with_fill(FOOD_COLOUR))
        .draw(&mut self.target)?;

        // Body: one horizontal line per row, tapering to the base.
        let body = PrimitiveStyle::with_stroke(BOWL_COLOUR, 1);
        for row in 0..BOWL_DEPTH {
            let half = BOWL_RIM_HALF_WIDTH
                - (BOWL_RIM_HALF_WIDTH - BOWL_BASE_HALF_WIDTH) * row / BOWL_DEPTH;
            Line::new(
                Point::new(anchor.x - half, rim_y + row),
                Point::new(anchor.x + half, rim_y + row),
            )
            .into_styled(body)
            .draw(&mut self.target)?;
        }

        // Rim highlight.
        Line::new(
            Point::new(anchor.x - BOWL_RIM_HALF_WIDTH - 4, rim_y),
            Point::new(anchor.x + BOWL_RIM_HALF_WIDTH + 4, rim_y),
        )
        .into_styled(PrimitiveStyle::with_stroke(Rgb565::WHITE, 3))
        .draw(&mut self.target)
    }
}

impl<D> DisplaySurface for EgDisplay<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn size(&self) -> Size {
        self.target.bounding_box().size
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        self.target.clear(color).map_err(|_| DisplayError::BusWrite)
    }

    fn fill_rect(&mut self, area: Rectangle, color: Rgb565) -> Result<(), DisplayError> {
        let area = area.intersection(&self.target.bounding_box());
        if area.size.width == 0 || area.size.height == 0 {
            return Ok(());
        }
        self.target
            .fill_solid(&area, color)
            .map_err(|_| DisplayError::BusWrite)
    }

    fn measure_text(&self, text: &str, scale: u8) -> Size {
        let style = MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE);
        let base = Text::with_baseline(text, Point::zero(), style, Baseline::Top)
            .bounding_box()
            .size;
        base * u32::from(scale)
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        scale: u8,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(&FONT_6X10, color);
        let mut scaled = Scaled::new(&mut self.target, origin, scale);
        Text::with_baseline(text, Point::zero(), style, Baseline::Top)
            .draw(&mut scaled)
            .map(|_| ())
            .map_err(|_| DisplayError::BusWrite)
    }

    fn draw_decoration(&mut self, decoration: Decoration, anchor: Point) -> Result<(), DisplayError> {
        match decoration {
            Decoration::Bowl => self.draw_bowl(anchor).map_err(|_| DisplayError::BusWrite),
        }
    }
}

// ── Pixel-scaling draw target ─────────────────────────────────

/// Maps each pixel drawn at `p` onto a `scale × scale` block at
/// `origin + p * scale` on the wrapped target, clipped to its bounds.
struct Scaled<'a, D> {
    target: &'a mut D,
    origin: Point,
    scale: u32,
}

impl<'a, D: DrawTarget> Scaled<'a, D> {
    fn new(target: &'a mut D, origin: Point, scale: u8) -> Self {
        Self {
            target,
            origin,
            scale: u32::from(scale.max(1)),
        }
    }
}

impl<D: DrawTarget> Dimensions for Scaled<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        let outer = self.target.bounding_box();
        Rectangle::new(
            (outer.top_left - self.origin) / self.scale as i32,
            outer.size / self.scale + Size::new(1, 1),
        )
    }
}

impl<D: DrawTarget> DrawTarget for Scaled<'_, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let clip = self.target.bounding_box();
        let block = Size::new_equal(self.scale);
        for Pixel(point, color) in pixels {
            let top_left = self.origin + point * self.scale as i32;
            let cell = Rectangle::new(top_left, block).intersection(&clip);
            if cell.size.width > 0 && cell.size.height > 0 {
                self.target.fill_solid(&cell, color)?;
            }
        }
        Ok(())
    }
}
