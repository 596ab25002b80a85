//! ST7789 TFT panel bring-up (ESP-IDF only).
//!
//! Powers the panel rail, resets and initialises the controller over
//! SPI2 through `mipidsi`, applies the configured rotation and finally
//! switches the backlight on so the user never sees controller garbage.
//!
//! [`TftPanel`] is an embedded-graphics `DrawTarget`; wrap it in
//! [`EgDisplay`](crate::adapters::display::EgDisplay) to get a
//! [`DisplaySurface`](crate::app::ports::DisplaySurface).

use embedded_graphics::Pixel;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::Dimensions;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Output, PinDriver};
use esp_idf_hal::spi::config::Config as SpiConfig;
use esp_idf_hal::spi::{SPI2, SpiDeviceDriver, SpiDriver, SpiDriverConfig};
use esp_idf_hal::units::Hertz;
use log::info;
use mipidsi::Builder;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};

use crate::error::Error;
use crate::pins;

type PanelSpi = SpiDeviceDriver<'static, SpiDriver<'static>>;
type PanelPin = PinDriver<'static, AnyOutputPin, Output>;
type PanelDisplay = mipidsi::Display<SpiInterface<'static, PanelSpi, PanelPin>, ST7789, PanelPin>;

/// Size of the SPI staging buffer handed to `mipidsi`.
const SPI_BUFFER_LEN: usize = 512;

/// The initialised panel.  Keeps the power and backlight drivers alive:
/// dropping a `PinDriver` returns its pin to the reset state.
pub struct TftPanel {
    display: PanelDisplay,
    _backlight: PanelPin,
    _power: PanelPin,
}

impl TftPanel {
    /// Bring the panel up.  `rotation` is in quarter turns (0-3).
    pub fn new(spi: SPI2, rotation: u8) -> Result<Self, Error> {
        // SAFETY: each GPIO number is claimed exactly once, here, and never
        // handed to another driver; numbers come from `pins`.
        let (sclk, mosi, cs, dc, rst, backlight, power) = unsafe {
            (
                AnyIOPin::new(pins::TFT_SCLK_GPIO),
                AnyIOPin::new(pins::TFT_MOSI_GPIO),
                AnyIOPin::new(pins::TFT_CS_GPIO),
                AnyOutputPin::new(pins::TFT_DC_GPIO),
                AnyOutputPin::new(pins::TFT_RST_GPIO),
                AnyOutputPin::new(pins::TFT_BACKLIGHT_GPIO),
                AnyOutputPin::new(pins::TFT_POWER_GPIO),
            )
        };

        let mut power = PinDriver::output(power).map_err(|_| Error::Init("TFT power pin"))?;
        power
            .set_high()
            .map_err(|_| Error::Init("TFT power pin"))?;
        let mut backlight =
            PinDriver::output(backlight).map_err(|_| Error::Init("TFT backlight pin"))?;
        backlight
            .set_low()
            .map_err(|_| Error::Init("TFT backlight pin"))?;

        let spi = SpiDeviceDriver::new_single(
            spi,
            sclk,
            mosi,
            Option::<AnyIOPin>::None,
            Some(cs),
            &SpiDriverConfig::new(),
            &SpiConfig::new().baudrate(Hertz(pins::TFT_SPI_FREQ_HZ)),
        )
        .map_err(|_| Error::Init("TFT SPI bus"))?;
        let dc = PinDriver::output(dc).map_err(|_| Error::Init("TFT DC pin"))?;
        let rst = PinDriver::output(rst).map_err(|_| Error::Init("TFT reset pin"))?;

        let buffer: &'static mut [u8] = Box::leak(Box::new([0u8; SPI_BUFFER_LEN]));
        let interface = SpiInterface::new(spi, dc, buffer);

        let display = Builder::new(ST7789, interface)
            .display_size(pins::TFT_WIDTH, pins::TFT_HEIGHT)
            .display_offset(pins::TFT_COL_OFFSET, 0)
            .invert_colors(ColorInversion::Inverted)
            .orientation(Orientation::new().rotate(rotation_from_quarter_turns(rotation)))
            .reset_pin(rst)
            .init(&mut Ets)
            .map_err(|_| Error::Init("ST7789 init"))?;

        backlight
            .set_high()
            .map_err(|_| Error::Init("TFT backlight pin"))?;

        info!(
            "tft: ST7789 {}x{} up, rotation={}",
            pins::TFT_WIDTH,
            pins::TFT_HEIGHT,
            rotation
        );

        Ok(Self {
            display,
            _backlight: backlight,
            _power: power,
        })
    }
}

fn rotation_from_quarter_turns(quarter_turns: u8) -> Rotation {
    match quarter_turns % 4 {
        0 => Rotation::Deg0,
        1 => Rotation::Deg90,
        2 => Rotation::Deg180,
        _ => Rotation::Deg270,
    }
}

// ── DrawTarget delegation (keeps mipidsi's fast fill paths) ────

impl Dimensions for TftPanel {
    fn bounding_box(&self) -> Rectangle {
        self.display.bounding_box()
    }
}

impl DrawTarget for TftPanel {
    type Color = Rgb565;
    type Error = <PanelDisplay as DrawTarget>::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.display.draw_iter(pixels)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.display.fill_contiguous(area, colors)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.display.fill_solid(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.display.clear(color)
    }
}
