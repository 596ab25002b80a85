//! Door reed-switch driver.
//!
//! ## Hardware
//!
//! Reed switch between the GPIO and GND with the internal pull-up
//! enabled.  The magnet holds the switch shut while the door is closed,
//! so the pin reads LOW when closed and HIGH when open.  The polarity is
//! a config flag for boards wired the other way round.
//!
//! No debounce: the polling interval is far longer than contact bounce.

use embedded_hal::digital::InputPin;

use crate::app::ports::DoorSensorPort;
use crate::error::SensorError;
use crate::fsm::context::DoorLevel;

pub struct GpioDoorSensor<P> {
    pin: P,
    open_when_high: bool,
}

impl<P: InputPin> GpioDoorSensor<P> {
    pub fn new(pin: P, open_when_high: bool) -> Self {
        Self {
            pin,
            open_when_high,
        }
    }

    /// Give the pin back (e.g. to reconfigure it).
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> DoorSensorPort for GpioDoorSensor<P> {
    fn read(&mut self) -> Result<DoorLevel, SensorError> {
        let high = self
            .pin
            .is_high()
            .map_err(|_| SensorError::GpioReadFailed)?;
        Ok(DoorLevel::from_open(high == self.open_when_high))
    }
}
