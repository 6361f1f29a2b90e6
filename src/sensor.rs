use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context as _;
use backon::BlockingRetryable;
use backon::ConstantBuilder;
use bme280::i2c::BME280;
use rppal::{hal::Delay, i2c::I2c};

use crate::measurement::{LocalReading, RawReading};

pub const INIT_RETRY_DELAY: Duration = Duration::from_millis(100);
pub const INIT_RETRY_MAX_TIMES: usize = 20;

const PASCALS_PER_HECTOPASCAL: f64 = 100.0;

/// Anything that can report the current temperature and pressure.
pub trait Barometer {
    fn read(&mut self) -> Result<RawReading, anyhow::Error>;
}

/// BMP280/BME280 on the primary I2C address of the Raspberry Pi bus.
#[derive(Debug)]
pub struct Bme280Barometer {
    delay: Delay,
    bme280: BME280<I2c>,
}

impl Bme280Barometer {
    pub fn new() -> Result<Bme280Barometer, anyhow::Error> {
        let i2c = I2c::new().context("Failed to initialize I2C")?;
        let bme280 = BME280::new_primary(i2c);

        Ok(Bme280Barometer {
            delay: Delay,
            bme280,
        })
    }

    pub fn init(&mut self) -> Result<(), anyhow::Error> {
        let retry_builder = ConstantBuilder::default()
            .with_delay(INIT_RETRY_DELAY)
            .with_max_times(INIT_RETRY_MAX_TIMES);

        (|| self.bme280.init(&mut Delay))
            .retry(retry_builder)
            .notify(|e, dur| {
                log::error!("{e}");
                log::info!("Retrying in {:?}", dur);
            })
            .call()
            .context("Failed to initialize BME280")?;

        Ok(())
    }
}

impl Barometer for Bme280Barometer {
    fn read(&mut self) -> Result<RawReading, anyhow::Error> {
        let m = self
            .bme280
            .measure(&mut self.delay)
            .context("Failed to read BME280 measurements")?;

        Ok(RawReading {
            temperature_c: f64::from(m.temperature),
            pressure_hpa: f64::from(m.pressure) / PASCALS_PER_HECTOPASCAL,
        })
    }
}

/// Shares one barometer between concurrent requests.
pub struct LocalReader {
    barometer: Mutex<Box<dyn Barometer + Send>>,
}

impl LocalReader {
    pub fn new(barometer: Box<dyn Barometer + Send>) -> LocalReader {
        LocalReader {
            barometer: Mutex::new(barometer),
        }
    }

    pub fn read_local(&self) -> Result<LocalReading, anyhow::Error> {
        let mut barometer = self
            .barometer
            .lock()
            .map_err(|_| anyhow::anyhow!("Sensor lock poisoned"))?;
        let raw = barometer.read()?;

        Ok(LocalReading::from(raw))
    }
}
