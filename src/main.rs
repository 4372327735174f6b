#[cfg(target_os = "espidf")]
mod http;
#[cfg(target_os = "espidf")]
mod oled;
#[cfg(target_os = "espidf")]
mod tcs34725;
#[cfg(target_os = "espidf")]
mod wifi;

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::cell::RefCell;

    use anyhow::{anyhow, Context};
    use chromapost::{app::App, clock::SystemClock, config::Config};
    use embedded_hal_bus::i2c::RefCellDevice;
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_hal::units::Hertz;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use log::info;

    const I2C_FREQ_HZ: u32 = 100_000;

    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    info!("chromapost {} starting", env!("CARGO_PKG_VERSION"));

    let cfg = Config::from_build_env();

    // ── 1. Peripherals ──
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;

    // ── 2. I2C bus, shared by display and sensor ──
    let i2c_config = I2cConfig::new().baudrate(Hertz(I2C_FREQ_HZ));
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21, // SDA
        peripherals.pins.gpio22, // SCL
        &i2c_config,
    )?;
    let i2c_bus = RefCell::new(i2c);

    // ── 3. Display, then sensor; either one missing is the single hard
    // stop in the system ──
    let display =
        oled::Oled::init(RefCellDevice::new(&i2c_bus)).context("SSD1306 display not found")?;

    let sensor = tcs34725::Tcs34725::probe(RefCellDevice::new(&i2c_bus))
        .ok_or_else(|| anyhow!("TCS34725 sensor not found"))?;

    // ── 4. WiFi handle; association is the control loop's job ──
    let link = wifi::EspLink::new(peripherals.modem, sysloop, &cfg.wifi_ssid, &cfg.wifi_pass)?;

    // ── 5. Control loop ──
    let app = App::new(
        &cfg,
        sensor,
        display,
        http::EspTransport,
        link,
        SystemClock::new(),
    );
    app.run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    // The firmware only makes sense on the device; the host build exists
    // so the control-loop core and its tests compile natively.
    eprintln!("chromapost targets the ESP32 (espidf); cross-compile to run it");
}
