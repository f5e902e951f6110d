#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_time::Ticker;
use esp_hal::analog::adc::{Adc, AdcConfig, Attenuation};
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use log::{error, info, warn};

use socks_core::sampling::{LOG_EVERY_N_SAMPLES, SAMPLE_PERIOD, WINDOW_DURATION};
use socks_core::ui::UiConfig;
use socks_core::{SensorError, SensorReader};
use socks_firmware::adc::{EspAdc, SensorPin};

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Embassy initialized!");

    // The UI hardware is owned elsewhere; report the wiring it expects
    let ui = UiConfig::DEFAULT;
    if let Err(e) = ui.validate() {
        error!("UI configuration: {}", e);
    }
    info!("UI pins: {:?}", ui);

    // 11 dB attenuation lets the pin swing across most of the 3.3 V range
    let mut adc_config = AdcConfig::new();
    let pin = adc_config.enable_pin(peripherals.GPIO1, Attenuation::_11dB);
    let mut adc = EspAdc::new(Adc::new(peripherals.ADC1, adc_config));

    let mut reader: SensorReader<SensorPin<'_>> = SensorReader::new(pin);
    info!(
        "Sampling {} every {} ms (window {} ms)",
        reader.calibration().name,
        SAMPLE_PERIOD.as_millis(),
        WINDOW_DURATION.as_millis()
    );

    let mut ticker = Ticker::every(SAMPLE_PERIOD);
    let mut samples: u32 = 0;

    loop {
        match reader.update(&mut adc) {
            Ok(()) => {}
            Err(e @ SensorError::OutOfRange { .. }) => warn!("Dropped sample: {}", e),
            Err(e) => error!("{}", e),
        }

        samples = samples.wrapping_add(1);
        if samples % LOG_EVERY_N_SAMPLES == 0 {
            let reading = reader.reading();
            if reading.saturated {
                warn!("{} saturated, pressure estimate clipped", reader.calibration().name);
            }
            info!(
                "V={:.3} P={:.2} mmHg",
                reading.voltage, reading.pressure_mmhg
            );
        }

        ticker.next().await;
    }
}
