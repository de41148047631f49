//! Host-side inspection of SDR settings-file mirrors.
//!
//! A mirror is one container slot, byte-identical to the device's
//! backup-domain region. This crate reads a mirror without healing or
//! defaulting anything: the dump shows what is actually stored, including
//! values the on-device accessors would repair.

use std::fs;
use std::fmt::Write as _;
use std::path::Path;

use sdr_pmem::container::{Container, REGION_SIZE};
use sdr_pmem::record::Record;
use sdr_pmem::{MiscConfig, ReconConfig, STRUCT_VERSION, UiConfig, UiConfig2};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("settings file is {actual} bytes, expected {expected}")]
    WrongSize { expected: usize, actual: usize },
}

/// Read one slot from `path`. The file must be exactly one container long.
pub fn read_slot(path: &Path) -> Result<Container, Error> {
    let bytes = fs::read(path)?;
    let slot: &[u8; REGION_SIZE] =
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| Error::WrongSize {
                expected: REGION_SIZE,
                actual: bytes.len(),
            })?;
    Ok(Container::from_bytes(slot))
}

/// Integrity summary of a mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub valid: bool,
    pub stored_check_value: u32,
    pub computed_check_value: u32,
    pub structure_version: u32,
}

impl Verification {
    /// Whether a device running this build would accept the slot at
    /// bootstrap (valid check value and the current structure version).
    pub fn restorable(&self) -> bool {
        self.valid && self.structure_version == STRUCT_VERSION
    }
}

pub fn verify(path: &Path) -> Result<Verification, Error> {
    let slot = read_slot(path)?;
    let record = Record::deserialize(slot.payload());
    Ok(Verification {
        valid: slot.is_valid(),
        stored_check_value: slot.stored_check_value(),
        computed_check_value: slot.computed_check_value(),
        structure_version: record.structure_version,
    })
}

/// Write a factory-default mirror to `path`.
pub fn write_defaults(path: &Path) -> Result<(), Error> {
    let record = Record::with_defaults();
    let mut payload = [0u8; sdr_pmem::PAYLOAD_SIZE];
    record.serialize(&mut payload);
    let container = Container::from_payload(payload);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, container.to_bytes())?;
    Ok(())
}

/// Human-readable dump of everything in the mirror, raw values as stored.
pub fn dump(path: &Path) -> Result<String, Error> {
    let slot = read_slot(path)?;
    let record = Record::deserialize(slot.payload());
    let mut out = String::new();

    let _ = writeln!(out, "[container]");
    let _ = writeln!(out, "valid: {}", slot.is_valid());
    let _ = writeln!(
        out,
        "stored_check_value: 0x{:08X}",
        slot.stored_check_value()
    );
    let _ = writeln!(
        out,
        "computed_check_value: 0x{:08X}",
        slot.computed_check_value()
    );

    let _ = writeln!(out, "\n[record]");
    let _ = writeln!(
        out,
        "structure_version: 0x{:08X}{}",
        record.structure_version,
        if record.structure_version == STRUCT_VERSION {
            " (current)"
        } else {
            " (foreign)"
        }
    );
    let _ = writeln!(out, "target_frequency: {}", record.target_frequency);
    let _ = writeln!(out, "correction_ppb: {}", record.correction_ppb);
    let _ = writeln!(out, "modem_def_index: {}", record.modem_def_index);
    let _ = writeln!(
        out,
        "serial_format: {} data bits, parity {}, {} stop, order {}",
        record.serial_data_bits,
        record.serial_parity,
        record.serial_stop_bits,
        record.serial_bit_order
    );
    let _ = writeln!(out, "modem_bw: {}", record.modem_bw);
    let _ = writeln!(out, "afsk_mark_freq: {}", record.afsk_mark_freq);
    let _ = writeln!(out, "afsk_space_freq: {}", record.afsk_space_freq);
    let _ = writeln!(out, "modem_baudrate: {}", record.modem_baudrate);
    let _ = writeln!(out, "modem_repeat: {}", record.modem_repeat);
    let _ = writeln!(out, "pocsag_last_address: {}", record.pocsag_last_address);
    let _ = writeln!(
        out,
        "pocsag_ignore_address: {}",
        record.pocsag_ignore_address
    );
    let _ = writeln!(out, "tone_mix: {}", record.tone_mix);
    let _ = writeln!(out, "hardware_config: {}", record.hardware_config);
    let _ = writeln!(
        out,
        "fake_brightness_level: {}",
        record.fake_brightness_level
    );
    let _ = writeln!(
        out,
        "touchscreen_threshold: {}",
        record.touchscreen_threshold
    );
    let _ = writeln!(out, "clkout_freq: {}", record.clkout_freq);
    let _ = writeln!(out, "menu_color: 0x{:04X}", record.menu_color);
    let _ = writeln!(out, "recon_repeat_nb: {}", record.recon_repeat_nb);
    let _ = writeln!(out, "recon_repeat_gain: {}", record.recon_repeat_gain);
    let _ = writeln!(out, "recon_repeat_delay: {}", record.recon_repeat_delay);
    let _ = writeln!(
        out,
        "encoder_dial_sensitivity: {}",
        record.encoder_dial_sensitivity
    );
    let _ = writeln!(
        out,
        "encoder_rate_multiplier: {}",
        record.encoder_rate_multiplier
    );
    let _ = writeln!(
        out,
        "encoder_dial_direction: {}",
        record.encoder_dial_direction
    );
    let _ = writeln!(out, "converter_enabled: {}", record.converter_enabled);
    let _ = writeln!(out, "updown_converter: {}", record.updown_converter);
    let _ = writeln!(
        out,
        "converter_frequency_offset: {}",
        record.converter_frequency_offset
    );
    let _ = writeln!(
        out,
        "updown_frequency_rx_correction: {}",
        record.updown_frequency_rx_correction
    );
    let _ = writeln!(
        out,
        "updown_frequency_tx_correction: {}",
        record.updown_frequency_tx_correction
    );
    let _ = writeln!(
        out,
        "frequency_rx_correction: {}",
        record.frequency_rx_correction
    );
    let _ = writeln!(
        out,
        "frequency_tx_correction: {}",
        record.frequency_tx_correction
    );
    let _ = writeln!(out, "lcd_normally_black: {}", record.lcd_normally_black);
    let _ = writeln!(out, "dst_config: 0x{:08X}", record.dst_config.0);
    let _ = writeln!(out, "headphone_volume_cb: {}", record.headphone_volume_cb);
    let _ = writeln!(
        out,
        "config_mode_storage: 0x{:08X}",
        record.config_mode_storage
    );
    let _ = writeln!(
        out,
        "touch_calibration_magic: 0x{:08X}",
        record.touch_calibration_magic
    );
    let cal = record.touch_calibration;
    let _ = writeln!(
        out,
        "touch_calibration: a={} b={} c={} d={} e={} f={} divisor={}",
        cal.a, cal.b, cal.c, cal.d, cal.e, cal.f, cal.divisor
    );

    dump_ui_config(&mut out, record.ui_config);
    dump_ui_config2(&mut out, record.ui_config2);
    dump_misc_config(&mut out, record.misc_config);
    dump_recon_config(&mut out, record.recon_config);

    Ok(out)
}

fn dump_ui_config(out: &mut String, config: UiConfig) {
    let _ = writeln!(out, "\n[ui_config] raw: 0x{:08X}", config.raw());
    let timer = config.backlight_timer();
    let _ = writeln!(out, "backlight_timer.enabled: {}", timer.enabled);
    let _ = writeln!(
        out,
        "backlight_timer.timeout_seconds: {}",
        timer.timeout_seconds()
    );
    let _ = writeln!(out, "show_gui_return_icon: {}", config.show_gui_return_icon());
    let _ = writeln!(out, "load_app_settings: {}", config.load_app_settings());
    let _ = writeln!(out, "save_app_settings: {}", config.save_app_settings());
    let _ = writeln!(out, "disable_touchscreen: {}", config.disable_touchscreen());
    let _ = writeln!(out, "hide_clock: {}", config.hide_clock());
    let _ = writeln!(out, "clock_with_date: {}", config.clock_with_date());
    let _ = writeln!(out, "clkout_enabled: {}", config.clkout_enabled());
    let _ = writeln!(
        out,
        "apply_fake_brightness: {}",
        config.apply_fake_brightness()
    );
    let _ = writeln!(out, "stealth_mode: {}", config.stealth_mode());
    let _ = writeln!(out, "config_login: {}", config.config_login());
    let _ = writeln!(out, "config_splash: {}", config.config_splash());
}

fn dump_ui_config2(out: &mut String, config: UiConfig2) {
    let _ = writeln!(out, "\n[ui_config2] raw: 0x{:08X}", config.raw());
    let _ = writeln!(out, "hide_speaker: {}", config.hide_speaker());
    let _ = writeln!(out, "hide_converter: {}", config.hide_converter());
    let _ = writeln!(out, "hide_stealth: {}", config.hide_stealth());
    let _ = writeln!(out, "hide_camera: {}", config.hide_camera());
    let _ = writeln!(out, "hide_sleep: {}", config.hide_sleep());
    let _ = writeln!(out, "hide_bias_tee: {}", config.hide_bias_tee());
    let _ = writeln!(out, "hide_clock: {}", config.hide_clock());
    let _ = writeln!(out, "hide_sd_card: {}", config.hide_sd_card());
    let _ = writeln!(out, "hide_mute: {}", config.hide_mute());
    let _ = writeln!(
        out,
        "hide_fake_brightness: {}",
        config.hide_fake_brightness()
    );
    let _ = writeln!(out, "hide_battery_icon: {}", config.hide_battery_icon());
    let _ = writeln!(
        out,
        "hide_numeric_battery: {}",
        config.hide_numeric_battery()
    );
    let _ = writeln!(out, "theme_id: {}", config.theme_id());
    let _ = writeln!(out, "override_batt_calc: {}", config.override_batt_calc());
    let _ = writeln!(out, "button_repeat_delay: {}", config.button_repeat_delay());
    let _ = writeln!(out, "button_repeat_speed: {}", config.button_repeat_speed());
    let _ = writeln!(
        out,
        "button_long_press_delay: {}",
        config.button_long_press_delay()
    );
    let _ = writeln!(
        out,
        "battery_charge_hint: {}",
        config.battery_charge_hint()
    );
}

fn dump_misc_config(out: &mut String, config: MiscConfig) {
    let _ = writeln!(out, "\n[misc_config] raw: 0x{:08X}", config.raw());
    let _ = writeln!(out, "audio_mute: {}", config.audio_mute());
    let _ = writeln!(out, "speaker_disable: {}", config.speaker_disable());
    let _ = writeln!(
        out,
        "disable_external_tcxo: {}",
        config.disable_external_tcxo()
    );
    let _ = writeln!(
        out,
        "sdcard_high_speed_io: {}",
        config.sdcard_high_speed_io()
    );
    let _ = writeln!(out, "disable_config_mode: {}", config.disable_config_mode());
    let _ = writeln!(out, "beep_on_packets: {}", config.beep_on_packets());
}

fn dump_recon_config(out: &mut String, config: ReconConfig) {
    let _ = writeln!(out, "\n[recon_config] raw: 0x{:016X}", config.raw());
}
