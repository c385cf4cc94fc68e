//! torquesim firmware - simulated BLE torque sensor on nRF52840.
//!
//! Tasks:
//! - `softdevice_task` - SoftDevice event pump.
//! - `ble_task` - advertising + GATT server (peripheral role).
//! - `sensor_task` - 100 ms polling loop: replays the torque table,
//!   notifies the connected central, resumes advertising after a
//!   disconnect.

#![no_std]
#![no_main]

mod ble;
mod config;
mod diag;
mod error;
mod sensor;

use core::mem;

use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::interrupt::Priority;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Duration, Instant, Timer};
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ble::server::Server;
use ble::{
    BdAddr, DeviceIdentity, EventForwarder, LinkAction, LinkEvent, SoftdeviceLink, ADVERTISE,
    LINK_EVENTS, LINK_EVENT_DEPTH,
};
use sensor::generator::ValueGenerator;
use sensor::session::SensorSession;

static SERVER: StaticCell<Server> = StaticCell::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn ble_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    let handler = EventForwarder::new(LINK_EVENTS.sender());
    ble::peripheral::peripheral_task(sd, server, handler, &ADVERTISE).await
}

#[embassy_executor::task]
async fn sensor_task(
    server: &'static Server,
    events: Receiver<'static, CriticalSectionRawMutex, LinkEvent, LINK_EVENT_DEPTH>,
    identity: DeviceIdentity,
) -> ! {
    let generator = unwrap!(ValueGenerator::new(
        config::TORQUE_TABLE,
        config::UPDATE_INTERVAL_MS,
        Instant::now().as_millis(),
    ));
    diag::table(&generator);

    let mut session = SensorSession::new(generator);
    let mut link = SoftdeviceLink::new(server, &ADVERTISE);

    loop {
        while let Ok(event) = events.try_receive() {
            diag::link_event(&event);
            match session.handle_event(event) {
                Some(LinkAction::AnnounceIdentity) => diag::identity(&identity),
                Some(LinkAction::ReportAdvertiseFailure) => {
                    warn!("Advertising is not retried; reset the board to recover")
                }
                Some(LinkAction::Readvertise) | None => {}
            }
        }

        let cycle = session.poll(Instant::now().as_millis(), &mut link);
        if let Some(emission) = cycle.emission {
            diag::emission(&emission, &identity);
        }

        if cycle.readvertise {
            Timer::after(Duration::from_millis(config::RECONNECT_DELAY_MS)).await;
            match session.readvertise(&mut link) {
                Ok(()) => {
                    info!("Restarting BLE advertising");
                    diag::identity(&identity);
                }
                Err(e) => warn!("Could not restart advertising: {}", e),
            }
        }

        Timer::after(Duration::from_millis(config::POLL_INTERVAL_MS)).await;
    }
}

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 23 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: config::DEVICE_NAME.as_ptr() as _,
            current_len: config::DEVICE_NAME.len() as u16,
            max_len: config::DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    diag::banner();

    // The SoftDevice reserves interrupt priorities 0, 1 and 4.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.time_interrupt_priority = Priority::P2;
    let _p = embassy_nrf::init(nrf_config);

    let sd = Softdevice::enable(&softdevice_config());
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));

    let identity = DeviceIdentity {
        name: config::DEVICE_NAME,
        address: BdAddr(nrf_softdevice::ble::get_address(sd).bytes()),
        service_uuid: config::SERVICE_UUID,
        characteristic_uuid: config::CHARACTERISTIC_UUID,
    };
    diag::identity(&identity);

    unwrap!(spawner.spawn(softdevice_task(sd)));

    // Initial advertising; later rounds are requested by the sensor task.
    ADVERTISE.signal(());
    unwrap!(spawner.spawn(ble_task(sd, server)));
    unwrap!(spawner.spawn(sensor_task(server, LINK_EVENTS.receiver(), identity)));

    info!("BLE torque sensor is advertising - ready to transmit");
}
