//! Peripheral role: advertise, accept one central, serve GATT until the
//! link drops.
//!
//! Advertising is started only on request (see [`super::ADVERTISE`]): once
//! at boot, then by the sensor task after each disconnect.

use defmt::{error, info};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use nrf_softdevice::ble::advertisement_builder::{
    Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
};
use nrf_softdevice::ble::{gatt_server, peripheral};
use nrf_softdevice::Softdevice;

use super::server::{on_event, Server};
use super::{BdAddr, ConnectionHandler, EventForwarder, CONNECTION};
use crate::config;

/// Flags + complete list of 128-bit services.
static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .services_128(ServiceList::Complete, &[config::SERVICE_UUID_LE])
    .build();

/// Device name, shortened if it does not fit.
static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .adapt_name(config::DEVICE_NAME)
    .build();

/// Run the peripheral loop forever.
pub async fn peripheral_task(
    sd: &'static Softdevice,
    server: &'static Server,
    handler: EventForwarder,
    advertise: &'static Signal<CriticalSectionRawMutex, ()>,
) -> ! {
    let adv_config = peripheral::Config {
        interval: config::BLE_ADV_INTERVAL,
        ..Default::default()
    };

    loop {
        advertise.wait().await;

        info!("BLE advertising as {}", config::DEVICE_NAME);
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };

        let conn = match peripheral::advertise_connectable(sd, adv, &adv_config).await {
            Ok(conn) => conn,
            Err(e) => {
                error!("BLE advertising failed: {:?}", e);
                handler.on_advertise_failed();
                continue;
            }
        };

        let peer = BdAddr(conn.peer_address().bytes());
        CONNECTION.lock(|c| *c.borrow_mut() = Some(conn.clone()));
        handler.on_connect(peer);

        // Returns once the central disconnects.
        let _result = gatt_server::run(&conn, server, on_event).await;

        CONNECTION.lock(|c| *c.borrow_mut() = None);
        handler.on_disconnect();
    }
}
