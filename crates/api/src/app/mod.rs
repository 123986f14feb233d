//! Application wiring: services, routes, DTOs, error mapping.

use std::sync::Arc;

use axum::{Extension, Router};

use parklot_infra::{
    InMemorySpotStore, InMemoryTicketStore, ParkingService, SpotStore, TicketStore,
};

pub mod dto;
pub mod errors;
pub mod routes;

/// Lot shape used when provisioning the in-memory spot table at startup.
#[derive(Debug, Clone, Copy)]
pub struct LotLayout {
    pub car_spots: i32,
    pub bike_spots: i32,
}

impl LotLayout {
    /// Defaults mirror the reference lot: spots 1-3 for cars, 4-5 for bikes.
    pub const DEFAULT: LotLayout = LotLayout {
        car_spots: 3,
        bike_spots: 2,
    };

    /// Read `LOT_CAR_SPOTS` / `LOT_BIKE_SPOTS`, falling back to the default
    /// layout with a warning.
    pub fn from_env() -> Self {
        let read = |key: &str, default: i32| {
            std::env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    tracing::warn!("{key} unset or invalid; using {default}");
                    default
                })
        };

        Self {
            car_spots: read("LOT_CAR_SPOTS", Self::DEFAULT.car_spots),
            bike_spots: read("LOT_BIKE_SPOTS", Self::DEFAULT.bike_spots),
        }
    }
}

/// Shared application services handed to every handler.
///
/// The stores are trait objects: handlers and tests never care which
/// backend is behind the orchestrator.
pub struct AppServices {
    pub parking: ParkingService<Arc<dyn SpotStore>, Arc<dyn TicketStore>>,
    pub tickets: Arc<dyn TicketStore>,
}

impl AppServices {
    pub fn in_memory(layout: LotLayout) -> Self {
        let spots: Arc<dyn SpotStore> =
            Arc::new(InMemorySpotStore::with_layout(layout.car_spots, layout.bike_spots));
        let tickets: Arc<dyn TicketStore> = Arc::new(InMemoryTicketStore::new());

        Self {
            parking: ParkingService::new(spots, tickets.clone()),
            tickets,
        }
    }
}

/// Build the full application router backed by in-memory stores.
pub fn build_app(layout: LotLayout) -> Router {
    let services = Arc::new(AppServices::in_memory(layout));

    Router::new()
        .merge(routes::router())
        .layer(Extension(services))
}
