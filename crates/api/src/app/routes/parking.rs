use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use parklot_core::VehicleType;
use parklot_infra::TicketStore;

use crate::app::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/entries", post(enter_vehicle))
        .route("/exits", post(exit_vehicle))
        .route("/tickets/:reg_number", get(get_open_ticket))
}

/// `enterVehicle`: admit a vehicle and report its assigned spot.
pub async fn enter_vehicle(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::EnterVehicleRequest>,
) -> axum::response::Response {
    let vehicle_type: VehicleType = match body.vehicle_type.parse() {
        Ok(v) => v,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string());
        }
    };

    match services
        .parking
        .process_incoming_vehicle(vehicle_type, &body.reg_number, Utc::now())
    {
        Ok(receipt) => (StatusCode::CREATED, Json(dto::entry_to_json(receipt))).into_response(),
        Err(e) => errors::parking_error_to_response(e),
    }
}

/// `exitVehicle`: close the stay and report the computed fare.
pub async fn exit_vehicle(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ExitVehicleRequest>,
) -> axum::response::Response {
    match services
        .parking
        .process_exiting_vehicle(&body.reg_number, Utc::now())
    {
        Ok(receipt) => (StatusCode::OK, Json(dto::exit_to_json(receipt))).into_response(),
        Err(e) => errors::parking_error_to_response(e),
    }
}

/// Open-ticket lookup for a registration number.
pub async fn get_open_ticket(
    Extension(services): Extension<Arc<AppServices>>,
    Path(reg_number): Path<String>,
) -> axum::response::Response {
    match services.tickets.get_open_ticket(&reg_number) {
        Ok(Some(ticket)) => (StatusCode::OK, Json(dto::ticket_to_json(ticket))).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "no_active_ticket",
            format!("no active ticket for vehicle {reg_number}"),
        ),
        Err(e) => {
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}
