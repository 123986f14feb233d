use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use parklot_infra::ParkingError;

pub fn parking_error_to_response(err: ParkingError) -> axum::response::Response {
    match err {
        ParkingError::LotFull(vehicle_type) => json_error(
            StatusCode::CONFLICT,
            "no_spot_available",
            format!("no spot available for {vehicle_type}"),
        ),
        ParkingError::NoActiveTicket(reg) => json_error(
            StatusCode::NOT_FOUND,
            "no_active_ticket",
            format!("no active ticket for vehicle {reg}"),
        ),
        ParkingError::TicketUpdateFailed => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "ticket_update_failed",
            "unable to update ticket information, error occurred",
        ),
        ParkingError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        ParkingError::SpotStore(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            e.to_string(),
        ),
        ParkingError::TicketStore(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            e.to_string(),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
