use serde::Deserialize;

use parklot_infra::{EntryReceipt, ExitReceipt};
use parklot_lot::Ticket;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct EnterVehicleRequest {
    /// "car" | "bike" (case-insensitive); anything else is rejected.
    pub vehicle_type: String,
    pub reg_number: String,
}

#[derive(Debug, Deserialize)]
pub struct ExitVehicleRequest {
    pub reg_number: String,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn entry_to_json(receipt: EntryReceipt) -> serde_json::Value {
    serde_json::json!({
        "ticket_id": receipt.ticket_id.get(),
        "spot_id": receipt.spot_id.get(),
        "vehicle_type": receipt.vehicle_type.as_str(),
        "in_time": receipt.in_time.to_rfc3339(),
    })
}

pub fn exit_to_json(receipt: ExitReceipt) -> serde_json::Value {
    serde_json::json!({
        "out_time": receipt.out_time.to_rfc3339(),
        "price": receipt.price,
        "discount_applied": receipt.discount_applied,
    })
}

pub fn ticket_to_json(ticket: Ticket) -> serde_json::Value {
    serde_json::json!({
        "id": ticket.id.get(),
        "reg_number": ticket.vehicle_reg_number,
        "spot": {
            "id": ticket.spot.id.get(),
            "vehicle_type": ticket.spot.vehicle_type.as_str(),
            "available": ticket.spot.available,
        },
        "price": ticket.price,
        "in_time": ticket.in_time.to_rfc3339(),
        "out_time": ticket.out_time.map(|t| t.to_rfc3339()),
    })
}
