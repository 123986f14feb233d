use std::collections::BTreeMap;
use std::sync::RwLock;

use parklot_core::TicketId;
use parklot_lot::Ticket;

use super::r#trait::{TicketStore, TicketStoreError};

/// In-memory ticket table with serially assigned ids.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryTicketStore {
    tickets: RwLock<BTreeMap<TicketId, Ticket>>,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(tickets: &BTreeMap<TicketId, Ticket>) -> TicketId {
        TicketId::new(tickets.keys().last().map(|id| id.get()).unwrap_or(0) + 1)
    }
}

impl TicketStore for InMemoryTicketStore {
    fn save(&self, mut ticket: Ticket) -> Result<TicketId, TicketStoreError> {
        let mut tickets = self
            .tickets
            .write()
            .map_err(|_| TicketStoreError::Backend("lock poisoned".to_string()))?;

        let id = Self::next_id(&tickets);
        ticket.id = id;
        tickets.insert(id, ticket);
        Ok(id)
    }

    fn get_open_ticket(&self, reg_number: &str) -> Result<Option<Ticket>, TicketStoreError> {
        let tickets = self
            .tickets
            .read()
            .map_err(|_| TicketStoreError::Backend("lock poisoned".to_string()))?;

        Ok(tickets
            .values()
            .rev()
            .find(|t| t.vehicle_reg_number == reg_number && t.is_open())
            .cloned())
    }

    fn update(&self, ticket: &Ticket) -> Result<(), TicketStoreError> {
        let mut tickets = self
            .tickets
            .write()
            .map_err(|_| TicketStoreError::Backend("lock poisoned".to_string()))?;

        let stored = tickets
            .get_mut(&ticket.id)
            .ok_or(TicketStoreError::UnknownTicket(ticket.id))?;
        stored.out_time = ticket.out_time;
        stored.price = ticket.price;
        Ok(())
    }

    fn count_completed(&self, reg_number: &str) -> Result<u64, TicketStoreError> {
        let tickets = self
            .tickets
            .read()
            .map_err(|_| TicketStoreError::Backend("lock poisoned".to_string()))?;

        Ok(tickets
            .values()
            .filter(|t| t.vehicle_reg_number == reg_number && !t.is_open())
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use parklot_core::{SpotId, VehicleType};
    use parklot_lot::ParkingSpot;

    const REG: &str = "ABCDEF";

    fn open_ticket(reg: &str) -> Ticket {
        let spot = ParkingSpot::new(SpotId::new(1), VehicleType::Car, false);
        Ticket::open(spot, reg, Utc::now())
    }

    fn closed_ticket(reg: &str, price: f64) -> Ticket {
        let mut ticket = open_ticket(reg);
        ticket.close(ticket.in_time + Duration::hours(1), price).unwrap();
        ticket
    }

    #[test]
    fn save_then_fetch_round_trips_the_ticket() {
        let store = InMemoryTicketStore::new();
        let ticket = open_ticket(REG);

        let id = store.save(ticket.clone()).unwrap();
        let fetched = store.get_open_ticket(REG).unwrap().unwrap();

        assert_eq!(fetched.id, id);
        assert_eq!(fetched.vehicle_reg_number, ticket.vehicle_reg_number);
        assert_eq!(fetched.spot, ticket.spot);
        assert_eq!(fetched.price, ticket.price);
        assert_eq!(fetched.in_time, ticket.in_time);
        assert!(fetched.out_time.is_none());
    }

    #[test]
    fn open_lookup_skips_closed_tickets_and_other_vehicles() {
        let store = InMemoryTicketStore::new();
        store.save(closed_ticket(REG, 4.25)).unwrap();
        store.save(open_ticket("OTHER")).unwrap();

        assert!(store.get_open_ticket(REG).unwrap().is_none());
    }

    #[test]
    fn open_lookup_returns_most_recently_opened() {
        let store = InMemoryTicketStore::new();
        let first = store.save(open_ticket(REG)).unwrap();
        let second = store.save(open_ticket(REG)).unwrap();

        // Two open tickets per vehicle is a caller bug; the store still
        // answers with the highest id.
        assert!(first < second);
        assert_eq!(store.get_open_ticket(REG).unwrap().unwrap().id, second);
    }

    #[test]
    fn update_persists_out_time_and_price() {
        let store = InMemoryTicketStore::new();
        let id = store.save(open_ticket(REG)).unwrap();

        let mut ticket = store.get_open_ticket(REG).unwrap().unwrap();
        assert_eq!(ticket.id, id);
        ticket.close(ticket.in_time + Duration::hours(1), 1.5).unwrap();
        store.update(&ticket).unwrap();

        assert!(store.get_open_ticket(REG).unwrap().is_none());
        assert_eq!(store.count_completed(REG).unwrap(), 1);
    }

    #[test]
    fn update_of_unknown_ticket_fails() {
        let store = InMemoryTicketStore::new();
        let ticket = closed_ticket(REG, 1.5);

        let err = store.update(&ticket).unwrap_err();
        assert_eq!(err, TicketStoreError::UnknownTicket(ticket.id));
    }

    #[test]
    fn count_completed_counts_only_closed_tickets_for_that_vehicle() {
        let store = InMemoryTicketStore::new();
        store.save(closed_ticket(REG, 4.25)).unwrap();
        store.save(closed_ticket(REG, 1.5)).unwrap();
        store.save(closed_ticket("OTHER", 1.0)).unwrap();
        store.save(open_ticket(REG)).unwrap();

        assert_eq!(store.count_completed(REG).unwrap(), 2);
        assert_eq!(store.count_completed("UNSEEN").unwrap(), 0);
    }
}
