//! Event trace for negotiation replay and reporting.
//!
//! Every significant step of a negotiation is captured as a typed `Event`:
//! round boundaries, offers with their effective prices, responses, the
//! terminal acceptance or impasse, and the (rare) fallback/failure paths.
//! External layers consume the trace two ways:
//! - as typed events (query helpers below), or
//! - as the ordered textual transcript (`TraceLog::transcript`).
//!
//! Events are logged in the order they occur within a round, so a trace
//! replays the negotiation deterministically.

use crate::agents::{Response, Role};
use crate::models::offer::Offer;

/// One negotiation event. All variants carry the round they occurred in.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A new round opened
    RoundStarted { round: usize },

    /// An agent put an offer on the table
    OfferMade {
        round: usize,
        role: Role,
        offer: Offer,
        effective_price: f64,
    },

    /// An agent answered the counterpart's offer
    ResponseGiven {
        round: usize,
        role: Role,
        response: Response,
    },

    /// An agent's computed offer failed its own validity check and the
    /// deterministic safe fallback was substituted
    FallbackSubstituted { round: usize, role: Role },

    /// Not even the fallback offer was valid; the round is abandoned and the
    /// protocol terminates without a terminal offer
    RoundFailed { round: usize, role: Role },

    /// An offer was accepted; `by` is the accepting side, the offer belongs
    /// to the counterpart
    OfferAccepted {
        round: usize,
        by: Role,
        offer: Offer,
        effective_price: f64,
        total_value: f64,
    },

    /// The round cap was exhausted without acceptance
    Impasse { round: usize },
}

impl Event {
    /// Round this event occurred in
    pub fn round(&self) -> usize {
        match self {
            Event::RoundStarted { round }
            | Event::OfferMade { round, .. }
            | Event::ResponseGiven { round, .. }
            | Event::FallbackSubstituted { round, .. }
            | Event::RoundFailed { round, .. }
            | Event::OfferAccepted { round, .. }
            | Event::Impasse { round } => *round,
        }
    }

    /// Short tag for the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::RoundStarted { .. } => "RoundStarted",
            Event::OfferMade { .. } => "OfferMade",
            Event::ResponseGiven { .. } => "ResponseGiven",
            Event::FallbackSubstituted { .. } => "FallbackSubstituted",
            Event::RoundFailed { .. } => "RoundFailed",
            Event::OfferAccepted { .. } => "OfferAccepted",
            Event::Impasse { .. } => "Impasse",
        }
    }

    /// Role this event belongs to, if any
    pub fn role(&self) -> Option<Role> {
        match self {
            Event::OfferMade { role, .. }
            | Event::ResponseGiven { role, .. }
            | Event::FallbackSubstituted { role, .. }
            | Event::RoundFailed { role, .. } => Some(*role),
            Event::OfferAccepted { by, .. } => Some(*by),
            _ => None,
        }
    }

    /// Render this event as one transcript line
    pub fn describe(&self) -> String {
        match self {
            Event::RoundStarted { round } => format!("--- Round {} ---", round),
            Event::OfferMade {
                role,
                offer,
                effective_price,
                ..
            } => format!(
                "{} offer: price={:.2} (effective {:.2}), quantity={}, delivery={} days, payment={}, quality={}, warranty={}mo, penalty={:.1}%, discount={:.1}%",
                capitalize(role.as_str()),
                offer.price,
                effective_price,
                offer.quantity,
                offer.delivery_days,
                offer.payment_method.as_str(),
                offer.quality_grade.as_str(),
                offer.warranty_months,
                offer.penalty_rate,
                offer.discount_rate,
            ),
            Event::ResponseGiven { role, response, .. } => format!(
                "{} response: {}",
                capitalize(role.as_str()),
                response.as_str()
            ),
            Event::FallbackSubstituted { role, .. } => format!(
                "{} offer failed validation, safe fallback substituted",
                capitalize(role.as_str())
            ),
            Event::RoundFailed { round, role } => format!(
                "Round {} failed: {} could not produce a valid offer",
                round,
                role.as_str()
            ),
            Event::OfferAccepted {
                by,
                offer,
                total_value,
                ..
            } => format!(
                "{} accepted the {}'s offer at {:.2} (total value {:.2})",
                capitalize(by.as_str()),
                match by {
                    Role::Seller => Role::Buyer,
                    Role::Buyer => Role::Seller,
                }
                .as_str(),
                offer.price,
                total_value,
            ),
            Event::Impasse { .. } => {
                "Round cap reached without agreement; negotiation ends in impasse".to_string()
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Ordered log of negotiation events.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    events: Vec<Event>,
}

impl TraceLog {
    /// Create a new empty trace
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the trace is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events logged during a specific round
    pub fn events_at_round(&self, round: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.round() == round).collect()
    }

    /// Events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Render the full textual transcript, one line per event
    pub fn transcript(&self) -> Vec<String> {
        self.events.iter().map(Event::describe).collect()
    }
}
