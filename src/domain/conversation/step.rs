//! Conversation step machine.
//!
//! Defines the steps of a valuation conversation and the legal moves
//! between them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// The step a conversation is waiting on.
///
/// Steps advance in a fixed order:
/// - `AwaitingArea` → `AwaitingRooms` → `AwaitingBathrooms` → `AwaitingCity`
/// - `AwaitingCoordinatesChoice` branches: "yes" goes through
///   `AwaitingLatitude` and `AwaitingLongitude`, "no" jumps straight to
///   `AwaitingPropertyType`
/// - `PredictionProduced` is entered and left within a single input
/// - `AwaitingRestartChoice` loops back to `AwaitingArea` or ends in `Terminal`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStep {
    #[default]
    AwaitingArea,
    AwaitingRooms,
    AwaitingBathrooms,
    AwaitingCity,
    AwaitingCoordinatesChoice,
    AwaitingLatitude,
    AwaitingLongitude,
    AwaitingPropertyType,
    /// The model has been invoked for the collected profile.
    PredictionProduced,
    AwaitingRestartChoice,
    /// Conversation over; input is no longer processed.
    Terminal,
}

impl ConversationStep {
    /// Returns true while the user is typing coordinates by hand.
    pub fn awaiting_coordinates(&self) -> bool {
        matches!(self, Self::AwaitingLatitude | Self::AwaitingLongitude)
    }

    /// Returns true if a line of user input is interpreted in this step.
    pub fn accepts_input(&self) -> bool {
        !matches!(self, Self::PredictionProduced | Self::Terminal)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }

    fn name(&self) -> &'static str {
        match self {
            Self::AwaitingArea => "awaiting_area",
            Self::AwaitingRooms => "awaiting_rooms",
            Self::AwaitingBathrooms => "awaiting_bathrooms",
            Self::AwaitingCity => "awaiting_city",
            Self::AwaitingCoordinatesChoice => "awaiting_coordinates_choice",
            Self::AwaitingLatitude => "awaiting_latitude",
            Self::AwaitingLongitude => "awaiting_longitude",
            Self::AwaitingPropertyType => "awaiting_property_type",
            Self::PredictionProduced => "prediction_produced",
            Self::AwaitingRestartChoice => "awaiting_restart_choice",
            Self::Terminal => "terminal",
        }
    }
}

impl fmt::Display for ConversationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl StateMachine for ConversationStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationStep::*;
        matches!(
            (self, target),
            (AwaitingArea, AwaitingRooms)
                | (AwaitingRooms, AwaitingBathrooms)
                | (AwaitingBathrooms, AwaitingCity)
                | (AwaitingCity, AwaitingCoordinatesChoice)
                // Coordinates known
                | (AwaitingCoordinatesChoice, AwaitingLatitude)
                // Coordinates estimated from the city
                | (AwaitingCoordinatesChoice, AwaitingPropertyType)
                | (AwaitingLatitude, AwaitingLongitude)
                | (AwaitingLongitude, AwaitingPropertyType)
                | (AwaitingPropertyType, PredictionProduced)
                | (PredictionProduced, AwaitingRestartChoice)
                | (AwaitingRestartChoice, AwaitingArea)
                | (AwaitingRestartChoice, Terminal)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationStep::*;
        match self {
            AwaitingArea => vec![AwaitingRooms],
            AwaitingRooms => vec![AwaitingBathrooms],
            AwaitingBathrooms => vec![AwaitingCity],
            AwaitingCity => vec![AwaitingCoordinatesChoice],
            AwaitingCoordinatesChoice => vec![AwaitingLatitude, AwaitingPropertyType],
            AwaitingLatitude => vec![AwaitingLongitude],
            AwaitingLongitude => vec![AwaitingPropertyType],
            AwaitingPropertyType => vec![PredictionProduced],
            PredictionProduced => vec![AwaitingRestartChoice],
            AwaitingRestartChoice => vec![AwaitingArea, Terminal],
            Terminal => vec![],
        }
    }
}
