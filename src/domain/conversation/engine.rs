//! Conversation engine: drives one valuation conversation, one line at a time.
//!
//! The engine owns its [`ConversationState`] exclusively. Each call to
//! [`ConversationEngine::process`] interprets a single line of user input
//! according to the current step, and either commits the parsed value and
//! advances, or rejects the input and leaves the state untouched.
//!
//! # Example
//!
//! ```ignore
//! let mut engine = ConversationEngine::new(model, source);
//! println!("{}", engine.welcome_message());
//!
//! let reply = engine.process("85");
//! assert!(reply.is_success());
//! ```

use std::sync::Arc;

use tracing::{debug, error, info};

use super::messages::{self, CITY_PREVIEW_LIMIT, COORDINATES_CHOICE_FIELD, RESTART_CHOICE_FIELD};
use super::reply::BotReply;
use super::state::ConversationState;
use super::step::ConversationStep;
use crate::domain::foundation::{SessionId, StateTransitionError, ValidationError};
use crate::domain::valuation::{
    validator, CategoryResolver, CoordinateSource, Coordinates, DerivedFeatureCalculator,
    PredictionService, ProfileDraft, Valuation,
};
use crate::ports::{ModelQuality, PredictionError, PriceModel, ReferenceSource};

/// Reply sent when the engine itself is inconsistent.
const INTERNAL_ERROR: &str = "Lo siento, algo salió mal. Por favor intenta de nuevo.";

/// One conversation's engine.
pub struct ConversationEngine {
    state: ConversationState,
    cities: CategoryResolver,
    property_types: CategoryResolver,
    calculator: DerivedFeatureCalculator,
    predictor: PredictionService,
    model_quality: Option<ModelQuality>,
}

impl ConversationEngine {
    /// Builds an engine over shared, read-only artifacts.
    pub fn new(model: Arc<dyn PriceModel>, source: Arc<dyn ReferenceSource>) -> Self {
        let state = ConversationState::new();
        info!(
            session_id = %state.session_id(),
            model = %model.describe(),
            dataset_backed = source.is_dataset_backed(),
            "Conversation engine ready"
        );

        Self {
            state,
            cities: CategoryResolver::new("city", source.valid_cities()),
            property_types: CategoryResolver::new("property type", source.property_types()),
            calculator: DerivedFeatureCalculator::new(source.clone()),
            model_quality: model.quality(),
            predictor: PredictionService::new(model, source),
        }
    }

    /// Greeting followed by the first prompt.
    pub fn welcome_message(&self) -> String {
        messages::welcome()
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn step(&self) -> ConversationStep {
        self.state.step()
    }

    pub fn profile(&self) -> &ProfileDraft {
        self.state.profile()
    }

    pub fn session_id(&self) -> SessionId {
        self.state.session_id()
    }

    /// Discards the current profile and starts over with a new session.
    pub fn reset(&mut self) {
        let previous = self.state.session_id();
        self.state = ConversationState::new();
        info!(
            previous_session_id = %previous,
            session_id = %self.state.session_id(),
            "Conversation reset"
        );
    }

    /// Interprets one line of user input.
    pub fn process(&mut self, input: &str) -> BotReply {
        let input = input.trim();
        let step = self.state.step();
        debug!(session_id = %self.state.session_id(), step = %step, "Processing input");

        match step {
            ConversationStep::AwaitingArea => self.on_area(input),
            ConversationStep::AwaitingRooms => self.on_rooms(input),
            ConversationStep::AwaitingBathrooms => self.on_bathrooms(input),
            ConversationStep::AwaitingCity => self.on_city(input),
            ConversationStep::AwaitingCoordinatesChoice => self.on_coordinates_choice(input),
            ConversationStep::AwaitingLatitude => self.on_latitude(input),
            ConversationStep::AwaitingLongitude => self.on_longitude(input),
            ConversationStep::AwaitingPropertyType => self.on_property_type(input),
            ConversationStep::PredictionProduced => self.settle_after_prediction(),
            ConversationStep::AwaitingRestartChoice => self.on_restart_choice(input),
            ConversationStep::Terminal => BotReply::finished(messages::conversation_over()),
        }
    }

    fn on_area(&mut self, input: &str) -> BotReply {
        match validator::parse_area(input) {
            Ok(area) => self.commit(
                ConversationStep::AwaitingRooms,
                |draft| draft.area = Some(area),
                messages::area_accepted(area),
            ),
            Err(e) => self.reject(e),
        }
    }

    fn on_rooms(&mut self, input: &str) -> BotReply {
        match validator::parse_rooms(input) {
            Ok(rooms) => self.commit(
                ConversationStep::AwaitingBathrooms,
                |draft| draft.rooms = Some(rooms),
                messages::rooms_accepted(rooms),
            ),
            Err(e) => self.reject(e),
        }
    }

    fn on_bathrooms(&mut self, input: &str) -> BotReply {
        match validator::parse_bathrooms(input) {
            Ok(bathrooms) => {
                let message = messages::bathrooms_accepted(
                    bathrooms,
                    self.cities.len(),
                    &self.cities.options_preview(CITY_PREVIEW_LIMIT),
                );
                self.commit(
                    ConversationStep::AwaitingCity,
                    |draft| draft.bathrooms = Some(bathrooms),
                    message,
                )
            }
            Err(e) => self.reject(e),
        }
    }

    fn on_city(&mut self, input: &str) -> BotReply {
        let city = match self.cities.resolve(input) {
            Ok(city) => city.to_string(),
            Err(e) => {
                debug!(input, suggestions = e.suggestions.len(), "City not resolved");
                return BotReply::error(messages::city_not_found(&e));
            }
        };
        let department = self.calculator.department_for(&city);
        let message = messages::city_accepted(&city, &department);
        self.commit(
            ConversationStep::AwaitingCoordinatesChoice,
            |draft| {
                draft.city = Some(city);
                draft.department = Some(department);
            },
            message,
        )
    }

    fn on_coordinates_choice(&mut self, input: &str) -> BotReply {
        match validator::parse_yes_no(COORDINATES_CHOICE_FIELD, input) {
            Ok(true) => self.commit(
                ConversationStep::AwaitingLatitude,
                |_| {},
                messages::latitude_prompt(),
            ),
            Ok(false) => {
                let Some(city) = self.state.profile().city.clone() else {
                    return self.internal_error("city missing before coordinates");
                };
                let coordinates = self.calculator.coordinates_for_city(&city);
                let message = messages::coordinates_estimated(
                    &city,
                    coordinates,
                    &self.property_type_options(),
                );
                self.commit(
                    ConversationStep::AwaitingPropertyType,
                    |draft| draft.set_coordinates(coordinates, CoordinateSource::CityAverage),
                    message,
                )
            }
            Err(_) => BotReply::error(messages::yes_no_expected()),
        }
    }

    fn on_latitude(&mut self, input: &str) -> BotReply {
        match validator::parse_latitude(input) {
            Ok(latitude) => self.commit(
                ConversationStep::AwaitingLongitude,
                |draft| draft.latitude = Some(latitude),
                messages::latitude_accepted(latitude),
            ),
            Err(e) => self.reject(e),
        }
    }

    fn on_longitude(&mut self, input: &str) -> BotReply {
        let longitude = match validator::parse_longitude(input) {
            Ok(longitude) => longitude,
            Err(e) => return self.reject(e),
        };
        let Some(latitude) = self.state.profile().latitude else {
            return self.internal_error("latitude missing before longitude");
        };
        let message = messages::longitude_accepted(longitude, &self.property_type_options());
        self.commit(
            ConversationStep::AwaitingPropertyType,
            |draft| {
                draft.set_coordinates(
                    Coordinates::new(latitude, longitude),
                    CoordinateSource::UserSupplied,
                )
            },
            message,
        )
    }

    fn on_property_type(&mut self, input: &str) -> BotReply {
        let property_type = match self.property_types.resolve(input) {
            Ok(kind) => kind.to_string(),
            Err(_) => {
                debug!(input, "Property type not resolved");
                return BotReply::error(messages::property_type_not_found(
                    &self.property_type_options(),
                ));
            }
        };

        if let Err(e) = self.state.advance(ConversationStep::PredictionProduced) {
            return self.transition_failed(e);
        }
        self.state.profile_mut().property_type = Some(property_type);

        let outcome = self.predict();
        if let Err(e) = self.state.advance(ConversationStep::AwaitingRestartChoice) {
            return self.transition_failed(e);
        }

        match outcome {
            Ok(valuation) => BotReply::success(messages::valuation_report(
                &valuation,
                self.model_quality,
            )),
            Err(e) => {
                error!(session_id = %self.state.session_id(), error = %e, "Prediction failed");
                BotReply::error(messages::prediction_failed(&e.to_string()))
            }
        }
    }

    fn predict(&self) -> Result<Valuation, PredictionError> {
        let profile = self.calculator.complete(self.state.profile())?;
        self.predictor.value(profile)
    }

    fn settle_after_prediction(&mut self) -> BotReply {
        match self.state.advance(ConversationStep::AwaitingRestartChoice) {
            Ok(()) => BotReply::error(messages::yes_no_expected()),
            Err(e) => self.transition_failed(e),
        }
    }

    fn on_restart_choice(&mut self, input: &str) -> BotReply {
        match validator::parse_yes_no(RESTART_CHOICE_FIELD, input) {
            Ok(true) => match self.state.advance(ConversationStep::AwaitingArea) {
                Ok(()) => {
                    self.reset();
                    BotReply::success(messages::welcome())
                }
                Err(e) => self.transition_failed(e),
            },
            Ok(false) => match self.state.advance(ConversationStep::Terminal) {
                Ok(()) => {
                    info!(session_id = %self.state.session_id(), "Conversation finished");
                    BotReply::finished(messages::farewell())
                }
                Err(e) => self.transition_failed(e),
            },
            Err(_) => BotReply::error(messages::yes_no_expected()),
        }
    }

    /// Advances to `target`, then applies `update` to the draft.
    ///
    /// The draft is only touched once the transition is known to be legal.
    fn commit(
        &mut self,
        target: ConversationStep,
        update: impl FnOnce(&mut ProfileDraft),
        message: String,
    ) -> BotReply {
        let from = self.state.step();
        if let Err(e) = self.state.advance(target) {
            return self.transition_failed(e);
        }
        update(self.state.profile_mut());
        debug!(
            session_id = %self.state.session_id(),
            from = %from,
            to = %target,
            "Step advanced"
        );
        BotReply::success(message)
    }

    fn reject(&self, error: ValidationError) -> BotReply {
        debug!(
            session_id = %self.state.session_id(),
            field = error.field(),
            error = %error,
            "Input rejected"
        );
        BotReply::error(messages::invalid_answer(&error))
    }

    fn property_type_options(&self) -> String {
        self.property_types.options_preview(self.property_types.len())
    }

    fn transition_failed(&self, error: StateTransitionError) -> BotReply {
        self.internal_error(&error.to_string())
    }

    fn internal_error(&self, reason: &str) -> BotReply {
        error!(
            session_id = %self.state.session_id(),
            step = %self.state.step(),
            reason,
            "Conversation engine inconsistency"
        );
        BotReply::error(INTERNAL_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::model::mock::{FailingPriceModel, FixedPriceModel};
    use crate::adapters::reference::DefaultReferenceSource;
    use crate::domain::conversation::ReplyKind;

    fn engine_with(model: Arc<dyn PriceModel>) -> ConversationEngine {
        ConversationEngine::new(model, Arc::new(DefaultReferenceSource::new()))
    }

    fn engine() -> ConversationEngine {
        engine_with(Arc::new(FixedPriceModel::new(
            vec!["area".to_string(), "habitaciones".to_string()],
            255_000_000.0,
        )))
    }

    fn feed(engine: &mut ConversationEngine, inputs: &[&str]) -> Vec<BotReply> {
        inputs.iter().map(|input| engine.process(input)).collect()
    }

    mod collecting {
        use super::*;

        #[test]
        fn starts_awaiting_area() {
            let engine = engine();
            assert_eq!(engine.step(), ConversationStep::AwaitingArea);
            assert!(engine.welcome_message().contains("área total"));
        }

        #[test]
        fn accepted_area_advances_and_commits() {
            let mut engine = engine();
            let reply = engine.process("85");
            assert!(reply.is_success());
            assert_eq!(engine.step(), ConversationStep::AwaitingRooms);
            assert_eq!(engine.profile().area, Some(85.0));
        }

        #[test]
        fn rejected_area_stays_without_mutation() {
            let mut engine = engine();
            let reply = engine.process("5");
            assert_eq!(reply.kind, ReplyKind::Error);
            assert!(reply.message.contains("entre 10 y 2000"));
            assert_eq!(engine.step(), ConversationStep::AwaitingArea);
            assert!(engine.profile().is_empty());
        }

        #[test]
        fn city_by_index_records_department() {
            let mut engine = engine();
            feed(&mut engine, &["85", "3", "2"]);
            let reply = engine.process("2");
            assert!(reply.is_success());
            assert_eq!(engine.profile().city.as_deref(), Some("Medellín"));
            assert_eq!(engine.profile().department.as_deref(), Some("Antioquia"));
        }

        #[test]
        fn unknown_city_stays_on_city() {
            let mut engine = engine();
            feed(&mut engine, &["85", "3", "2"]);
            let reply = engine.process("Zzzxyz");
            assert!(reply.is_error());
            assert_eq!(engine.step(), ConversationStep::AwaitingCity);
        }
    }

    mod coordinates {
        use super::*;

        #[test]
        fn declining_estimates_and_skips_to_property_type() {
            let mut engine = engine();
            feed(&mut engine, &["85", "3", "2", "Cali"]);
            let reply = engine.process("no");
            assert!(reply.is_success());
            assert_eq!(engine.step(), ConversationStep::AwaitingPropertyType);
            assert_eq!(engine.profile().coordinates(), Some(Coordinates::NATIONAL_CENTROID));
            assert_eq!(
                engine.profile().coordinate_source,
                Some(CoordinateSource::CityAverage)
            );
        }

        #[test]
        fn accepting_asks_latitude_then_longitude() {
            let mut engine = engine();
            feed(&mut engine, &["85", "3", "2", "Cali", "sí"]);
            assert_eq!(engine.step(), ConversationStep::AwaitingLatitude);
            assert!(engine.step().awaiting_coordinates());

            assert!(engine.process("3.45").is_success());
            assert!(engine.process("-76.53").is_success());
            assert_eq!(engine.step(), ConversationStep::AwaitingPropertyType);
            assert_eq!(engine.profile().coordinates(), Some(Coordinates::new(3.45, -76.53)));
            assert_eq!(
                engine.profile().coordinate_source,
                Some(CoordinateSource::UserSupplied)
            );
        }

        #[test]
        fn garbage_choice_is_rejected() {
            let mut engine = engine();
            feed(&mut engine, &["85", "3", "2", "Cali"]);
            assert!(engine.process("quizás").is_error());
            assert_eq!(engine.step(), ConversationStep::AwaitingCoordinatesChoice);
        }
    }

    mod prediction {
        use super::*;

        #[test]
        fn property_type_produces_report_and_awaits_restart() {
            let mut engine = engine();
            let replies = feed(&mut engine, &["85", "3", "2", "2", "no", "Apartamento"]);
            let report = replies.last().unwrap();
            assert!(report.is_success());
            assert!(report.message.contains("$255,000,000 COP"));
            assert_eq!(engine.step(), ConversationStep::AwaitingRestartChoice);
        }

        #[test]
        fn failed_prediction_still_advances() {
            let mut engine = engine_with(Arc::new(FailingPriceModel::new("corrupt trees")));
            let replies = feed(&mut engine, &["85", "3", "2", "2", "no", "1"]);
            let reply = replies.last().unwrap();
            assert!(reply.is_error());
            assert!(reply.message.contains("corrupt trees"));
            assert_eq!(engine.step(), ConversationStep::AwaitingRestartChoice);
        }

        #[test]
        fn unknown_property_type_lists_options() {
            let mut engine = engine();
            feed(&mut engine, &["85", "3", "2", "2", "no"]);
            let reply = engine.process("Castillo");
            assert!(reply.is_error());
            assert!(reply.message.contains("   4. Finca"));
            assert_eq!(engine.step(), ConversationStep::AwaitingPropertyType);
        }
    }

    mod restart {
        use super::*;

        fn finished_engine() -> ConversationEngine {
            let mut engine = engine();
            feed(&mut engine, &["85", "3", "2", "2", "no", "Casa"]);
            engine
        }

        #[test]
        fn yes_resets_everything() {
            let mut engine = finished_engine();
            let old_session = engine.session_id();
            let reply = engine.process("si");
            assert!(reply.is_success());
            assert_eq!(reply.message, messages::welcome());
            assert_eq!(engine.step(), ConversationStep::AwaitingArea);
            assert!(engine.profile().is_empty());
            assert_ne!(engine.session_id(), old_session);
        }

        #[test]
        fn no_ends_the_conversation() {
            let mut engine = finished_engine();
            assert!(engine.process("no").is_final());
            assert_eq!(engine.step(), ConversationStep::Terminal);

            let after = engine.process("85");
            assert!(after.is_final());
            assert_eq!(engine.step(), ConversationStep::Terminal);
        }

        #[test]
        fn garbage_keeps_waiting() {
            let mut engine = finished_engine();
            assert!(engine.process("tal vez").is_error());
            assert_eq!(engine.step(), ConversationStep::AwaitingRestartChoice);
        }

        #[test]
        fn reset_is_available_mid_conversation() {
            let mut engine = engine();
            feed(&mut engine, &["85", "3"]);
            engine.reset();
            assert_eq!(engine.step(), ConversationStep::AwaitingArea);
            assert!(engine.profile().is_empty());
        }
    }
}
