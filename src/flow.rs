//! Place selection flow controller.
//!
//! Drives the user through three ordered selection steps — country, city,
//! district — and hands the accumulated selection off when the flow
//! completes. The controller knows nothing about rendering: it only names
//! the step currently presented and consumes the outcome the view layer
//! reports back.
//!
//! # Navigation
//! Each forward transition pushes the step it leaves onto an explicit
//! history stack, so the user can go back and revise a prior choice. The
//! initial step is never on the stack (nothing precedes it), and
//! completion clears the stack: there is no path back into a finished
//! flow.

use tracing::{debug, warn};

use crate::model::{City, Country, District};

/// The selection step currently presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Choosing a country
    Country,
    /// Choosing a city within the selected country
    City {
        /// Country the city list is scoped to
        country_id: u32,
    },
    /// Choosing a district within the selected city
    District {
        /// City the district list is scoped to
        city_id: u32,
    },
}

/// Outcome reported by the view layer for the current step.
///
/// The view presenting a step is trusted to only offer valid choices;
/// the controller performs no validation of the ids it receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The user chose a country
    CountrySelected(Country),
    /// The user chose a city
    CitySelected(City),
    /// The user chose a district
    DistrictSelected(District),
    /// The selected city has no districts to offer
    NoDistricts,
}

/// The final handoff payload, passed atomically to the downstream screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceSelection {
    /// Selected country id
    pub country_id: u32,
    /// Selected city id
    pub city_id: u32,
    /// Selected district id, absent when the city has none
    pub district_id: Option<u32>,
}

/// Result of feeding an outcome to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The flow moved forward; present the contained step next.
    Advanced(Step),
    /// The flow finished; hand the selection to the downstream screen
    /// and discard the controller.
    Completed(PlaceSelection),
    /// The outcome did not match the awaited step and was dropped.
    Ignored,
}

/// Controller for one run of the place selection flow.
///
/// The flow starts at [`Step::Country`] and is spent once it completes;
/// a new run needs a new controller.
///
/// # Example
///
/// ```ignore
/// let mut flow = PlaceSelectionFlow::new();
/// flow.advance(StepOutcome::CountrySelected(country));
/// flow.advance(StepOutcome::CitySelected(city));
/// match flow.advance(StepOutcome::NoDistricts) {
///     Transition::Completed(selection) => launch_prayer_times(selection),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug)]
pub struct PlaceSelectionFlow {
    country_id: u32,
    city_id: u32,
    district_id: Option<u32>,
    /// `None` once the flow has completed.
    current: Option<Step>,
    history: Vec<Step>,
}

impl PlaceSelectionFlow {
    /// Start a new flow at the country step.
    pub fn new() -> Self {
        Self {
            country_id: 0,
            city_id: 0,
            district_id: None,
            current: Some(Step::Country),
            history: Vec::new(),
        }
    }

    /// The step currently awaiting user input, or `None` once completed.
    pub fn current_step(&self) -> Option<Step> {
        self.current
    }

    /// Whether the flow has reached its terminal state.
    pub fn is_complete(&self) -> bool {
        self.current.is_none()
    }

    /// Whether there is a prior step to go back to.
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Feed the outcome of the current step to the controller.
    ///
    /// Records the chosen id, then either presents the next step or
    /// completes the flow. An outcome that does not match the awaited
    /// step is logged and ignored; the controller has no error states.
    pub fn advance(&mut self, outcome: StepOutcome) -> Transition {
        let Some(current) = self.current else {
            warn!(?outcome, "Outcome received after flow completion, ignoring");
            return Transition::Ignored;
        };

        match (current, outcome) {
            (Step::Country, StepOutcome::CountrySelected(country)) => {
                self.country_id = country.id;
                self.forward(Step::City {
                    country_id: country.id,
                })
            }
            (Step::City { .. }, StepOutcome::CitySelected(city)) => {
                self.city_id = city.id;
                self.forward(Step::District { city_id: city.id })
            }
            (Step::District { .. }, StepOutcome::DistrictSelected(district)) => {
                self.district_id = Some(district.id);
                self.complete()
            }
            (Step::District { .. }, StepOutcome::NoDistricts) => self.complete(),
            (step, outcome) => {
                warn!(?step, ?outcome, "Outcome does not match the awaited step, ignoring");
                Transition::Ignored
            }
        }
    }

    /// Go back to the previous step, if any.
    ///
    /// Pops the history stack and re-presents the popped step. Every
    /// selection recorded at or after that step is reset, since the user
    /// is about to redo it. Returns `None` when there is nothing to go
    /// back to, including after completion.
    pub fn back(&mut self) -> Option<Step> {
        let step = self.history.pop()?;

        match step {
            Step::Country => {
                self.country_id = 0;
                self.city_id = 0;
                self.district_id = None;
            }
            Step::City { .. } => {
                self.city_id = 0;
                self.district_id = None;
            }
            Step::District { .. } => {
                self.district_id = None;
            }
        }

        self.current = Some(step);
        self.current
    }

    /// Move to the next step, pushing the one we leave onto the history.
    fn forward(&mut self, next: Step) -> Transition {
        if let Some(current) = self.current {
            self.history.push(current);
        }
        self.current = Some(next);
        Transition::Advanced(next)
    }

    /// Finish the flow and produce the handoff payload.
    ///
    /// Clears the history so the selection screens are unreachable by
    /// back navigation once the downstream screen takes over.
    fn complete(&mut self) -> Transition {
        let selection = PlaceSelection {
            country_id: self.country_id,
            city_id: self.city_id,
            district_id: self.district_id,
        };

        debug!(
            "Place selected for country '{}', city '{}' and district '{:?}'!",
            selection.country_id, selection.city_id, selection.district_id
        );

        self.history.clear();
        self.current = None;
        Transition::Completed(selection)
    }
}

impl Default for PlaceSelectionFlow {
    fn default() -> Self {
        Self::new()
    }
}
