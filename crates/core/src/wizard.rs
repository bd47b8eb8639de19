//! Onboarding wizard step machine and gating rules.
//!
//! The wizard is a strictly linear sequence of five data-collection steps.
//! Advancing requires the current step's required fields to be present;
//! going back is always permitted and clamps at the first step. Submission
//! is only possible at the terminal step, and leaving the preferences step
//! is the trigger for recommendation generation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Session status
// ---------------------------------------------------------------------------

/// Status values for a wizard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
    Abandoned,
}

impl SessionStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(CoreError::Validation(format!(
                "Invalid session status '{s}'. Must be one of: in_progress, completed, abandoned"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

// ---------------------------------------------------------------------------
// Wizard steps
// ---------------------------------------------------------------------------

/// The five steps of the onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Who is celebrating (child's name).
    Celebrant,
    /// Date, headcount, and activity preferences.
    EventDetails,
    /// Age range of the celebrant; recommendations are shown here.
    AgeRange,
    /// Where the party will be, plus a contact phone.
    Location,
    /// Customer name and email; terminal step.
    Contact,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 5;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 5;

/// The step whose departure triggers recommendation generation.
pub const PREFERENCES_STEP: u8 = 2;

impl WizardStep {
    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Celebrant),
            2 => Ok(Self::EventDetails),
            3 => Ok(Self::AgeRange),
            4 => Ok(Self::Location),
            5 => Ok(Self::Contact),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Celebrant => 1,
            Self::EventDetails => 2,
            Self::AgeRange => 3,
            Self::Location => 4,
            Self::Contact => 5,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.to_number() == MAX_STEP
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::Celebrant => "Festejado",
            Self::EventDetails => "Detalles del Evento",
            Self::AgeRange => "Edad",
            Self::Location => "Ubicación",
            Self::Contact => "Contacto",
        }
    }
}

// ---------------------------------------------------------------------------
// OnboardingData
// ---------------------------------------------------------------------------

/// Wizard answers accumulated across steps.
///
/// Fields fill in incrementally; the struct is only fully formed once the
/// terminal step's required fields hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingData {
    #[serde(default)]
    pub child_name: String,
    /// ISO date string, e.g. `"2026-09-12"`.
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub children_count: Option<i32>,
    #[serde(default)]
    pub age_range: String,
    /// Selected preference tag ids, e.g. `"creative"`, `"spa"`.
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub comments: String,
}

// ---------------------------------------------------------------------------
// Step gating
// ---------------------------------------------------------------------------

/// Validate that the required fields for a step are present.
pub fn validate_step_data(step: WizardStep, data: &OnboardingData) -> Result<(), CoreError> {
    match step {
        WizardStep::Celebrant => {
            if data.child_name.trim().is_empty() {
                return Err(CoreError::Validation(
                    "El nombre del festejado es requerido".to_string(),
                ));
            }
        }
        WizardStep::EventDetails => {
            if data.event_date.trim().is_empty() {
                return Err(CoreError::Validation(
                    "La fecha del evento es requerida".to_string(),
                ));
            }
            if data.children_count.unwrap_or(0) <= 0 {
                return Err(CoreError::Validation(
                    "El número de niños es requerido".to_string(),
                ));
            }
            if data.preferences.is_empty() {
                return Err(CoreError::Validation(
                    "Selecciona al menos una preferencia".to_string(),
                ));
            }
        }
        WizardStep::AgeRange => {
            if data.age_range.trim().is_empty() {
                return Err(CoreError::Validation(
                    "El rango de edad es requerido".to_string(),
                ));
            }
        }
        WizardStep::Location => {
            if data.location.trim().is_empty() {
                return Err(CoreError::Validation(
                    "La zona del evento es requerida".to_string(),
                ));
            }
            if data.phone.trim().is_empty() {
                return Err(CoreError::Validation(
                    "El teléfono de contacto es requerido".to_string(),
                ));
            }
        }
        WizardStep::Contact => {
            if data.customer_name.trim().is_empty() {
                return Err(CoreError::Validation(
                    "Tu nombre es requerido".to_string(),
                ));
            }
            if data.email.trim().is_empty() || !data.email.contains('@') {
                return Err(CoreError::Validation(
                    "Un correo electrónico válido es requerido".to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Whether the current step can be advanced from.
pub fn can_advance_step(step: WizardStep, data: &OnboardingData) -> bool {
    validate_step_data(step, data).is_ok()
}

/// Validate a step transition.
///
/// A transition is valid only one step forward or backward; jumping is
/// never allowed.
pub fn validate_step_transition(current: u8, next: u8) -> Result<(), CoreError> {
    if !(MIN_STEP..=MAX_STEP).contains(&current) {
        return Err(CoreError::Validation(format!(
            "Current step {current} is out of range ({MIN_STEP}..{MAX_STEP})"
        )));
    }
    if !(MIN_STEP..=MAX_STEP).contains(&next) {
        return Err(CoreError::Validation(format!(
            "Next step {next} is out of range ({MIN_STEP}..{MAX_STEP})"
        )));
    }
    let diff = i16::from(next) - i16::from(current);
    if diff != 1 && diff != -1 {
        return Err(CoreError::Validation(format!(
            "Cannot transition from step {current} to step {next}. \
             Must advance or go back exactly one step."
        )));
    }
    Ok(())
}

/// Check if a session can be submitted (terminal step, required fields held).
pub fn can_submit(step: WizardStep, data: &OnboardingData) -> Result<(), CoreError> {
    if !step.is_terminal() {
        return Err(CoreError::Validation(format!(
            "Cannot submit: must be on step {MAX_STEP} ({}), currently on step {}",
            WizardStep::Contact.label(),
            step.to_number()
        )));
    }
    validate_step_data(step, data)
}

/// Check if a session can be abandoned (must be in progress).
pub fn can_abandon(status: &str) -> Result<(), CoreError> {
    if status != SessionStatus::InProgress.as_str() {
        return Err(CoreError::Validation(format!(
            "Cannot abandon session with status '{status}'. Only 'in_progress' sessions can be abandoned."
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

/// Result of a `next` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The step did not change (required fields missing, or terminal step).
    Stayed,
    /// The step moved forward. `recommendations_due` is set when the
    /// preferences step was just left.
    Advanced { recommendations_due: bool },
}

/// In-memory wizard state: a step index plus accumulated answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wizard {
    step: WizardStep,
    pub data: OnboardingData,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// Start at the first step with empty answers.
    pub fn new() -> Self {
        Self {
            step: WizardStep::Celebrant,
            data: OnboardingData::default(),
        }
    }

    /// Rebuild a wizard from persisted state.
    pub fn from_parts(step: WizardStep, data: OnboardingData) -> Self {
        Self { step, data }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Advance one step if the current step's required fields hold.
    ///
    /// At the terminal step this is a no-op: submission, not advancement,
    /// is the only terminal action.
    pub fn next(&mut self) -> Advance {
        let current = self.step.to_number();
        if current >= MAX_STEP || !can_advance_step(self.step, &self.data) {
            return Advance::Stayed;
        }
        self.step = WizardStep::from_number(current + 1)
            .unwrap_or(self.step);
        Advance::Advanced {
            recommendations_due: current == PREFERENCES_STEP,
        }
    }

    /// Go back one step, clamped at the first step. Always permitted.
    pub fn previous(&mut self) {
        let current = self.step.to_number();
        if current > MIN_STEP {
            self.step = WizardStep::from_number(current - 1).unwrap_or(self.step);
        }
    }

    /// Whether the wizard may submit from its current state.
    pub fn ready_to_submit(&self) -> bool {
        can_submit(self.step, &self.data).is_ok()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_data() -> OnboardingData {
        OnboardingData {
            child_name: "María".into(),
            event_date: "2026-09-12".into(),
            children_count: Some(15),
            age_range: "5-7".into(),
            preferences: vec!["creative".into()],
            location: "Polanco".into(),
            customer_name: "Ana López".into(),
            email: "ana@example.com".into(),
            phone: "55 1234 5678".into(),
            comments: String::new(),
        }
    }

    // -- SessionStatus --

    #[test]
    fn status_roundtrip() {
        for status in [
            SessionStatus::InProgress,
            SessionStatus::Completed,
            SessionStatus::Abandoned,
        ] {
            assert_eq!(SessionStatus::from_str_db(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn status_invalid() {
        assert!(SessionStatus::from_str_db("paused").is_err());
        assert!(SessionStatus::from_str_db("").is_err());
    }

    // -- WizardStep --

    #[test]
    fn step_number_roundtrip() {
        for n in MIN_STEP..=MAX_STEP {
            assert_eq!(WizardStep::from_number(n).unwrap().to_number(), n);
        }
    }

    #[test]
    fn step_number_out_of_range() {
        assert!(WizardStep::from_number(0).is_err());
        assert!(WizardStep::from_number(6).is_err());
    }

    #[test]
    fn only_last_step_is_terminal() {
        for n in MIN_STEP..MAX_STEP {
            assert!(!WizardStep::from_number(n).unwrap().is_terminal());
        }
        assert!(WizardStep::Contact.is_terminal());
    }

    // -- Step gating --

    #[test]
    fn step1_requires_child_name() {
        let mut data = OnboardingData::default();
        assert!(validate_step_data(WizardStep::Celebrant, &data).is_err());
        data.child_name = "Juan".into();
        assert!(validate_step_data(WizardStep::Celebrant, &data).is_ok());
    }

    #[test]
    fn step2_requires_date_count_and_preferences() {
        let mut data = filled_data();
        data.preferences.clear();
        assert!(validate_step_data(WizardStep::EventDetails, &data).is_err());
        data.preferences.push("spa".into());
        data.children_count = None;
        assert!(validate_step_data(WizardStep::EventDetails, &data).is_err());
        data.children_count = Some(10);
        data.event_date.clear();
        assert!(validate_step_data(WizardStep::EventDetails, &data).is_err());
        data.event_date = "2026-09-12".into();
        assert!(validate_step_data(WizardStep::EventDetails, &data).is_ok());
    }

    #[test]
    fn contact_step_requires_plausible_email() {
        let mut data = filled_data();
        data.email = "not-an-email".into();
        assert!(validate_step_data(WizardStep::Contact, &data).is_err());
        data.email = "ana@example.com".into();
        assert!(validate_step_data(WizardStep::Contact, &data).is_ok());
    }

    // -- Transitions --

    #[test]
    fn transition_by_one_is_valid() {
        for current in MIN_STEP..MAX_STEP {
            assert!(validate_step_transition(current, current + 1).is_ok());
            assert!(validate_step_transition(current + 1, current).is_ok());
        }
    }

    #[test]
    fn transition_skip_is_invalid() {
        assert!(validate_step_transition(1, 3).is_err());
        assert!(validate_step_transition(5, 3).is_err());
        assert!(validate_step_transition(2, 2).is_err());
    }

    #[test]
    fn transition_out_of_range() {
        assert!(validate_step_transition(0, 1).is_err());
        assert!(validate_step_transition(5, 6).is_err());
    }

    // -- Wizard --

    #[test]
    fn next_blocked_until_required_fields_set() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.next(), Advance::Stayed);
        assert_eq!(wizard.step().to_number(), 1);

        wizard.data.child_name = "María".into();
        assert_eq!(
            wizard.next(),
            Advance::Advanced {
                recommendations_due: false
            }
        );
        assert_eq!(wizard.step().to_number(), 2);
    }

    #[test]
    fn leaving_preferences_step_flags_recommendations() {
        let mut wizard = Wizard::new();
        wizard.data = filled_data();
        assert_eq!(
            wizard.next(),
            Advance::Advanced {
                recommendations_due: false
            }
        );
        assert_eq!(
            wizard.next(),
            Advance::Advanced {
                recommendations_due: true
            }
        );
        assert_eq!(wizard.step(), WizardStep::AgeRange);
    }

    #[test]
    fn previous_clamps_at_first_step() {
        let mut wizard = Wizard::new();
        wizard.previous();
        assert_eq!(wizard.step().to_number(), 1);
    }

    #[test]
    fn next_at_terminal_step_is_noop() {
        let mut wizard = Wizard::new();
        wizard.data = filled_data();
        for _ in 0..10 {
            wizard.next();
        }
        assert_eq!(wizard.step().to_number(), MAX_STEP);
        assert_eq!(wizard.next(), Advance::Stayed);
        assert!(wizard.ready_to_submit());
    }

    #[test]
    fn submit_requires_terminal_step() {
        let data = filled_data();
        assert!(can_submit(WizardStep::Location, &data).is_err());
        assert!(can_submit(WizardStep::Contact, &data).is_ok());
    }

    #[test]
    fn submit_requires_contact_fields() {
        let mut data = filled_data();
        data.customer_name.clear();
        assert!(can_submit(WizardStep::Contact, &data).is_err());
    }

    #[test]
    fn abandon_only_in_progress() {
        assert!(can_abandon("in_progress").is_ok());
        assert!(can_abandon("completed").is_err());
        assert!(can_abandon("abandoned").is_err());
    }
}
