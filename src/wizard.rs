// Host "create tour" wizard: a draft that is filled in step by step, validated on
// the way forward and turned into a create-tour request at the end.

use std::fmt;

use chrono::{NaiveTime, Weekday};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    api::ApiClient,
    error::ApiError,
    models::{CreateTourRequest, Tour},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WizardStep {
    #[default]
    Basics,
    Details,
    Pricing,
    Availability,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Basics,
        WizardStep::Details,
        WizardStep::Pricing,
        WizardStep::Availability,
        WizardStep::Review,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn next(&self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<WizardStep> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Basics => "Basic information",
            WizardStep::Details => "Tour details",
            WizardStep::Pricing => "Pricing & group size",
            WizardStep::Availability => "Availability",
            WizardStep::Review => "Review & publish",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("{step}: {field} is required")]
    MissingField {
        step: WizardStep,
        field: &'static str,
    },

    #[error("{step}: {field} {reason}")]
    InvalidField {
        step: WizardStep,
        field: &'static str,
        reason: String,
    },

    #[error("Step not reached yet: {0}")]
    StepNotReached(WizardStep),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TourDraft {
    // basics
    pub title: String,
    pub description: String,
    pub destination: String,
    pub category: String,
    // details
    pub duration_hours: u32,
    pub languages: Vec<String>,
    pub features: Vec<String>,
    pub meeting_point: String,
    pub itinerary: Vec<String>,
    pub images: Vec<String>,
    // pricing
    pub price: f64,
    pub currency: String,
    pub min_group_size: u32,
    pub max_group_size: u32,
    pub free_cancellation: bool,
    // availability
    pub available_days: Vec<Weekday>,
    pub start_times: Vec<NaiveTime>,
    pub min_advance_booking_days: u32,
    pub max_advance_booking_days: u32,
}

impl Default for TourDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            destination: String::new(),
            category: String::new(),
            duration_hours: 0,
            languages: Vec::new(),
            features: Vec::new(),
            meeting_point: String::new(),
            itinerary: Vec::new(),
            images: Vec::new(),
            price: 0.0,
            currency: "USD".to_string(),
            min_group_size: 1,
            max_group_size: 10,
            free_cancellation: true,
            available_days: Vec::new(),
            start_times: Vec::new(),
            min_advance_booking_days: 1,
            max_advance_booking_days: 180,
        }
    }
}

// Listing duration tag derived from the tour length
pub fn duration_tag(hours: u32) -> &'static str {
    match hours {
        0..=5 => "half-day",
        6..=23 => "full-day",
        _ => "multi-day",
    }
}

fn require(step: WizardStep, field: &'static str, value: &str) -> Result<(), WizardError> {
    if value.trim().is_empty() {
        Err(WizardError::MissingField { step, field })
    } else {
        Ok(())
    }
}

fn invalid(step: WizardStep, field: &'static str, reason: impl Into<String>) -> WizardError {
    WizardError::InvalidField {
        step,
        field,
        reason: reason.into(),
    }
}

impl TourDraft {
    pub fn validate_step(&self, step: WizardStep) -> Result<(), WizardError> {
        match step {
            WizardStep::Basics => {
                require(step, "title", &self.title)?;
                require(step, "description", &self.description)?;
                require(step, "destination", &self.destination)?;
                require(step, "category", &self.category)
            }
            WizardStep::Details => {
                if self.duration_hours == 0 {
                    return Err(invalid(step, "duration", "must be at least one hour"));
                }
                if self.languages.iter().all(|l| l.trim().is_empty()) {
                    return Err(WizardError::MissingField {
                        step,
                        field: "languages",
                    });
                }
                require(step, "meeting point", &self.meeting_point)
            }
            WizardStep::Pricing => {
                if !(self.price.is_finite() && self.price > 0.0) {
                    return Err(invalid(step, "price", "must be greater than zero"));
                }
                require(step, "currency", &self.currency)?;
                if self.min_group_size == 0 {
                    return Err(invalid(step, "minimum group size", "must be at least one"));
                }
                if self.min_group_size > self.max_group_size {
                    return Err(invalid(
                        step,
                        "minimum group size",
                        format!("exceeds the maximum of {}", self.max_group_size),
                    ));
                }
                Ok(())
            }
            WizardStep::Availability => {
                if self.available_days.is_empty() {
                    return Err(WizardError::MissingField {
                        step,
                        field: "available days",
                    });
                }
                if self.min_advance_booking_days > self.max_advance_booking_days {
                    return Err(invalid(
                        step,
                        "minimum advance booking",
                        format!(
                            "exceeds the maximum of {} days",
                            self.max_advance_booking_days
                        ),
                    ));
                }
                Ok(())
            }
            WizardStep::Review => Ok(()),
        }
    }

    pub fn validate(&self) -> Result<(), WizardError> {
        WizardStep::ALL
            .iter()
            .try_for_each(|step| self.validate_step(*step))
    }

    pub fn to_request(&self) -> Result<CreateTourRequest, WizardError> {
        self.validate()?;

        let mut start_times = self.start_times.clone();
        start_times.sort();
        start_times.dedup();

        let mut available_days = self.available_days.clone();
        available_days.sort_by_key(Weekday::num_days_from_monday);
        available_days.dedup();

        Ok(CreateTourRequest {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            destination: self.destination.trim().to_string(),
            category: self.category.clone(),
            duration: duration_tag(self.duration_hours).to_string(),
            duration_hours: self.duration_hours,
            languages: self
                .languages
                .iter()
                .filter(|l| !l.trim().is_empty())
                .cloned()
                .collect(),
            features: self.features.clone(),
            meeting_point: self.meeting_point.trim().to_string(),
            itinerary: self.itinerary.clone(),
            price: self.price,
            currency: self.currency.clone(),
            min_group_size: self.min_group_size,
            max_group_size: self.max_group_size,
            free_cancellation: self.free_cancellation,
            available_days,
            start_times,
            min_advance_booking_days: self.min_advance_booking_days,
            max_advance_booking_days: self.max_advance_booking_days,
            images: self.images.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TourWizard {
    draft: TourDraft,
    step: WizardStep,
    furthest: WizardStep,
}

impl TourWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: TourDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &TourDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TourDraft {
        &mut self.draft
    }

    // 1-based position for the progress indicator
    pub fn progress(&self) -> (usize, usize) {
        (self.step.index() + 1, WizardStep::ALL.len())
    }

    /// Validates the current step and moves forward. Stays put on the last step.
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        self.draft.validate_step(self.step)?;
        if let Some(next) = self.step.next() {
            self.step = next;
            self.furthest = self.furthest.max(next);
            debug!(step = %next, "wizard advanced");
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    // Jumping is limited to steps already reached through `next`
    pub fn go_to(&mut self, step: WizardStep) -> Result<(), WizardError> {
        if step > self.furthest {
            return Err(WizardError::StepNotReached(step));
        }
        self.step = step;
        Ok(())
    }

    pub fn build_request(&self) -> Result<CreateTourRequest, WizardError> {
        self.draft.to_request()
    }

    pub async fn submit(&self, client: &ApiClient) -> Result<Tour, WizardError> {
        let request = self.build_request()?;
        let tour = client.create_tour(&request).await?;
        info!(tour = %tour.id, "tour published");
        Ok(tour)
    }
}
