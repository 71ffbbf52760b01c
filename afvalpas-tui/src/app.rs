use std::collections::VecDeque;
use std::sync::Arc;

use afvalpas_core::{
    model::WastePass,
    ports::ResolveError,
    service::{DistrictOverview, WastePassService},
};
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Lookup,
    Districts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    PostalCode,
    HouseNumber,
}

/// A finished lookup as shown in the history.
#[derive(Debug, Clone)]
pub(crate) struct Lookup {
    pub at: DateTime<Local>,
    pub postal_code: String,
    pub house_number: Option<String>,
    pub outcome: Result<WastePass, ResolveError>,
}

pub(crate) struct App {
    pub service: Arc<WastePassService>,

    pub screen: Screen,
    pub focus: Field,
    pub postal_code_input: String,
    pub house_number_input: String,

    /// Most recent lookup first.
    pub history: VecDeque<Lookup>,
    pub history_limit: usize,

    pub districts: Vec<DistrictOverview>,
    pub district_list_index: usize,
}

impl App {
    pub(crate) fn new(service: Arc<WastePassService>, history_limit: usize) -> Self {
        let districts = service.districts();
        Self {
            service,
            screen: Screen::Lookup,
            focus: Field::PostalCode,
            postal_code_input: String::new(),
            house_number_input: String::new(),
            history: VecDeque::with_capacity(history_limit),
            history_limit,
            districts,
            district_list_index: 0,
        }
    }

    pub(crate) fn focused_input(&mut self) -> &mut String {
        match self.focus {
            Field::PostalCode => &mut self.postal_code_input,
            Field::HouseNumber => &mut self.house_number_input,
        }
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::PostalCode => Field::HouseNumber,
            Field::HouseNumber => Field::PostalCode,
        };
    }

    pub(crate) fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Lookup => Screen::Districts,
            Screen::Districts => Screen::Lookup,
        };
    }

    pub(crate) fn last_lookup(&self) -> Option<&Lookup> {
        self.history.front()
    }

    /// Resolve the current inputs and record the outcome.
    ///
    /// A blank house number counts as not given.
    pub(crate) fn resolve_current(&mut self) {
        let postal_code = self.postal_code_input.trim().to_owned();
        let house_number = Some(self.house_number_input.trim())
            .filter(|number| !number.is_empty())
            .map(str::to_owned);

        let outcome = self
            .service
            .resolve_waste_pass(&postal_code, house_number.as_deref());

        self.history.push_front(Lookup {
            at: Local::now(),
            postal_code,
            house_number,
            outcome,
        });
        self.history.truncate(self.history_limit);
    }
}
