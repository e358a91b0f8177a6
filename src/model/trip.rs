/// Default fuel economy shown in a fresh form, in miles per gallon.
pub const DEFAULT_MPG: &str = "10";
/// Default tank capacity shown in a fresh form, in gallons.
pub const DEFAULT_TANK_SIZE: &str = "50";

/// Names one of the editable trip fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TripField {
    #[default]
    Start,
    End,
    Mpg,
    TankSize,
}

impl TripField {
    /// All fields in form order.
    pub const ALL: [TripField; 4] = [Self::Start, Self::End, Self::Mpg, Self::TankSize];

    /// Human-readable label for the form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Starting Location",
            Self::End => "Destination",
            Self::Mpg => "MPG (Miles Per Gallon)",
            Self::TankSize => "Tank Size (Gallons)",
        }
    }

    /// Hint shown while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Start => "longitude, latitude (e.g. 77.5946, 12.9716)",
            Self::End => "longitude, latitude (e.g. 72.8777, 19.076)",
            Self::Mpg => "15",
            Self::TankSize => "50",
        }
    }

    /// Position of this field in [`TripField::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::End => 1,
            Self::Mpg => 2,
            Self::TankSize => 3,
        }
    }

    /// The following field, wrapping from the last back to the first.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The preceding field, wrapping from the first to the last.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The trip as typed into the form.
///
/// Every field is kept as raw text. Numeric fields may hold anything the
/// user typed; interpretation happens when a request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripInput {
    pub start: String,
    pub end: String,
    pub mpg: String,
    pub tank_size: String,
}

impl Default for TripInput {
    fn default() -> Self {
        Self {
            start: String::new(),
            end: String::new(),
            mpg: DEFAULT_MPG.to_string(),
            tank_size: DEFAULT_TANK_SIZE.to_string(),
        }
    }
}

impl TripInput {
    /// Returns the current value of one field.
    pub fn get(&self, field: TripField) -> &str {
        match field {
            TripField::Start => &self.start,
            TripField::End => &self.end,
            TripField::Mpg => &self.mpg,
            TripField::TankSize => &self.tank_size,
        }
    }

    /// Replaces one field's value, leaving the others untouched.
    pub fn set_field(&mut self, field: TripField, value: impl Into<String>) {
        let slot = match field {
            TripField::Start => &mut self.start,
            TripField::End => &mut self.end,
            TripField::Mpg => &mut self.mpg,
            TripField::TankSize => &mut self.tank_size,
        };
        *slot = value.into();
    }
}
