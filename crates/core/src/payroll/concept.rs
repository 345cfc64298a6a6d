//! Classification labels attached to computed hour-records.
//!
//! The `concept` table maps a human-readable description to a stable id.
//! The classifier only ever emits these six labels, so they are enumerated
//! here by a stable code; the persistence layer resolves each code to its
//! row id with an atomic upsert. String-typed resolution never leaves the
//! repository layer.

/// The closed set of classification labels the classifier can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConceptCode {
    /// Saturday or Sunday inside the recomputed range.
    NonBusinessDay,
    /// Business day with no IN event at all.
    AbsentNoCheckIn,
    /// An IN event exists but no qualifying OUT was found.
    PresentNoCheckOut,
    /// Worked duration within the 8h ± 30m band (also the base record of an
    /// overtime day).
    FullWorkday,
    /// Worked duration below the band.
    MissingTime,
    /// The remainder above 8h, pending validation.
    Overtime,
}

impl ConceptCode {
    /// The exact description stored in (and looked up from) the `concept`
    /// table. These spellings are load-bearing: existing rows were created
    /// under them.
    pub fn description(self) -> &'static str {
        match self {
            ConceptCode::NonBusinessDay => "Día no hábil.",
            ConceptCode::AbsentNoCheckIn => "Ausente sin entrada registrada",
            ConceptCode::PresentNoCheckOut => "Presente sin salida registrada",
            ConceptCode::FullWorkday => "Jornada laboral completa",
            ConceptCode::MissingTime => "Tiempo faltante",
            ConceptCode::Overtime => "Horas extra",
        }
    }

    /// All codes, in seeding order.
    pub const ALL: [ConceptCode; 6] = [
        ConceptCode::NonBusinessDay,
        ConceptCode::AbsentNoCheckIn,
        ConceptCode::PresentNoCheckOut,
        ConceptCode::FullWorkday,
        ConceptCode::MissingTime,
        ConceptCode::Overtime,
    ];
}
