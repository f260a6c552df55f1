//! Date distance labels for events and training plans.

use std::fmt;

use chrono::{DateTime, NaiveDate};

/// Whole days from `today` to `date`. Negative when `date` is in the past.
pub fn days_until(today: NaiveDate, date: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Parses a date as the backend sends it: either `YYYY-MM-DD` or a full
/// RFC 3339 timestamp, in which case only the date part is kept.
pub fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// How close an event is. Drives the badge color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Urgency {
    Past,
    Soon,
    Upcoming,
    Distant,
}

/// "Time until the race" label on an event card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Countdown {
    Past,
    Today,
    Tomorrow,
    Days(i64),
    Weeks(i64),
    Months(i64),
}

impl Countdown {
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d < 0 => Self::Past,
            0 => Self::Today,
            1 => Self::Tomorrow,
            d if d < 7 => Self::Days(d),
            d if d < 30 => Self::Weeks((d + 6) / 7),
            d => Self::Months((d + 29) / 30),
        }
    }

    pub fn between(today: NaiveDate, date: NaiveDate) -> Self {
        Self::from_days(days_until(today, date))
    }

    pub fn urgency(days: i64) -> Urgency {
        match days {
            d if d < 0 => Urgency::Past,
            d if d < 7 => Urgency::Soon,
            d if d < 30 => Urgency::Upcoming,
            _ => Urgency::Distant,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Past => f.write_str("Evento realizado"),
            Self::Today => f.write_str("Hoje"),
            Self::Tomorrow => f.write_str("Amanhã"),
            Self::Days(n) => write!(f, "Em {n} dias"),
            Self::Weeks(n) => write!(f, "Em {n} semanas"),
            Self::Months(n) => write!(f, "Em {n} meses"),
        }
    }
}

/// Race distance label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RaceDistance {
    Marathon,
    HalfMarathon,
    Km(f64),
}

impl RaceDistance {
    pub fn from_km(km: f64) -> Self {
        if km >= 42.0 {
            Self::Marathon
        } else if km >= 21.0 {
            Self::HalfMarathon
        } else {
            Self::Km(km)
        }
    }
}

impl fmt::Display for RaceDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marathon => f.write_str("Maratona"),
            Self::HalfMarathon => f.write_str("Meia Maratona"),
            Self::Km(km) => write!(f, "{km}km"),
        }
    }
}

// ---------------------------------------------------------------------------
// Training plans
// ---------------------------------------------------------------------------

/// Remaining time on a training plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanRemaining {
    /// The plan has no end date.
    OpenEnded,
    Finished,
    LastDay,
    Days(i64),
}

impl PlanRemaining {
    /// `None` means the plan has no end date.
    pub fn from_days(days: Option<i64>) -> Self {
        match days {
            None => Self::OpenEnded,
            Some(d) if d < 0 => Self::Finished,
            Some(0) => Self::LastDay,
            Some(d) => Self::Days(d),
        }
    }

    pub fn between(today: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self::from_days(end.map(|end| days_until(today, end)))
    }

    /// Plans use a green badge where events use blue, so the far end of
    /// the scale is `Distant` here too and the caller picks the color.
    pub fn urgency(self) -> Option<Urgency> {
        match self {
            Self::OpenEnded => None,
            Self::Finished => Some(Urgency::Past),
            Self::LastDay => Some(Urgency::Soon),
            Self::Days(d) => Some(Countdown::urgency(d)),
        }
    }
}

impl fmt::Display for PlanRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenEnded => f.write_str("Sem data final"),
            Self::Finished => f.write_str("Concluída"),
            Self::LastDay => f.write_str("Último dia"),
            Self::Days(1) => f.write_str("1 dia restante"),
            Self::Days(n) => write!(f, "{n} dias restantes"),
        }
    }
}
