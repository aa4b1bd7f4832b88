//! # Bounded Counter
//!
//! The quantity stepper next to every product: an integer clamped to a
//! closed range that tells its observers about every accepted change.
//!
//! ## Stepper Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quantity Stepper                                     │
//! │                                                                         │
//! │   [-]  [ 3 ]  [+]                                                       │
//! │    │     │     │                                                        │
//! │    │     │     └── increment() ──┐                                      │
//! │    │     └──────── set_input() ──┼──► set_value(n)                      │
//! │    └────────────── decrement() ──┘        │                             │
//! │                                           ├── outside min..=max ──► Err │
//! │                                           ├── same value ──► Unchanged  │
//! │                                           └── accepted ──► notify all   │
//! │                                                                         │
//! │   After every attempt the display mirror shows the current value,       │
//! │   so a rejected "abc" snaps back to "3".                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Observers
//! Observers are called synchronously, in registration order, exactly once
//! per accepted change and never for a rejected or unchanged value. They
//! receive the change by shared reference and cannot reach back into the
//! counter while it is notifying.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use ts_rs::TS;

use crate::error::QuantityError;
use crate::{DEFAULT_QUANTITY, MAX_QUANTITY, MIN_QUANTITY};

// =============================================================================
// Settings
// =============================================================================

/// Bounds and starting value of a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case", default)]
#[ts(export)]
pub struct CounterSettings {
    pub default_value: i64,
    pub min: i64,
    pub max: i64,
}

impl Default for CounterSettings {
    fn default() -> Self {
        CounterSettings {
            default_value: DEFAULT_QUANTITY,
            min: MIN_QUANTITY,
            max: MAX_QUANTITY,
        }
    }
}

impl CounterSettings {
    /// Checks `min <= default_value <= max`.
    pub fn validate(&self) -> Result<(), QuantityError> {
        if self.min > self.max || !(self.min..=self.max).contains(&self.default_value) {
            return Err(QuantityError::InvalidBounds {
                min: self.min,
                max: self.max,
                default_value: self.default_value,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Change Types
// =============================================================================

/// Outcome of a set attempt that was not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum QuantityChange {
    /// Value moved; observers were notified.
    Changed { previous: i64, current: i64 },
    /// Value was already current; nobody was notified.
    Unchanged { current: i64 },
}

impl QuantityChange {
    pub fn is_changed(&self) -> bool {
        matches!(self, QuantityChange::Changed { .. })
    }

    /// The counter value after the attempt.
    pub fn value(&self) -> i64 {
        match *self {
            QuantityChange::Changed { current, .. } | QuantityChange::Unchanged { current } => {
                current
            }
        }
    }
}

/// Notification delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityChanged {
    pub previous: i64,
    pub current: i64,
}

/// Handle returned by [`BoundedCounter::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&QuantityChanged)>;

// =============================================================================
// Input Parsing
// =============================================================================

/// Parses stepper text input.
///
/// Leading whitespace is skipped, an optional sign is read, then the longest
/// run of ASCII digits; whatever follows is ignored, so "3 pizzas" is 3.
/// Values too large for `i64` saturate and are later rejected as out of
/// range.
///
/// ## Example
/// ```rust
/// use basil_core::counter::parse_quantity;
///
/// assert_eq!(parse_quantity(" 4").unwrap(), 4);
/// assert_eq!(parse_quantity("2.9").unwrap(), 2);
/// assert!(parse_quantity("two").is_err());
/// ```
pub fn parse_quantity(input: &str) -> Result<i64, QuantityError> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(QuantityError::NotANumber {
            input: input.to_string(),
        });
    }

    let digits = &rest[..digits_len];
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Ok(if negative { -magnitude } else { magnitude })
}

// =============================================================================
// Bounded Counter
// =============================================================================

/// Integer quantity clamped to `[min, max]` with change observers.
///
/// ## Invariants
/// - `min <= value() <= max` at all times
/// - `display()` always shows `value()` once a call returns
pub struct BoundedCounter {
    settings: CounterSettings,
    value: i64,
    display: String,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl BoundedCounter {
    /// Creates a counter at `settings.default_value`.
    pub fn new(settings: CounterSettings) -> Result<Self, QuantityError> {
        settings.validate()?;
        Ok(BoundedCounter {
            settings,
            value: settings.default_value,
            display: settings.default_value.to_string(),
            observers: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Current quantity.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Text mirror of the value, what the input field shows.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn settings(&self) -> CounterSettings {
        self.settings
    }

    /// Inclusive `(min, max)`.
    pub fn bounds(&self) -> (i64, i64) {
        (self.settings.min, self.settings.max)
    }

    pub fn can_increment(&self) -> bool {
        self.value < self.settings.max
    }

    pub fn can_decrement(&self) -> bool {
        self.value > self.settings.min
    }

    /// Attempts to set a new value.
    ///
    /// ## Returns
    /// - `Ok(Changed)` - value updated, every observer notified once
    /// - `Ok(Unchanged)` - value already current, nobody notified
    /// - `Err(OutOfRange)` - nothing changed, nobody notified
    pub fn set_value(&mut self, value: i64) -> Result<QuantityChange, QuantityError> {
        let outcome = self.apply(value);
        self.sync_display();
        outcome
    }

    /// Parses text input and attempts to set it.
    ///
    /// Unparseable input is `Err(NotANumber)` and changes nothing.
    pub fn set_input(&mut self, input: &str) -> Result<QuantityChange, QuantityError> {
        let outcome = parse_quantity(input).and_then(|value| self.apply(value));
        self.sync_display();
        outcome
    }

    /// `set_value(value() + 1)`.
    pub fn increment(&mut self) -> Result<QuantityChange, QuantityError> {
        self.set_value(self.value.saturating_add(1))
    }

    /// `set_value(value() - 1)`.
    pub fn decrement(&mut self) -> Result<QuantityChange, QuantityError> {
        self.set_value(self.value.saturating_sub(1))
    }

    /// Registers an observer for accepted changes.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&QuantityChanged) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn apply(&mut self, value: i64) -> Result<QuantityChange, QuantityError> {
        let CounterSettings { min, max, .. } = self.settings;
        if !(min..=max).contains(&value) {
            debug!(value, min, max, "Quantity rejected");
            return Err(QuantityError::OutOfRange { value, min, max });
        }

        if value == self.value {
            return Ok(QuantityChange::Unchanged { current: value });
        }

        let event = QuantityChanged {
            previous: self.value,
            current: value,
        };
        self.value = value;
        debug!(previous = event.previous, current = event.current, "Quantity changed");

        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }

        Ok(QuantityChange::Changed {
            previous: event.previous,
            current: event.current,
        })
    }

    fn sync_display(&mut self) {
        self.display = self.value.to_string();
    }
}

impl fmt::Debug for BoundedCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedCounter")
            .field("settings", &self.settings)
            .field("value", &self.value)
            .field("display", &self.display)
            .field("observers", &self.observers.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
