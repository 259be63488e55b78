//! Event names and payloads published by the slider model.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Every event the model can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelEvent {
    Value1Changed,
    Value2Changed,
    IsVerticalChanged,
    IsIntervalChanged,
    ShowProgressChanged,
    ShowTipChanged,
    ShowScaleChanged,
    StepSizeChanged,
    MinValueChanged,
    MaxValueChanged,
}

impl ModelEvent {
    pub const ALL: [ModelEvent; 10] = [
        ModelEvent::Value1Changed,
        ModelEvent::Value2Changed,
        ModelEvent::IsVerticalChanged,
        ModelEvent::IsIntervalChanged,
        ModelEvent::ShowProgressChanged,
        ModelEvent::ShowTipChanged,
        ModelEvent::ShowScaleChanged,
        ModelEvent::StepSizeChanged,
        ModelEvent::MinValueChanged,
        ModelEvent::MaxValueChanged,
    ];

    /// Name used on the JavaScript side.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelEvent::Value1Changed => "value1Changed",
            ModelEvent::Value2Changed => "value2Changed",
            ModelEvent::IsVerticalChanged => "isVerticalChanged",
            ModelEvent::IsIntervalChanged => "isIntervalChanged",
            ModelEvent::ShowProgressChanged => "showProgressChanged",
            ModelEvent::ShowTipChanged => "showTipChanged",
            ModelEvent::ShowScaleChanged => "showScaleChanged",
            ModelEvent::StepSizeChanged => "stepSizeChanged",
            ModelEvent::MinValueChanged => "minValueChanged",
            ModelEvent::MaxValueChanged => "maxValueChanged",
        }
    }

    /// The value-changed event for a handle.
    pub fn value_changed(slot: ValueSlot) -> Self {
        match slot {
            ValueSlot::First => ModelEvent::Value1Changed,
            ValueSlot::Second => ModelEvent::Value2Changed,
        }
    }
}

impl fmt::Display for ModelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventError(pub String);

impl fmt::Display for UnknownEventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown slider event: {}", self.0)
    }
}

impl std::error::Error for UnknownEventError {}

impl FromStr for ModelEvent {
    type Err = UnknownEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelEvent::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| UnknownEventError(s.to_string()))
    }
}

/// Which handle a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueSlot {
    First,
    Second,
}

impl ValueSlot {
    /// 1 or 2, as shown to users and sent to JavaScript.
    pub fn number(self) -> u8 {
        match self {
            ValueSlot::First => 1,
            ValueSlot::Second => 2,
        }
    }
}

impl Serialize for ValueSlot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

/// Data delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    /// A handle value changed.
    #[serde(rename_all = "camelCase")]
    Value {
        number: ValueSlot,
        value: f64,
        should_update_tip: bool,
    },
    /// A display flag changed.
    Flag(bool),
    /// Step size or one of the bounds changed.
    Number(f64),
}

impl EventPayload {
    /// Numeric content, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            EventPayload::Value { value, .. } => Some(value),
            EventPayload::Number(n) => Some(n),
            EventPayload::Flag(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            EventPayload::Flag(b) => Some(b),
            _ => None,
        }
    }
}
