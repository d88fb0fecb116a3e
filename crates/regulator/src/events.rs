use strum::Display as StrumDisplay;

/// Push notifications emitted by a [`crate::state::Regulator`], in mutation order.
#[derive(Debug, Clone, Copy, PartialEq, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum RegulatorEvent {
    /// Fired on every accepted value update, including each drag sample.
    ValueChanged(f64),
    /// Fired once when a drag gesture ends, carrying the final value.
    TargetCommitted(f64),
    /// The color output was switched on or off.
    Switched(bool),
}
