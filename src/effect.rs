//! Effects - side effects declared by the reducer

use crate::theme::Icon;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current conditions for the given city
    FetchWeather { city: String },
    /// Point the window icon at the given icon
    SetFavicon(Icon),
}
