pub mod backdrop;
pub mod city_input;
pub mod heading;
pub mod notice;
pub mod weather_body;
pub mod weather_display;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use backdrop::{Backdrop, BackdropProps};
pub use city_input::{CityInput, CityInputProps};
pub use heading::{Heading, HeadingProps};
pub use notice::{NOTICE_ICON, NoticeModal, NoticeModalProps};
pub use weather_body::{WeatherBody, WeatherBodyProps};
pub use weather_display::{WeatherDisplay, WeatherDisplayProps};
