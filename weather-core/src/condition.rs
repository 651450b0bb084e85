use serde::{Deserialize, Serialize};
use std::fmt;

use crate::select::{self, Selector};

/// Normalized condition shown to the user.
///
/// Derived from the provider's main weather keyword ("Clear", "Rain", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    Sunny,
    Cloudy,
    Rainy,
    Drizzle,
    Stormy,
    Snowy,
    Misty,
    Foggy,
    Hazy,
    PartlyCloudy,
}

impl Condition {
    /// Case-insensitive lookup; anything unknown is `PartlyCloudy`.
    pub fn from_main(main: &str) -> Self {
        match main.trim().to_lowercase().as_str() {
            "clear" => Condition::Sunny,
            "clouds" => Condition::Cloudy,
            "rain" => Condition::Rainy,
            "drizzle" => Condition::Drizzle,
            "thunderstorm" => Condition::Stormy,
            "snow" => Condition::Snowy,
            "mist" => Condition::Misty,
            "fog" => Condition::Foggy,
            "haze" => Condition::Hazy,
            _ => Condition::PartlyCloudy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Sunny => "sunny",
            Condition::Cloudy => "cloudy",
            Condition::Rainy => "rainy",
            Condition::Drizzle => "drizzle",
            Condition::Stormy => "stormy",
            Condition::Snowy => "snowy",
            Condition::Misty => "misty",
            Condition::Foggy => "foggy",
            Condition::Hazy => "hazy",
            Condition::PartlyCloudy => "partly-cloudy",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Background pools are keyed on the raw keyword family and are coarser than
// `Condition`: drizzle, mist, fog and haze all land in the default pool.
const CLEAR_BACKGROUNDS: [&str; 3] = [
    "https://images.pexels.com/photos/1619317/pexels-photo-1619317.jpeg?auto=compress&cs=tinysrgb&w=1920",
    "https://images.pexels.com/photos/281260/pexels-photo-281260.jpeg?auto=compress&cs=tinysrgb&w=1920",
    "https://images.pexels.com/photos/1770809/pexels-photo-1770809.jpeg?auto=compress&cs=tinysrgb&w=1920",
];
const CLOUDS_BACKGROUNDS: [&str; 3] = [
    "https://images.pexels.com/photos/590478/pexels-photo-590478.jpeg?auto=compress&cs=tinysrgb&w=1920",
    "https://images.pexels.com/photos/417074/pexels-photo-417074.jpeg?auto=compress&cs=tinysrgb&w=1920",
    "https://images.pexels.com/photos/1612461/pexels-photo-1612461.jpeg?auto=compress&cs=tinysrgb&w=1920",
];
const RAIN_BACKGROUNDS: [&str; 3] = [
    "https://images.pexels.com/photos/1463917/pexels-photo-1463917.jpeg?auto=compress&cs=tinysrgb&w=1920",
    "https://images.pexels.com/photos/1529360/pexels-photo-1529360.jpeg?auto=compress&cs=tinysrgb&w=1920",
    "https://images.pexels.com/photos/1530423/pexels-photo-1530423.jpeg?auto=compress&cs=tinysrgb&w=1920",
];
const SNOW_BACKGROUNDS: [&str; 3] = [
    "https://images.pexels.com/photos/235621/pexels-photo-235621.jpeg?auto=compress&cs=tinysrgb&w=1920",
    "https://images.pexels.com/photos/1571442/pexels-photo-1571442.jpeg?auto=compress&cs=tinysrgb&w=1920",
    "https://images.pexels.com/photos/1666021/pexels-photo-1666021.jpeg?auto=compress&cs=tinysrgb&w=1920",
];
const THUNDERSTORM_BACKGROUNDS: [&str; 3] = [
    "https://images.pexels.com/photos/1162251/pexels-photo-1162251.jpeg?auto=compress&cs=tinysrgb&w=1920",
    "https://images.pexels.com/photos/1446076/pexels-photo-1446076.jpeg?auto=compress&cs=tinysrgb&w=1920",
    "https://images.pexels.com/photos/1118873/pexels-photo-1118873.jpeg?auto=compress&cs=tinysrgb&w=1920",
];
const DEFAULT_BACKGROUNDS: [&str; 3] = [
    "https://images.pexels.com/photos/290386/pexels-photo-290386.jpeg?auto=compress&cs=tinysrgb&w=1920",
    "https://images.pexels.com/photos/248797/pexels-photo-248797.jpeg?auto=compress&cs=tinysrgb&w=1920",
    "https://images.pexels.com/photos/417195/pexels-photo-417195.jpeg?auto=compress&cs=tinysrgb&w=1920",
];

/// The image pool for a raw main keyword.
pub fn background_pool(main: &str) -> &'static [&'static str; 3] {
    match main.trim().to_lowercase().as_str() {
        "clear" => &CLEAR_BACKGROUNDS,
        "clouds" => &CLOUDS_BACKGROUNDS,
        "rain" => &RAIN_BACKGROUNDS,
        "snow" => &SNOW_BACKGROUNDS,
        "thunderstorm" => &THUNDERSTORM_BACKGROUNDS,
        _ => &DEFAULT_BACKGROUNDS,
    }
}

/// Pick a background image for a raw main keyword.
pub fn background_for(main: &str, selector: &dyn Selector) -> &'static str {
    let pool = background_pool(main);
    select::choose(selector, pool).copied().unwrap_or(pool[0])
}

/// Upper-case the first letter of every space-separated word.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::FixedSelector;

    #[test]
    fn maps_main_keywords_case_insensitively() {
        assert_eq!(Condition::from_main("Thunderstorm"), Condition::Stormy);
        assert_eq!(Condition::from_main("THUNDERSTORM"), Condition::Stormy);
        assert_eq!(Condition::from_main("clear"), Condition::Sunny);
        assert_eq!(Condition::from_main("Haze"), Condition::Hazy);
    }

    #[test]
    fn unknown_keyword_is_partly_cloudy() {
        let c = Condition::from_main("Tornado");
        assert_eq!(c, Condition::PartlyCloudy);
        assert_eq!(c.as_str(), "partly-cloudy");
    }

    #[test]
    fn background_table_is_coarser_than_conditions() {
        // Drizzle has its own condition but shares the default image pool.
        assert_eq!(Condition::from_main("Drizzle"), Condition::Drizzle);
        assert_eq!(background_pool("Drizzle"), &DEFAULT_BACKGROUNDS);
        assert_eq!(background_pool("Mist"), &DEFAULT_BACKGROUNDS);
        assert_eq!(background_pool("Rain"), &RAIN_BACKGROUNDS);
    }

    #[test]
    fn background_uses_selector() {
        assert_eq!(
            background_for("Snow", &FixedSelector(2)),
            SNOW_BACKGROUNDS[2]
        );
        assert_eq!(
            background_for("Tornado", &FixedSelector(0)),
            DEFAULT_BACKGROUNDS[0]
        );
    }

    #[test]
    fn title_cases_each_word() {
        assert_eq!(title_case("clear sky"), "Clear Sky");
        assert_eq!(title_case("light  rain"), "Light  Rain");
        assert_eq!(title_case(""), "");
    }
}
