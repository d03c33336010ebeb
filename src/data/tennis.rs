//! The fourteen-row PlayTennis table for decision-tree induction.

use std::collections::BTreeMap;

/// Target attribute of the PlayTennis table.
pub const PLAY_TENNIS_TARGET: &str = "PlayTennis";

fn row(outlook: &str, temperature: &str, humidity: &str, wind: &str, play: &str) -> BTreeMap<String, String> {
    let mut example = BTreeMap::new();
    example.insert("Outlook".to_string(), outlook.to_string());
    example.insert("Temperature".to_string(), temperature.to_string());
    example.insert("Humidity".to_string(), humidity.to_string());
    example.insert("Wind".to_string(), wind.to_string());
    example.insert(PLAY_TENNIS_TARGET.to_string(), play.to_string());
    example
}

/// The classic PlayTennis training table.
pub fn play_tennis_examples() -> Vec<BTreeMap<String, String>> {
    vec![
        row("Sunny", "Hot", "High", "Weak", "No"),
        row("Sunny", "Hot", "High", "Strong", "No"),
        row("Overcast", "Hot", "High", "Weak", "Yes"),
        row("Rain", "Mild", "High", "Weak", "Yes"),
        row("Rain", "Cool", "Normal", "Weak", "Yes"),
        row("Rain", "Cool", "Normal", "Strong", "No"),
        row("Overcast", "Cool", "Normal", "Strong", "Yes"),
        row("Sunny", "Mild", "High", "Weak", "No"),
        row("Sunny", "Cool", "Normal", "Weak", "Yes"),
        row("Rain", "Mild", "Normal", "Weak", "Yes"),
        row("Sunny", "Mild", "Normal", "Strong", "Yes"),
        row("Overcast", "Mild", "High", "Strong", "Yes"),
        row("Overcast", "Hot", "Normal", "Weak", "Yes"),
        row("Rain", "Mild", "High", "Strong", "No"),
    ]
}
