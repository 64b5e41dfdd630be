use nimbus_core::WeatherRecord;

/// Where resolved weather and error messages end up. The terminal
/// implementation below is the only one in the binary; tests capture
/// output through the same trait.
pub trait Presenter {
    fn show_loading(&mut self);
    fn show_weather(&mut self, record: &WeatherRecord);
    /// `blocking` distinguishes a hard failure from an advisory shown
    /// alongside a record.
    fn show_error(&mut self, message: &str, blocking: bool);
}

/// Rounding happens here and nowhere else: whole degrees for
/// temperatures, one decimal for wind.
pub fn format_weather(record: &WeatherRecord) -> String {
    let mut out = format!(
        "{}\n  {}°C, {} ({})  [{}]\n  Feels like {}°C, humidity {}%, wind {:.1} m/s",
        record.location_name,
        record.temperature_c.round() as i64,
        record.condition,
        record.description,
        record.icon,
        record.feels_like_c.round() as i64,
        record.humidity_pct,
        record.wind_speed_mps,
    );

    if let Some(observed_at) = record.observed_at {
        out.push_str(&format!("\n  Observed at {}", observed_at.format("%Y-%m-%d %H:%M UTC")));
    }

    out
}

#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn show_loading(&mut self) {
        println!("Fetching weather...");
    }

    fn show_weather(&mut self, record: &WeatherRecord) {
        println!("{}", format_weather(record));
    }

    fn show_error(&mut self, message: &str, blocking: bool) {
        if blocking {
            eprintln!("Error: {message}");
        } else {
            eprintln!("Note: {message}");
        }
    }
}
