//! Line commands accepted by the interactive viewer.

use std::path::PathBuf;

use imagery_common::{ViewerError, ViewerResult};

pub const HELP: &str = "\
Commands:
  lat <value>      set latitude (raw text, checked on fetch)
  lon <value>      set longitude
  date <value>     set date (YYYY-MM-DD)
  layer <name>     natural | vegetation | thermal | none
  click <x> <y>    click the map at a viewport pixel
  zoom <z>         set map zoom
  fetch            fetch the satellite image
  show             show inputs and result
  map              describe the map and its tiles
  save <path>      write the current image to disk
  help             this text
  quit             exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetLatitude(String),
    SetLongitude(String),
    SetDate(String),
    SetLayer(String),
    ClearLayer,
    Click { x: f64, y: f64 },
    Zoom(u32),
    Fetch,
    Show,
    Map,
    Save(PathBuf),
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    ///
    /// Setter arguments are taken verbatim (after trimming), even when
    /// empty.
    pub fn parse(line: &str) -> ViewerResult<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "lat" | "latitude" => Command::SetLatitude(rest.to_string()),
            "lon" | "lng" | "longitude" => Command::SetLongitude(rest.to_string()),
            "date" => Command::SetDate(rest.to_string()),
            "layer" if rest.eq_ignore_ascii_case("none") => Command::ClearLayer,
            "layer" => Command::SetLayer(rest.to_string()),
            "click" => parse_click(rest)?,
            "zoom" => Command::Zoom(rest.parse().map_err(|_| {
                ViewerError::invalid_parameter("zoom", format!("'{}' is not a zoom level", rest))
            })?),
            "fetch" => Command::Fetch,
            "show" => Command::Show,
            "map" => Command::Map,
            "save" if rest.is_empty() => {
                return Err(ViewerError::invalid_parameter("save", "missing output path"))
            }
            "save" => Command::Save(PathBuf::from(rest)),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(ViewerError::invalid_parameter(
                    "command",
                    format!("unknown command '{}', try 'help'", other),
                ))
            }
        };
        Ok(Some(command))
    }
}

fn parse_click(rest: &str) -> ViewerResult<Command> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(ViewerError::invalid_parameter(
            "click",
            "expected 'click <x> <y>'",
        ));
    }

    let number = |s: &str| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ViewerError::invalid_parameter("click", format!("'{}' is not a pixel position", s)))
    };

    Ok(Command::Click {
        x: number(parts[0])?,
        y: number(parts[1])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_keep_raw_values() {
        assert_eq!(
            Command::parse("lat  12.5abc ").unwrap(),
            Some(Command::SetLatitude("12.5abc".to_string()))
        );
        assert_eq!(
            Command::parse("lon").unwrap(),
            Some(Command::SetLongitude(String::new()))
        );
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_click() {
        assert_eq!(
            Command::parse("click 10 20.5").unwrap(),
            Some(Command::Click { x: 10.0, y: 20.5 })
        );
        assert!(Command::parse("click 10").is_err());
        assert!(Command::parse("click NaN 1").is_err());
    }

    #[test]
    fn test_layer_none() {
        assert_eq!(Command::parse("layer none").unwrap(), Some(Command::ClearLayer));
        assert_eq!(
            Command::parse("layer thermal").unwrap(),
            Some(Command::SetLayer("thermal".to_string()))
        );
    }

    #[test]
    fn test_unknown_and_incomplete() {
        assert!(Command::parse("teleport").is_err());
        assert!(Command::parse("save").is_err());
        assert!(Command::parse("zoom high").is_err());
    }
}
