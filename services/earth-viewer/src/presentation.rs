//! What the result area shows for a given state.

use std::fmt;

use imagery_client::ImageHandle;
use map_view::MapFrame;

use crate::state::ViewState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presentation<'a> {
    /// Nothing fetched yet.
    Idle,
    Loading,
    Error(&'a str),
    Image(&'a ImageHandle),
}

/// Loading wins over error, error over image.
pub fn present(state: &ViewState) -> Presentation<'_> {
    if state.is_loading() {
        Presentation::Loading
    } else if let Some(error) = state.error() {
        Presentation::Error(error)
    } else if let Some(image) = state.image() {
        Presentation::Image(image)
    } else {
        Presentation::Idle
    }
}

impl fmt::Display for Presentation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Presentation::Idle => f.write_str("No image fetched yet."),
            Presentation::Loading => f.write_str("Loading satellite image..."),
            Presentation::Error(message) => f.write_str(message),
            Presentation::Image(image) => {
                write!(f, "NASA Satellite View: {}", image.url())?;
                let mut details = Vec::new();
                if let Some((w, h)) = image.dimensions() {
                    details.push(format!("{}x{}", w, h));
                }
                details.push(format!("{} bytes", image.len()));
                if let Some(content_type) = image.content_type() {
                    details.push(content_type.to_string());
                }
                write!(f, " ({})", details.join(", "))
            }
        }
    }
}

/// The input fields followed by the result area.
pub fn describe_state(state: &ViewState) -> String {
    let layer = match state.layer() {
        Some(layer) => format!("{} ({})", layer, layer.title()),
        None => "none".to_string(),
    };
    format!(
        "Latitude:  {}\nLongitude: {}\nDate:      {}\nLayer:     {}\n{}",
        state.latitude(),
        state.longitude(),
        state.date(),
        layer,
        present(state)
    )
}

/// One-paragraph text form of the map.
pub fn describe_map(frame: &MapFrame) -> String {
    let viewport = &frame.viewport;
    let mut text = format!(
        "Map: centre {} zoom {} ({}x{} px)\n",
        viewport.center, viewport.zoom, viewport.width, viewport.height
    );

    match &frame.marker {
        Some(marker) if marker.visible => text.push_str(&format!(
            "Marker: {} at pixel ({:.0}, {:.0})\n",
            marker.position, marker.pixel.0, marker.pixel.1
        )),
        Some(marker) => text.push_str(&format!("Marker: {} (off screen)\n", marker.position)),
        None => text.push_str("Marker: hidden (coordinates do not parse)\n"),
    }

    text.push_str(&format!("Tiles ({}):\n", frame.tiles.len()));
    for (coord, url) in &frame.tiles {
        text.push_str(&format!("  {} {}\n", coord, url));
    }
    text.push_str(&frame.attribution);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_by_default() {
        let state = ViewState::default();
        assert_eq!(present(&state), Presentation::Idle);
    }

    #[test]
    fn test_image_text() {
        let payload = test_utils::png_bytes(2, 2);
        let len = payload.len();
        let handle = ImageHandle::from_payload(payload.into(), Some("image/png".into()));

        let text = Presentation::Image(&handle).to_string();
        assert!(text.starts_with("NASA Satellite View: blob:"));
        assert!(text.ends_with(&format!("(2x2, {} bytes, image/png)", len)));
    }

    #[test]
    fn test_describe_state() {
        let text = describe_state(&ViewState::default());
        assert!(text.contains("Latitude:  37.7749"));
        assert!(text.contains("Layer:     natural (Natural Color)"));
        assert!(text.ends_with("No image fetched yet."));
    }

    #[test]
    fn test_loading_text() {
        assert_eq!(Presentation::Loading.to_string(), "Loading satellite image...");
    }
}
