//! Card image export boundary.
//!
//! The rasterizer that turns a rendered card face into PNG bytes lives
//! outside core. This module names the output file and contains failures:
//! an export error is logged and reported as "nothing exported", never
//! propagated.

use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Face of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    Front,
    Back,
}

impl CardSide {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }
}

/// Rasterization failure reported by a [`CardRasterizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportError {
    pub message: String,
}

impl ExportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "card export failed: {}", self.message)
    }
}

impl Error for ExportError {}

/// External collaborator that captures one rendered card face.
pub trait CardRasterizer {
    /// Opaque handle to the rendered region (a DOM node, a widget id...).
    type Region;

    fn rasterize(&self, region: &Self::Region) -> Result<Vec<u8>, ExportError>;
}

/// Encoded image ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub png_bytes: Vec<u8>,
}

/// Suggested download name: `business-card-<side>-<name|card>.png`.
pub fn export_file_name(side: CardSide, name: Option<&str>) -> String {
    let label = name
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("card");
    format!("business-card-{}-{label}.png", side.as_str())
}

/// Captures one face. Returns `None` when the rasterizer fails.
pub fn export_card<R: CardRasterizer>(
    rasterizer: &R,
    side: CardSide,
    region: &R::Region,
    name: Option<&str>,
) -> Option<ExportedImage> {
    match rasterizer.rasterize(region) {
        Ok(png_bytes) => {
            info!(
                "event=card_export module=export status=ok side={} bytes={}",
                side.as_str(),
                png_bytes.len()
            );
            Some(ExportedImage {
                file_name: export_file_name(side, name),
                png_bytes,
            })
        }
        Err(err) => {
            error!(
                "event=card_export module=export status=error side={} error={}",
                side.as_str(),
                err
            );
            None
        }
    }
}

/// Captures the front then the back; each face succeeds or fails alone.
pub fn export_both_sides<R: CardRasterizer>(
    rasterizer: &R,
    front: &R::Region,
    back: &R::Region,
    name: Option<&str>,
) -> Vec<ExportedImage> {
    [(CardSide::Front, front), (CardSide::Back, back)]
        .into_iter()
        .filter_map(|(side, region)| export_card(rasterizer, side, region, name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        export_both_sides, export_card, export_file_name, CardRasterizer, CardSide, ExportError,
    };

    /// Fails for the region named "broken".
    struct StubRasterizer;

    impl CardRasterizer for StubRasterizer {
        type Region = &'static str;

        fn rasterize(&self, region: &Self::Region) -> Result<Vec<u8>, ExportError> {
            if *region == "broken" {
                return Err(ExportError::new("canvas tainted"));
            }
            Ok(region.as_bytes().to_vec())
        }
    }

    #[test]
    fn file_name_falls_back_to_card() {
        assert_eq!(
            export_file_name(CardSide::Front, Some("Ada")),
            "business-card-front-Ada.png"
        );
        assert_eq!(
            export_file_name(CardSide::Back, Some("  ")),
            "business-card-back-card.png"
        );
        assert_eq!(
            export_file_name(CardSide::Back, None),
            "business-card-back-card.png"
        );
    }

    #[test]
    fn failures_are_swallowed() {
        assert!(export_card(&StubRasterizer, CardSide::Front, &"broken", Some("Ada")).is_none());

        let image = export_card(&StubRasterizer, CardSide::Front, &"face", Some("Ada")).unwrap();
        assert_eq!(image.png_bytes, b"face".to_vec());
    }

    #[test]
    fn both_sides_export_independently() {
        let images = export_both_sides(&StubRasterizer, &"broken", &"back", None);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].file_name, "business-card-back-card.png");
    }
}
