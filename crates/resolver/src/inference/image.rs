use slide_intent_core::types::{AspectRatio, ImageConfig, ImageQuality, ImageStyle};

use super::{any_of, Inferable};

/// Position presets inside the content-safe zone (rows 4-18, columns 2-32).
const POSITION_PRESETS: &[(&[&str], &str, &str)] = &[
    (&["full", "full size", "full width"], "4/18", "2/32"),
    (&["half left", "left half", "left side"], "4/18", "2/17"),
    (&["half right", "right half", "right side"], "4/18", "17/32"),
    (&["top left", "upper left"], "4/11", "2/17"),
    (&["top right", "upper right"], "4/11", "17/32"),
    (&["bottom left", "lower left"], "11/18", "2/17"),
    (&["bottom right", "lower right"], "11/18", "17/32"),
];

/// Infer image style, quality and placement from a lowercased message.
pub fn infer_image(message: &str) -> ImageConfig {
    let mut config = ImageConfig::default();

    config.style = if any_of(message, &["illustration", "illustrated", "cartoon", "drawn"]) {
        ImageStyle::Illustration
    } else if any_of(message, &["corporate", "business", "professional", "formal"]) {
        ImageStyle::Corporate
    } else if any_of(message, &["abstract", "artistic", "creative"]) {
        ImageStyle::Abstract
    } else if any_of(message, &["minimalist", "simple", "clean", "minimal"]) {
        ImageStyle::Minimalist
    } else {
        ImageStyle::Realistic
    };

    config.quality = if any_of(message, &["draft", "quick", "low quality", "fast"]) {
        ImageQuality::Draft
    } else if any_of(message, &["high quality", "high-quality", "detailed", "hd"]) {
        ImageQuality::High
    } else if any_of(message, &["ultra", "ultra quality", "highest quality", "4k"]) {
        ImageQuality::Ultra
    } else {
        ImageQuality::Standard
    };

    if let Some((_, row, column)) = POSITION_PRESETS
        .iter()
        .find(|(keywords, _, _)| any_of(message, keywords))
    {
        config.grid_row = row.to_string();
        config.grid_column = column.to_string();
    }

    if any_of(message, &["square", "1:1"]) {
        config.aspect_ratio = AspectRatio::Square;
    } else if any_of(message, &["16:9", "widescreen", "wide"]) {
        config.aspect_ratio = AspectRatio::Wide;
    } else if message.contains("4:3") {
        config.aspect_ratio = AspectRatio::Standard;
    } else if message.contains("3:2") {
        config.aspect_ratio = AspectRatio::Photo;
    } else if any_of(message, &["portrait", "vertical", "9:16"]) {
        config.aspect_ratio = AspectRatio::Portrait;
    }

    config.placeholder_mode = any_of(message, &["placeholder", "dummy", "sample"]);

    config
}

impl Inferable for ImageConfig {
    fn infer(message: &str) -> Self {
        infer_image(message)
    }

    const EXTRACTION_RULES: &'static str = "\
- style is realistic unless the message asks for illustration, corporate, abstract or minimalist.
- positions use the content-safe zone, rows 4-18 and columns 2-32: full is grid_row \"4/18\" grid_column \"2/32\"; left half is \"4/18\" \"2/17\"; right half is \"4/18\" \"17/32\"; top left is \"4/11\" \"2/17\".
- square means aspect_ratio \"1:1\"; portrait means \"9:16\".
- \"2 images\" sets count (1-4).";
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide_intent_core::types::{DEFAULT_IMAGE_COLUMN_SPAN, DEFAULT_IMAGE_ROW_SPAN};

    #[test]
    fn test_default_placement() {
        let config = infer_image("add an image of a mountain");
        assert_eq!(config.grid_row, DEFAULT_IMAGE_ROW_SPAN);
        assert_eq!(config.grid_column, DEFAULT_IMAGE_COLUMN_SPAN);
        assert_eq!(config.aspect_ratio, AspectRatio::Wide);
        assert_eq!(config.style, ImageStyle::Realistic);
        assert_eq!(config.quality, ImageQuality::Standard);
    }

    #[test]
    fn test_presets() {
        let config = infer_image("photo on the right half");
        assert_eq!((config.grid_row.as_str(), config.grid_column.as_str()), ("4/18", "17/32"));

        let corner = infer_image("illustration bottom left");
        assert_eq!((corner.grid_row.as_str(), corner.grid_column.as_str()), ("11/18", "2/17"));
        assert_eq!(corner.style, ImageStyle::Illustration);
    }

    #[test]
    fn test_aspect_override_and_quality() {
        let config = infer_image("square corporate photo in 4k");
        assert_eq!(config.aspect_ratio, AspectRatio::Square);
        assert_eq!(config.style, ImageStyle::Corporate);
        assert_eq!(config.quality, ImageQuality::Ultra);
    }

    #[test]
    fn test_inferred_spans_validate() {
        use slide_intent_core::types::ComponentSettings;
        for message in ["full", "left side", "right side", "top left", "top right", "lower left", "lower right", ""] {
            assert!(infer_image(message).validate().is_ok(), "{message}");
        }
    }
}
