//! Authoring conventions encoded in layer names

/// Suffix marking a node that only carries an anchor for runtime-injected content
pub const PLACEHOLDER_SUFFIX: &str = "_ph";

/// Suffix marking a node the engine renders as an animated button
pub const BUTTON_SUFFIX: &str = "Button";

/// Layer name reserved for design-reference artwork that is never exported
pub const SCREEN_NAME: &str = "screen";

/// Prefix of an image-page layer that only adds a folder to the export path
pub const FOLDER_PREFIX: &str = "path/";

/// Prefix dropped from variant names when they become image file names
pub const VARIANT_TYPE_PREFIX: &str = "type=";

/// Suffixes of image-page layers whose children export as a named group
pub const IMAGE_GROUP_SUFFIXES: [&str; 3] = ["_btn", "_checkbox", "_progress"];

pub fn is_placeholder(name: &str) -> bool {
    name.ends_with(PLACEHOLDER_SUFFIX)
}

pub fn is_button(name: &str) -> bool {
    name.ends_with(BUTTON_SUFFIX)
}

pub fn is_design_reference(name: &str) -> bool {
    name == SCREEN_NAME
}

/// Folder name of a `path/<folder>` layer, trimmed
pub fn folder_name(name: &str) -> Option<&str> {
    name.strip_prefix(FOLDER_PREFIX).map(str::trim)
}

/// The first image group suffix the name ends with
pub fn image_group_suffix(name: &str) -> Option<&'static str> {
    IMAGE_GROUP_SUFFIXES
        .iter()
        .copied()
        .find(|suffix| name.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventions_match_suffix_only() {
        assert!(is_placeholder("coin_ph"));
        assert!(!is_placeholder("ph_coin"));
        assert!(is_button("SpinButton"));
        assert!(!is_button("ButtonBar"));
        assert!(is_design_reference("screen"));
        assert!(!is_design_reference("screens"));
    }

    #[test]
    fn test_image_page_conventions() {
        assert_eq!(folder_name("path/ ui "), Some("ui"));
        assert_eq!(folder_name("paths/ui"), None);
        assert_eq!(image_group_suffix("spin_btn"), Some("_btn"));
        assert_eq!(image_group_suffix("sound_checkbox"), Some("_checkbox"));
        assert_eq!(image_group_suffix("load_progress"), Some("_progress"));
        assert_eq!(image_group_suffix("btn_spin"), None);
    }
}
